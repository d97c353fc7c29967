// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

use sea_orm::entity::*;
use sea_orm::query::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::db::entity::{
    prelude::{QuotaUsage as DbQuotaUsage, Reservation as DbReservation},
    quota_usage as db_usage, reservation as db_reservation,
};
use crate::error::DbContextExt;
use crate::quota::error::QuotaProviderError;

use super::lock_usage;

/// Fold the reserved deltas into the usage and drop the reservations.
///
/// Commit and rollback are mutually exclusive per reservation: whichever
/// runs first deletes the row, the other finds nothing and reports the
/// reservation as gone. Usage rows are locked before any reservation row is
/// touched, in resource name order.
pub async fn commit<'a>(
    db: &DatabaseConnection,
    project_id: &'a str,
    reservation_ids: &'a [String],
) -> Result<(), QuotaProviderError> {
    let txn = db.begin().await.context("starting commit transaction")?;

    let mut reservations = DbReservation::find()
        .filter(db_reservation::Column::Uuid.is_in(reservation_ids.iter().map(String::as_str)))
        .filter(db_reservation::Column::ProjectId.eq(project_id))
        .all(&txn)
        .await
        .context("reading reservations")?;

    if let Some(missing) = first_missing(reservation_ids, &reservations) {
        txn.rollback().await.context("aborting commit")?;
        return Err(QuotaProviderError::ReservationNotFound(missing));
    }
    reservations.sort_by(|a, b| a.resource.cmp(&b.resource));

    for reservation in &reservations {
        let usage = lock_usage(&txn, reservation.usage_id).await?;
        let mut update = DbQuotaUsage::update_many()
            .col_expr(
                db_usage::Column::InUse,
                Expr::col(db_usage::Column::InUse).add(reservation.delta),
            )
            .filter(db_usage::Column::Id.eq(usage.id));
        if reservation.delta > 0 {
            update = update.col_expr(
                db_usage::Column::Reserved,
                Expr::col(db_usage::Column::Reserved).sub(reservation.delta),
            );
        }
        update
            .exec(&txn)
            .await
            .context("folding reservation into usage")?;
    }

    DbReservation::delete_many()
        .filter(db_reservation::Column::Uuid.is_in(reservation_ids.iter().map(String::as_str)))
        .exec(&txn)
        .await
        .context("removing committed reservations")?;

    txn.commit().await.context("committing reservation commit")?;
    Ok(())
}

// The uuid of the first requested reservation that is not present anymore.
pub(crate) fn first_missing(
    requested: &[String],
    found: &[db_reservation::Model],
) -> Option<String> {
    requested
        .iter()
        .find(|uuid| !found.iter().any(|reservation| &reservation.uuid == *uuid))
        .cloned()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_commit() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // reservations
            .append_query_results([vec![get_reservation_mock(1, "res_uuid", 1, "port", 2)]])
            // locked usage
            .append_query_results([vec![get_usage_mock(1, "project_uuid", "port", 8, 2)]])
            // usage update + reservation delete
            .append_exec_results([
                MockExecResult {
                    rows_affected: 1,
                    ..Default::default()
                },
                MockExecResult {
                    rows_affected: 1,
                    ..Default::default()
                },
            ])
            .into_connection();

        commit(&db, "project_uuid", &["res_uuid".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_commit_gone_reservation() {
        // The reservation was already committed or rolled back.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<db_reservation::Model>::new()])
            .into_connection();

        assert!(matches!(
            commit(&db, "project_uuid", &["res_uuid".to_string()])
                .await
                .unwrap_err(),
            QuotaProviderError::ReservationNotFound(..)
        ));
    }

    #[test]
    fn test_first_missing() {
        let found = vec![get_reservation_mock(1, "a", 1, "port", 1)];
        assert_eq!(
            first_missing(&["a".to_string(), "b".to_string()], &found),
            Some("b".to_string())
        );
        assert_eq!(first_missing(&["a".to_string()], &found), None);
    }
}
