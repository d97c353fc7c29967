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

use super::commit::first_missing;
use super::lock_usage;

/// Release the reserved deltas without touching the usage.
pub async fn rollback<'a>(
    db: &DatabaseConnection,
    project_id: &'a str,
    reservation_ids: &'a [String],
) -> Result<(), QuotaProviderError> {
    let txn = db.begin().await.context("starting rollback transaction")?;

    let mut reservations = DbReservation::find()
        .filter(db_reservation::Column::Uuid.is_in(reservation_ids.iter().map(String::as_str)))
        .filter(db_reservation::Column::ProjectId.eq(project_id))
        .all(&txn)
        .await
        .context("reading reservations")?;

    if let Some(missing) = first_missing(reservation_ids, &reservations) {
        txn.rollback().await.context("aborting rollback")?;
        return Err(QuotaProviderError::ReservationNotFound(missing));
    }
    reservations.sort_by(|a, b| a.resource.cmp(&b.resource));

    for reservation in &reservations {
        if reservation.delta <= 0 {
            continue;
        }
        let usage = lock_usage(&txn, reservation.usage_id).await?;
        DbQuotaUsage::update_many()
            .col_expr(
                db_usage::Column::Reserved,
                Expr::col(db_usage::Column::Reserved).sub(reservation.delta),
            )
            .filter(db_usage::Column::Id.eq(usage.id))
            .exec(&txn)
            .await
            .context("releasing reserved amount")?;
    }

    DbReservation::delete_many()
        .filter(db_reservation::Column::Uuid.is_in(reservation_ids.iter().map(String::as_str)))
        .exec(&txn)
        .await
        .context("removing rolled back reservations")?;

    txn.commit()
        .await
        .context("committing reservation rollback")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_rollback() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_reservation_mock(1, "res_uuid", 1, "port", 2)]])
            .append_query_results([vec![get_usage_mock(1, "project_uuid", "port", 8, 2)]])
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

        rollback(&db, "project_uuid", &["res_uuid".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rollback_gone_reservation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<db_reservation::Model>::new()])
            .into_connection();

        assert!(matches!(
            rollback(&db, "project_uuid", &["res_uuid".to_string()])
                .await
                .unwrap_err(),
            QuotaProviderError::ReservationNotFound(..)
        ));
    }
}
