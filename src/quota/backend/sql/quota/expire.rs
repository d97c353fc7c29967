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

use chrono::{DateTime, Utc};
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

/// Roll back every reservation past its expiry.
///
/// The background counterpart of an operation that crashed between reserve
/// and commit/rollback: its held amounts are returned to the pool.
pub async fn sweep_expired(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<u64, QuotaProviderError> {
    let txn = db.begin().await.context("starting expiration sweep")?;

    let mut expired = DbReservation::find()
        .filter(db_reservation::Column::Expire.lte(now.naive_utc()))
        .all(&txn)
        .await
        .context("listing expired reservations")?;
    if expired.is_empty() {
        txn.commit().await.context("committing empty sweep")?;
        return Ok(0);
    }
    expired.sort_by(|a, b| a.resource.cmp(&b.resource));

    for reservation in &expired {
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
            .context("releasing expired reservation amount")?;
    }

    let removed = DbReservation::delete_many()
        .filter(
            db_reservation::Column::Id.is_in(expired.iter().map(|reservation| reservation.id)),
        )
        .exec(&txn)
        .await
        .context("removing expired reservations")?;

    txn.commit().await.context("committing expiration sweep")?;
    Ok(removed.rows_affected)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_sweep_none_expired() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<db_reservation::Model>::new()])
            .into_connection();
        assert_eq!(sweep_expired(&db, Utc::now()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sweep_expired() {
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
        assert_eq!(sweep_expired(&db, Utc::now()).await.unwrap(), 1);
    }
}
