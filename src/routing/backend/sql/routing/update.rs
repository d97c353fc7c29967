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

use chrono::Utc;
use sea_orm::DatabaseConnection;
use sea_orm::entity::*;
use sea_orm::query::*;
use sea_orm::sea_query::Expr;

use crate::common::types::ResourceKind;
use crate::db::entity::{prelude::ResourceRouting as DbRouting, resource_routing as db_routing};
use crate::error::DbContextExt;
use crate::routing::error::RoutingProviderError;

/// Fill the physical id of a reserved slot.
///
/// Only a row with no bottom id is updated. A false result means the slot
/// was already filled by another caller (or the row does not exist), so the
/// caller must re-read the winning mapping.
pub async fn update_physical<T: AsRef<str>, P: AsRef<str>, B: AsRef<str>>(
    db: &DatabaseConnection,
    top_id: T,
    pod_id: P,
    resource_type: ResourceKind,
    bottom_id: B,
) -> Result<bool, RoutingProviderError> {
    let res = DbRouting::update_many()
        .col_expr(
            db_routing::Column::BottomId,
            Expr::value(bottom_id.as_ref()),
        )
        .col_expr(
            db_routing::Column::UpdatedAt,
            Expr::value(Utc::now().naive_utc()),
        )
        .filter(db_routing::Column::TopId.eq(top_id.as_ref()))
        .filter(db_routing::Column::PodId.eq(pod_id.as_ref()))
        .filter(db_routing::Column::ResourceType.eq(resource_type.as_str()))
        .filter(db_routing::Column::BottomId.is_null())
        .exec(db)
        .await
        .context("materializing routing entry")?;
    Ok(res.rows_affected > 0)
}

/// Null out the physical id, keeping the logical association.
///
/// Marks the mapping for re-provisioning without losing the knowledge that
/// the logical resource is expected in the pod.
pub async fn clear_physical<T: AsRef<str>, P: AsRef<str>>(
    db: &DatabaseConnection,
    top_id: T,
    pod_id: P,
    resource_type: ResourceKind,
) -> Result<bool, RoutingProviderError> {
    let res = DbRouting::update_many()
        .col_expr(db_routing::Column::BottomId, Expr::value(None::<String>))
        .col_expr(
            db_routing::Column::UpdatedAt,
            Expr::value(Utc::now().naive_utc()),
        )
        .filter(db_routing::Column::TopId.eq(top_id.as_ref()))
        .filter(db_routing::Column::PodId.eq(pod_id.as_ref()))
        .filter(db_routing::Column::ResourceType.eq(resource_type.as_str()))
        .exec(db)
        .await
        .context("expiring routing entry")?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[tokio::test]
    async fn test_update_physical_fills_vacant_slot() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 1,
                ..Default::default()
            }])
            .into_connection();
        assert!(
            update_physical(&db, "net-top", "pod-1", ResourceKind::Network, "net-bottom")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_physical_lost_race() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 0,
                ..Default::default()
            }])
            .into_connection();
        assert!(
            !update_physical(&db, "net-top", "pod-1", ResourceKind::Network, "net-bottom")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_clear_physical() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 1,
                ..Default::default()
            }])
            .into_connection();
        assert!(
            clear_physical(&db, "net-top", "pod-1", ResourceKind::Network)
                .await
                .unwrap()
        );
    }
}
