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

use sea_orm::DatabaseConnection;
use sea_orm::entity::*;
use sea_orm::query::*;

use crate::common::types::ResourceKind;
use crate::db::entity::{prelude::ResourceRouting as DbRouting, resource_routing as db_routing};
use crate::error::DbContextExt;
use crate::routing::error::RoutingProviderError;
use crate::routing::types::Routing;

/// Get the routing entry by ID.
pub async fn get(
    db: &DatabaseConnection,
    routing_id: i64,
) -> Result<Option<Routing>, RoutingProviderError> {
    DbRouting::find_by_id(routing_id)
        .one(db)
        .await
        .context("searching routing entry")?
        .map(TryInto::try_into)
        .transpose()
}

/// Get the mapping of the logical resource within one pod.
pub async fn lookup_in_pod<T: AsRef<str>, P: AsRef<str>>(
    db: &DatabaseConnection,
    top_id: T,
    pod_id: P,
    resource_type: ResourceKind,
) -> Result<Option<Routing>, RoutingProviderError> {
    DbRouting::find()
        .filter(db_routing::Column::TopId.eq(top_id.as_ref()))
        .filter(db_routing::Column::PodId.eq(pod_id.as_ref()))
        .filter(db_routing::Column::ResourceType.eq(resource_type.as_str()))
        .one(db)
        .await
        .context("searching routing entry in pod")?
        .map(TryInto::try_into)
        .transpose()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_get() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_routing_mock(7, "net-top", "pod-1", None)]])
            .into_connection();
        let routing = get(&db, 7).await.unwrap().expect("entry was not found");
        assert_eq!(routing.id, 7);
        assert!(routing.bottom_id.is_none());
    }

    #[tokio::test]
    async fn test_lookup_in_pod() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_routing_mock(
                7,
                "net-top",
                "pod-1",
                Some("net-bottom".into()),
            )]])
            .into_connection();
        let routing = lookup_in_pod(&db, "net-top", "pod-1", ResourceKind::Network)
            .await
            .unwrap()
            .expect("entry was not found");
        assert_eq!(routing.bottom_id.as_deref(), Some("net-bottom"));

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "resource_routing"."id", "resource_routing"."top_id", "resource_routing"."bottom_id", "resource_routing"."pod_id", "resource_routing"."project_id", "resource_routing"."resource_type", "resource_routing"."created_at", "resource_routing"."updated_at" FROM "resource_routing" WHERE "resource_routing"."top_id" = $1 AND "resource_routing"."pod_id" = $2 AND "resource_routing"."resource_type" = $3 LIMIT $4"#,
                [
                    "net-top".into(),
                    "pod-1".into(),
                    "network".into(),
                    1u64.into()
                ]
            ),]
        );
    }

    #[tokio::test]
    async fn test_lookup_in_pod_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<crate::db::entity::resource_routing::Model>::new()])
            .into_connection();
        assert!(
            lookup_in_pod(&db, "net-top", "pod-1", ResourceKind::Network)
                .await
                .unwrap()
                .is_none()
        );
    }
}
