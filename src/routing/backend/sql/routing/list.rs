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
use crate::routing::types::{Routing, RoutingListParameters};

/// List all mappings of the logical resource across pods.
pub async fn lookup<T: AsRef<str>>(
    db: &DatabaseConnection,
    top_id: T,
    resource_type: ResourceKind,
) -> Result<Vec<Routing>, RoutingProviderError> {
    DbRouting::find()
        .filter(db_routing::Column::TopId.eq(top_id.as_ref()))
        .filter(db_routing::Column::ResourceType.eq(resource_type.as_str()))
        .order_by_asc(db_routing::Column::PodId)
        .all(db)
        .await
        .context("listing routing entries of the logical resource")?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

/// List routing entries.
pub async fn list(
    db: &DatabaseConnection,
    params: &RoutingListParameters,
) -> Result<Vec<Routing>, RoutingProviderError> {
    let mut select = DbRouting::find();

    if let Some(val) = &params.top_id {
        select = select.filter(db_routing::Column::TopId.eq(val));
    }
    if let Some(val) = &params.bottom_id {
        select = select.filter(db_routing::Column::BottomId.eq(val));
    }
    if let Some(val) = &params.pod_id {
        select = select.filter(db_routing::Column::PodId.eq(val));
    }
    if let Some(val) = &params.project_id {
        select = select.filter(db_routing::Column::ProjectId.eq(val));
    }
    if let Some(val) = &params.resource_type {
        select = select.filter(db_routing::Column::ResourceType.eq(val.as_str()));
    }

    select
        .order_by_asc(db_routing::Column::Id)
        .all(db)
        .await
        .context("listing routing entries")?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                get_routing_mock(1, "net-top", "pod-1", Some("b1".into())),
                get_routing_mock(2, "net-top", "pod-2", Some("b2".into())),
            ]])
            .into_connection();
        let routings = lookup(&db, "net-top", ResourceKind::Network).await.unwrap();
        assert_eq!(routings.len(), 2);
        assert_eq!(routings[0].pod_id, "pod-1");
        assert_eq!(routings[1].bottom_id.as_deref(), Some("b2"));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_routing_mock(1, "net-top", "pod-1", None)]])
            .into_connection();
        let routings = list(
            &db,
            &RoutingListParameters {
                pod_id: Some("pod-1".into()),
                resource_type: Some(ResourceKind::Network),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(routings.len(), 1);
    }
}
