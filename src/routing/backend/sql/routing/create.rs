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

use crate::db::entity::resource_routing as db_routing;
use crate::error::DbContextExt;
use crate::routing::error::RoutingProviderError;
use crate::routing::types::{Routing, RoutingCreate};

/// Record a mapping.
///
/// The insert is guarded by the uniqueness of (top_id, pod_id,
/// resource_type); a violation surfaces as a conflict which the caller
/// interprets as "another caller already owns this mapping".
pub async fn create(
    db: &DatabaseConnection,
    routing: RoutingCreate,
) -> Result<Routing, RoutingProviderError> {
    let now = Utc::now().naive_utc();
    db_routing::ActiveModel {
        id: NotSet,
        top_id: Set(routing.top_id),
        bottom_id: Set(routing.bottom_id),
        pod_id: Set(routing.pod_id),
        project_id: Set(routing.project_id),
        resource_type: Set(routing.resource_type.to_string()),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    }
    .insert(db)
    .await
    .context("persisting resource routing")?
    .try_into()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::tests::*;
    use super::*;
    use crate::common::types::ResourceKind;

    #[tokio::test]
    async fn test_create() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_routing_mock(
                1,
                "net-top",
                "pod-1",
                Some("net-bottom".into()),
            )]])
            .into_connection();
        let routing = create(
            &db,
            RoutingCreate {
                top_id: "net-top".into(),
                bottom_id: Some("net-bottom".into()),
                pod_id: "pod-1".into(),
                project_id: "project_uuid".into(),
                resource_type: ResourceKind::Network,
            },
        )
        .await
        .unwrap();
        assert_eq!(routing.id, 1);
        assert_eq!(routing.bottom_id.as_deref(), Some("net-bottom"));
        assert_eq!(routing.resource_type, ResourceKind::Network);
    }
}
