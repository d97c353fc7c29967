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
use uuid::Uuid;

use crate::db::entity::pod as db_pod;
use crate::error::DbContextExt;
use crate::pod::error::PodProviderError;
use crate::pod::types::{Pod, PodCreate};

/// Register a new pod.
pub async fn create(db: &DatabaseConnection, pod: PodCreate) -> Result<Pod, PodProviderError> {
    Ok(Pod::from(
        db_pod::ActiveModel {
            id: Set(pod.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
            region_name: Set(pod.region_name),
            az_name: Set(pod.az_name),
            pod_az_name: Set(pod.pod_az_name),
        }
        .insert(db)
        .await
        .context("persisting pod")?,
    ))
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_create() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_pod_mock("p1", "RegionOne", "az1")]])
            .into_connection();
        let pod = create(
            &db,
            PodCreate {
                id: Some("p1".into()),
                region_name: "RegionOne".into(),
                az_name: "az1".into(),
                pod_az_name: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(pod.id, "p1");
        assert_eq!(pod.region_name, "RegionOne");
        assert_eq!(pod.az_name, "az1");
    }
}
