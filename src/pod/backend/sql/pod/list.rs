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

use crate::db::entity::{pod as db_pod, prelude::Pod as DbPod};
use crate::error::DbContextExt;
use crate::pod::error::PodProviderError;
use crate::pod::types::{Pod, PodListParameters};

/// List pods sorted by ID.
pub async fn list(
    db: &DatabaseConnection,
    params: &PodListParameters,
) -> Result<Vec<Pod>, PodProviderError> {
    let mut select = DbPod::find();

    if let Some(val) = &params.az_name {
        select = select.filter(db_pod::Column::AzName.eq(val));
    }
    if let Some(val) = &params.region_name {
        select = select.filter(db_pod::Column::RegionName.eq(val));
    }

    Ok(select
        .order_by_asc(db_pod::Column::Id)
        .all(db)
        .await
        .context("listing pods")?
        .into_iter()
        .map(Into::into)
        .collect())
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_list() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                get_pod_mock("p1", "RegionOne", "az1"),
                get_pod_mock("p2", "RegionTwo", "az1"),
            ]])
            .into_connection();
        let pods = list(
            &db,
            &PodListParameters {
                az_name: Some("az1".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(
            pods.iter().map(|pod| pod.id.as_str()).collect::<Vec<_>>(),
            vec!["p1", "p2"]
        );
    }
}
