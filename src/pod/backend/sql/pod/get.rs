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
use crate::pod::types::Pod;

/// Get the pod by ID.
pub async fn get<P: AsRef<str>>(
    db: &DatabaseConnection,
    pod_id: P,
) -> Result<Option<Pod>, PodProviderError> {
    Ok(DbPod::find_by_id(pod_id.as_ref())
        .one(db)
        .await
        .context("searching pod")?
        .map(Into::into))
}

/// Get the central pod.
///
/// The central pod is the single pod with an empty availability zone name.
pub async fn central(db: &DatabaseConnection) -> Result<Option<Pod>, PodProviderError> {
    Ok(DbPod::find()
        .filter(db_pod::Column::AzName.eq(""))
        .one(db)
        .await
        .context("searching the central pod")?
        .map(Into::into))
}

/// Get the bottom pod following the given one in the id order.
pub async fn next_after<'a>(
    db: &DatabaseConnection,
    current_pod_id: Option<&'a str>,
) -> Result<Option<Pod>, PodProviderError> {
    let mut select = DbPod::find().filter(db_pod::Column::AzName.ne(""));
    if let Some(current) = current_pod_id {
        select = select.filter(db_pod::Column::Id.gt(current));
    }
    Ok(select
        .order_by_asc(db_pod::Column::Id)
        .one(db)
        .await
        .context("searching the next pod")?
        .map(Into::into))
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_get() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_pod_mock("p1", "RegionOne", "az1")]])
            .into_connection();
        let pod = get(&db, "p1").await.unwrap().expect("pod was not found");
        assert_eq!(pod.id, "p1");

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "pod"."id", "pod"."region_name", "pod"."az_name", "pod"."pod_az_name" FROM "pod" WHERE "pod"."id" = $1 LIMIT $2"#,
                ["p1".into(), 1u64.into()]
            ),]
        );
    }

    #[tokio::test]
    async fn test_central() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_pod_mock("p0", "CentralRegion", "")]])
            .into_connection();
        let pod = central(&db).await.unwrap().expect("pod was not found");
        assert!(pod.is_central());
    }

    #[tokio::test]
    async fn test_next_after_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_pod_mock("p1", "RegionOne", "az1")]])
            .into_connection();
        let pod = next_after(&db, None).await.unwrap().expect("pod expected");
        assert_eq!(pod.id, "p1");
    }

    #[tokio::test]
    async fn test_next_after_exhausted() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<crate::db::entity::pod::Model>::new()])
            .into_connection();
        assert!(next_after(&db, Some("p9")).await.unwrap().is_none());
    }
}
