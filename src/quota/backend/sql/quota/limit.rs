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
use sea_orm::sea_query::Expr;

use crate::db::entity::{prelude::Quota as DbQuota, quota as db_quota};
use crate::error::{DatabaseError, DbContextExt};
use crate::quota::error::QuotaProviderError;
use crate::quota::types::QuotaLimit;

/// List the hard limits of a project.
pub async fn get_limits<'a>(
    db: &DatabaseConnection,
    project_id: &'a str,
) -> Result<Vec<QuotaLimit>, QuotaProviderError> {
    Ok(DbQuota::find()
        .filter(db_quota::Column::ProjectId.eq(project_id))
        .order_by_asc(db_quota::Column::Resource)
        .all(db)
        .await
        .context("listing quota limits")?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Create or replace a hard limit.
///
/// The insert races with concurrent writers on the (project, resource)
/// uniqueness; the loser falls back to updating the existing row.
pub async fn set_limit<'a>(
    db: &DatabaseConnection,
    project_id: &'a str,
    resource: &'a str,
    hard_limit: i64,
) -> Result<QuotaLimit, QuotaProviderError> {
    let insert = db_quota::ActiveModel {
        id: NotSet,
        project_id: Set(project_id.to_string()),
        resource: Set(resource.to_string()),
        hard_limit: Set(hard_limit),
    }
    .insert(db)
    .await
    .context("persisting quota limit");

    match insert {
        Ok(model) => Ok(model.into()),
        Err(DatabaseError::Conflict { .. }) => {
            DbQuota::update_many()
                .col_expr(db_quota::Column::HardLimit, Expr::value(hard_limit))
                .filter(db_quota::Column::ProjectId.eq(project_id))
                .filter(db_quota::Column::Resource.eq(resource))
                .exec(db)
                .await
                .context("updating quota limit")?;
            Ok(QuotaLimit {
                project_id: project_id.to_string(),
                resource: resource.to_string(),
                hard_limit,
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Delete a hard limit.
pub async fn delete_limit<'a>(
    db: &DatabaseConnection,
    project_id: &'a str,
    resource: &'a str,
) -> Result<(), QuotaProviderError> {
    let res = DbQuota::delete_many()
        .filter(db_quota::Column::ProjectId.eq(project_id))
        .filter(db_quota::Column::Resource.eq(resource))
        .exec(db)
        .await
        .context("removing quota limit")?;
    if res.rows_affected == 1 {
        Ok(())
    } else {
        Err(QuotaProviderError::LimitNotFound {
            project_id: project_id.to_string(),
            resource: resource.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_get_limits() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                get_limit_mock(1, "project_uuid", "network", 10),
                get_limit_mock(2, "project_uuid", "port", 50),
            ]])
            .into_connection();
        let limits = get_limits(&db, "project_uuid").await.unwrap();
        assert_eq!(limits.len(), 2);
        assert_eq!(limits[1].hard_limit, 50);
    }

    #[tokio::test]
    async fn test_set_limit() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_limit_mock(1, "project_uuid", "port", 50)]])
            .into_connection();
        let limit = set_limit(&db, "project_uuid", "port", 50).await.unwrap();
        assert_eq!(
            limit,
            QuotaLimit {
                project_id: "project_uuid".into(),
                resource: "port".into(),
                hard_limit: 50
            }
        );
    }

    #[tokio::test]
    async fn test_delete_limit_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 0,
                ..Default::default()
            }])
            .into_connection();
        assert!(matches!(
            delete_limit(&db, "project_uuid", "port").await.unwrap_err(),
            QuotaProviderError::LimitNotFound { .. }
        ));
    }
}
