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
use sea_orm::DatabaseConnection;
use sea_orm::entity::*;
use sea_orm::query::*;
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use crate::db::entity::{async_job as db_job, prelude::AsyncJob as DbJob};
use crate::error::DbContextExt;
use crate::job::error::JobProviderError;
use crate::job::types::{Job, JobStatus};

/// Transition a running job to Success or Fail.
///
/// The update is conditional on the row still being in the running state, so
/// a second completion of the same job matches nothing and is rejected. The
/// extra id is rotated to a fresh UUID at the same time, freeing the
/// (type, resource_id) slot for a future acquisition.
pub async fn complete<'a>(
    db: &DatabaseConnection,
    job_id: &'a str,
    succeeded: bool,
    timestamp: DateTime<Utc>,
) -> Result<Job, JobProviderError> {
    let status = if succeeded {
        JobStatus::Success
    } else {
        JobStatus::Fail
    };
    let res = DbJob::update_many()
        .col_expr(db_job::Column::Status, Expr::value(status.as_str()))
        .col_expr(
            db_job::Column::ExtraId,
            Expr::value(Uuid::new_v4().to_string()),
        )
        .col_expr(
            db_job::Column::Timestamp,
            Expr::value(timestamp.naive_utc()),
        )
        .filter(db_job::Column::Id.eq(job_id))
        .filter(db_job::Column::Status.eq(JobStatus::Running.as_str()))
        .exec(db)
        .await
        .context("completing job")?;

    if res.rows_affected == 0 {
        return Err(JobProviderError::NotRunning(job_id.to_string()));
    }

    DbJob::find_by_id(job_id)
        .one(db)
        .await
        .context("reading back completed job")?
        .ok_or_else(|| JobProviderError::JobNotFound(job_id.to_string()))?
        .try_into()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_complete_failure() {
        let now = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 1,
                ..Default::default()
            }])
            .append_query_results([vec![get_job_mock(
                "job_uuid",
                "router_setup",
                "region-1#router-9",
                "fail",
                now.naive_utc(),
            )]])
            .into_connection();
        let job = complete(&db, "job_uuid", false, now).await.unwrap();
        assert_eq!(job.status, JobStatus::Fail);
        assert_ne!(job.extra_id, crate::job::types::RUNNING_EXTRA_ID);
    }

    #[tokio::test]
    async fn test_complete_is_single_shot() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 0,
                ..Default::default()
            }])
            .into_connection();
        assert!(matches!(
            complete(&db, "job_uuid", true, Utc::now()).await.unwrap_err(),
            JobProviderError::NotRunning(..)
        ));
    }
}
