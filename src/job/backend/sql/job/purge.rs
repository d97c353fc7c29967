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

use crate::db::entity::{async_job as db_job, prelude::AsyncJob as DbJob};
use crate::error::DbContextExt;
use crate::job::error::JobProviderError;
use crate::job::types::JobStatus;

/// Delete terminal job rows older than the cutoff.
///
/// Running rows are left alone: an executor may still be alive, and
/// reclaiming a crashed executor's row is an operator decision.
pub async fn purge_completed(
    db: &DatabaseConnection,
    before: DateTime<Utc>,
) -> Result<u64, JobProviderError> {
    let res = DbJob::delete_many()
        .filter(db_job::Column::Status.is_in([
            JobStatus::New.as_str(),
            JobStatus::Success.as_str(),
            JobStatus::Fail.as_str(),
        ]))
        .filter(db_job::Column::Timestamp.lt(before.naive_utc()))
        .exec(db)
        .await
        .context("purging terminal jobs")?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[tokio::test]
    async fn test_purge() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 3,
                ..Default::default()
            }])
            .into_connection();
        assert_eq!(purge_completed(&db, Utc::now()).await.unwrap(), 3);
    }
}
