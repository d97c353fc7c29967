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

use crate::db::entity::{async_job as db_job, prelude::AsyncJob as DbJob};
use crate::error::DbContextExt;
use crate::job::error::JobProviderError;
use crate::job::types::{Job, JobListParameters};

/// List jobs, newest first.
pub async fn list(
    db: &DatabaseConnection,
    params: &JobListParameters,
) -> Result<Vec<Job>, JobProviderError> {
    let mut select = DbJob::find();

    if let Some(val) = &params.r#type {
        select = select.filter(db_job::Column::Type.eq(val));
    }
    if let Some(val) = &params.status {
        select = select.filter(db_job::Column::Status.eq(val.as_str()));
    }
    if let Some(val) = &params.resource_id {
        select = select.filter(db_job::Column::ResourceId.eq(val));
    }
    if let Some(val) = &params.project_id {
        select = select.filter(db_job::Column::ProjectId.eq(val));
    }

    select
        .order_by_desc(db_job::Column::Timestamp)
        .all(db)
        .await
        .context("listing jobs")?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::tests::*;
    use super::*;
    use crate::job::types::JobStatus;

    #[tokio::test]
    async fn test_list_by_status() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_job_mock(
                "job_uuid",
                "router_setup",
                "region-1#router-9",
                "fail",
                Utc::now().naive_utc(),
            )]])
            .into_connection();
        let jobs = list(
            &db,
            &JobListParameters {
                status: Some(JobStatus::Fail),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].status, JobStatus::Fail);
    }
}
