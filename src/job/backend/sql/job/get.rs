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

use crate::db::entity::prelude::AsyncJob as DbJob;
use crate::error::DbContextExt;
use crate::job::error::JobProviderError;
use crate::job::types::Job;

/// Get the job by ID.
pub async fn get<J: AsRef<str>>(
    db: &DatabaseConnection,
    job_id: J,
) -> Result<Option<Job>, JobProviderError> {
    DbJob::find_by_id(job_id.as_ref())
        .one(db)
        .await
        .context("searching job")?
        .map(TryInto::try_into)
        .transpose()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::tests::*;
    use super::*;
    use crate::job::types::JobStatus;

    #[tokio::test]
    async fn test_get() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_job_mock(
                "job_uuid",
                "router_setup",
                "region-1#router-9",
                "running",
                Utc::now().naive_utc(),
            )]])
            .into_connection();
        let job = get(&db, "job_uuid")
            .await
            .unwrap()
            .expect("job was not found");
        assert_eq!(job.status, JobStatus::Running);
    }
}
