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
use uuid::Uuid;

use crate::db::entity::async_job as db_job;
use crate::error::{DatabaseError, DbContextExt};
use crate::job::error::JobProviderError;
use crate::job::types::{Job, JobStatus, RUNNING_EXTRA_ID};

/// Try to insert the running row for the work.
///
/// The row carries the well-known extra id, so the unique constraint on
/// (type, status, resource_id, extra_id) admits at most one running job per
/// kind and target. `None` means the work is already in flight.
pub async fn acquire<'a>(
    db: &DatabaseConnection,
    job_type: &'a str,
    resource_id: &'a str,
    project_id: Option<&'a str>,
) -> Result<Option<Job>, JobProviderError> {
    let insert = db_job::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        r#type: Set(job_type.to_string()),
        timestamp: Set(Utc::now().naive_utc()),
        status: Set(JobStatus::Running.to_string()),
        resource_id: Set(resource_id.to_string()),
        extra_id: Set(RUNNING_EXTRA_ID.to_string()),
        project_id: Set(project_id.map(Into::into)),
    }
    .insert(db)
    .await
    .context("registering running job");

    match insert {
        Ok(model) => Ok(Some(model.try_into()?)),
        Err(err) if is_acquire_race(&err) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

// Collisions are the exclusivity mechanism, not errors: a duplicate key
// means the same work is already running, a lock conflict means another
// caller is registering it right now.
pub(crate) fn is_acquire_race(err: &DatabaseError) -> bool {
    matches!(
        err,
        DatabaseError::Conflict { .. } | DatabaseError::Deadlock { .. }
    )
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_acquire() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_job_mock(
                "job_uuid",
                "router_setup",
                "region-1#router-9",
                "running",
                Utc::now().naive_utc(),
            )]])
            .into_connection();
        let job = acquire(&db, "router_setup", "region-1#router-9", None)
            .await
            .unwrap()
            .expect("the slot was free");
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.extra_id, RUNNING_EXTRA_ID);
    }

    #[test]
    fn test_race_classification() {
        let source = || DbErr::Exec(RuntimeErr::Internal("duplicate key".into()));
        assert!(is_acquire_race(&DatabaseError::Conflict {
            context: "registering running job",
            source: source(),
        }));
        assert!(is_acquire_race(&DatabaseError::Deadlock {
            context: "registering running job",
            source: source(),
        }));
        assert!(!is_acquire_race(&DatabaseError::Other {
            context: "registering running job",
            source: source(),
        }));
    }
}
