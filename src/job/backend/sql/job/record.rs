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
use crate::error::DbContextExt;
use crate::job::error::JobProviderError;
use crate::job::types::{Job, JobStatus};

/// Record a new job.
///
/// The row is purely informational history: a fresh extra id keeps it out of
/// the way of the uniqueness the running rows rely on, so recording is
/// always possible.
pub async fn record<'a>(
    db: &DatabaseConnection,
    job_type: &'a str,
    resource_id: &'a str,
    project_id: Option<&'a str>,
) -> Result<Job, JobProviderError> {
    db_job::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        r#type: Set(job_type.to_string()),
        timestamp: Set(Utc::now().naive_utc()),
        status: Set(JobStatus::New.to_string()),
        resource_id: Set(resource_id.to_string()),
        extra_id: Set(Uuid::new_v4().to_string()),
        project_id: Set(project_id.map(Into::into)),
    }
    .insert(db)
    .await
    .context("recording job")?
    .try_into()
}
