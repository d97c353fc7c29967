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

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::cascade::ServiceState;
use crate::job::backend::JobBackend;
use crate::job::error::JobProviderError;
use crate::job::types::{Job, JobListParameters};

pub(crate) mod job;

#[derive(Clone, Debug, Default)]
pub struct SqlBackend {}

#[async_trait]
impl JobBackend for SqlBackend {
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn record<'a>(
        &self,
        state: &ServiceState,
        job_type: &'a str,
        resource_id: &'a str,
        project_id: Option<&'a str>,
    ) -> Result<Job, JobProviderError> {
        job::record(&state.db, job_type, resource_id, project_id).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn acquire<'a>(
        &self,
        state: &ServiceState,
        job_type: &'a str,
        resource_id: &'a str,
        project_id: Option<&'a str>,
    ) -> Result<Option<Job>, JobProviderError> {
        job::acquire(&state.db, job_type, resource_id, project_id).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn complete<'a>(
        &self,
        state: &ServiceState,
        job_id: &'a str,
        succeeded: bool,
        timestamp: DateTime<Utc>,
    ) -> Result<Job, JobProviderError> {
        job::complete(&state.db, job_id, succeeded, timestamp).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn latest_failures(&self, state: &ServiceState) -> Result<Vec<Job>, JobProviderError> {
        job::latest_failures(&state.db).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list(
        &self,
        state: &ServiceState,
        params: &JobListParameters,
    ) -> Result<Vec<Job>, JobProviderError> {
        job::list(&state.db, params).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get<'a>(
        &self,
        state: &ServiceState,
        job_id: &'a str,
    ) -> Result<Option<Job>, JobProviderError> {
        job::get(&state.db, job_id).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn purge_completed(
        &self,
        state: &ServiceState,
        before: DateTime<Utc>,
    ) -> Result<u64, JobProviderError> {
        job::purge_completed(&state.db, before).await
    }
}
