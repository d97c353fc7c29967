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
use crate::job::error::JobProviderError;
use crate::job::types::job::*;

/// Job queue provider API.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Record a new job for audit purposes.
    async fn record<'a>(
        &self,
        state: &ServiceState,
        job_type: &'a str,
        resource_id: &'a str,
        project_id: Option<&'a str>,
    ) -> Result<Job, JobProviderError>;

    /// Try to become the exclusive executor of the work.
    async fn acquire<'a>(
        &self,
        state: &ServiceState,
        job_type: &'a str,
        resource_id: &'a str,
        project_id: Option<&'a str>,
    ) -> Result<Option<Job>, JobProviderError>;

    /// Transition a running job to its terminal state.
    async fn complete<'a>(
        &self,
        state: &ServiceState,
        job_id: &'a str,
        succeeded: bool,
        timestamp: DateTime<Utc>,
    ) -> Result<Job, JobProviderError>;

    /// The retry feed: targets whose most recent job failed.
    async fn latest_failures(&self, state: &ServiceState) -> Result<Vec<Job>, JobProviderError>;

    /// List jobs.
    async fn list(
        &self,
        state: &ServiceState,
        params: &JobListParameters,
    ) -> Result<Vec<Job>, JobProviderError>;

    /// Get single job.
    async fn get<'a>(
        &self,
        state: &ServiceState,
        job_id: &'a str,
    ) -> Result<Option<Job>, JobProviderError>;

    /// Delete terminal job rows older than the cutoff.
    async fn purge_completed(
        &self,
        state: &ServiceState,
        before: DateTime<Utc>,
    ) -> Result<u64, JobProviderError>;
}
