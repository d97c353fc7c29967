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
//! # Job queue provider
//!
//! A job is a durable work request to converge one region's state with the
//! logical state. Two submission primitives exist: [`JobApi::record`] always
//! inserts an informational New row, while [`JobApi::acquire`] attempts to
//! insert a Running row carrying the well-known extra id: the insert either
//! makes the caller the exclusive executor or fails on the unique constraint
//! because the same work is already in flight. There is no queue polling and
//! no in-process locking; the constraint is the whole mechanism.
//!
//! An executor that crashes before completing leaves its Running row behind.
//! Reclaiming such a row is an operator action; the engine itself never
//! resurrects or preempts a job.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::cascade::ServiceState;
use crate::config::Config;
use crate::job::backend::{JobBackend, sql::SqlBackend};
use crate::job::error::JobProviderError;
use crate::job::types::{Job, JobListParameters};
use crate::plugin_manager::PluginManager;

#[cfg(test)]
pub use mock::MockJobProvider;
pub use types::JobApi;

#[derive(Clone)]
pub struct JobProvider {
    backend_driver: Arc<dyn JobBackend>,
}

impl JobProvider {
    pub fn new(config: &Config, plugin_manager: &PluginManager) -> Result<Self, JobProviderError> {
        let backend_driver =
            if let Some(driver) = plugin_manager.get_job_backend(config.job.driver.clone()) {
                driver.clone()
            } else {
                match config.job.driver.as_str() {
                    "sql" => Arc::new(SqlBackend::default()),
                    _ => {
                        return Err(JobProviderError::UnsupportedDriver(
                            config.job.driver.clone(),
                        ));
                    }
                }
            };
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl JobApi for JobProvider {
    /// Record a new job for audit purposes.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn record<'a>(
        &self,
        state: &ServiceState,
        job_type: &'a str,
        resource_id: &'a str,
        project_id: Option<&'a str>,
    ) -> Result<Job, JobProviderError> {
        self.backend_driver
            .record(state, job_type, resource_id, project_id)
            .await
    }

    /// Try to become the exclusive executor of the work.
    ///
    /// A `None` result means a job for this exact kind and target is already
    /// in flight and the caller must not start a second one.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn acquire<'a>(
        &self,
        state: &ServiceState,
        job_type: &'a str,
        resource_id: &'a str,
        project_id: Option<&'a str>,
    ) -> Result<Option<Job>, JobProviderError> {
        self.backend_driver
            .acquire(state, job_type, resource_id, project_id)
            .await
    }

    /// Transition a running job to its terminal state.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn complete<'a>(
        &self,
        state: &ServiceState,
        job_id: &'a str,
        succeeded: bool,
        timestamp: DateTime<Utc>,
    ) -> Result<Job, JobProviderError> {
        self.backend_driver
            .complete(state, job_id, succeeded, timestamp)
            .await
    }

    /// The retry feed: targets whose most recent job failed.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn latest_failures(&self, state: &ServiceState) -> Result<Vec<Job>, JobProviderError> {
        self.backend_driver.latest_failures(state).await
    }

    /// List jobs.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list(
        &self,
        state: &ServiceState,
        params: &JobListParameters,
    ) -> Result<Vec<Job>, JobProviderError> {
        self.backend_driver.list(state, params).await
    }

    /// Get single job.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get<'a>(
        &self,
        state: &ServiceState,
        job_id: &'a str,
    ) -> Result<Option<Job>, JobProviderError> {
        self.backend_driver.get(state, job_id).await
    }

    /// Delete terminal job rows older than the cutoff.
    ///
    /// Running rows are never purged.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn purge_completed(
        &self,
        state: &ServiceState,
        before: DateTime<Utc>,
    ) -> Result<u64, JobProviderError> {
        self.backend_driver.purge_completed(state, before).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;

    use super::backend::MockJobBackend;
    use super::*;
    use crate::cascade::Service;
    use crate::client::ClientRegistry;
    use crate::provider::Provider;

    fn get_state_mock() -> ServiceState {
        Arc::new(
            Service::new(
                Config::default(),
                DatabaseConnection::Disconnected,
                Provider::mocked_builder().build().unwrap(),
                ClientRegistry::open(),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_acquire_not_acquired() {
        let state = get_state_mock();
        let mut backend = MockJobBackend::default();
        backend
            .expect_acquire()
            .returning(|_, job_type, resource_id, _| {
                assert_eq!(job_type, "router_setup");
                assert_eq!(resource_id, "region-1#router-9");
                Ok(None)
            });
        let provider = JobProvider {
            backend_driver: Arc::new(backend),
        };

        // The work is already in flight somewhere else.
        assert!(
            provider
                .acquire(&state, "router_setup", "region-1#router-9", None)
                .await
                .unwrap()
                .is_none()
        );
    }
}
