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
//! # Pod registry provider
//!
//! A pod is one region participating in the deployment. The pod whose
//! availability zone name is empty is the central (top) region hosting the
//! logical view; every other pod is a physical (bottom) region hosting the
//! actual workload resources. Pods are created at deployment time and are
//! read-mostly afterwards.
use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::cascade::ServiceState;
use crate::config::Config;
use crate::plugin_manager::PluginManager;
use crate::pod::backend::{PodBackend, sql::SqlBackend};
use crate::pod::error::PodProviderError;
use crate::pod::types::{Pod, PodCreate, PodListParameters};

#[cfg(test)]
pub use mock::MockPodProvider;
pub use types::PodApi;

#[derive(Clone)]
pub struct PodProvider {
    backend_driver: Arc<dyn PodBackend>,
}

impl PodProvider {
    pub fn new(config: &Config, plugin_manager: &PluginManager) -> Result<Self, PodProviderError> {
        let backend_driver =
            if let Some(driver) = plugin_manager.get_pod_backend(config.pod.driver.clone()) {
                driver.clone()
            } else {
                match config.pod.driver.as_str() {
                    "sql" => Arc::new(SqlBackend::default()),
                    _ => {
                        return Err(PodProviderError::UnsupportedDriver(
                            config.pod.driver.clone(),
                        ));
                    }
                }
            };
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl PodApi for PodProvider {
    /// Register a new pod.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn create_pod(
        &self,
        state: &ServiceState,
        params: PodCreate,
    ) -> Result<Pod, PodProviderError> {
        params.validate()?;
        self.backend_driver.create_pod(state, params).await
    }

    /// Get single pod.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_pod<'a>(
        &self,
        state: &ServiceState,
        pod_id: &'a str,
    ) -> Result<Option<Pod>, PodProviderError> {
        self.backend_driver.get_pod(state, pod_id).await
    }

    /// List pods.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_pods(
        &self,
        state: &ServiceState,
        params: &PodListParameters,
    ) -> Result<Vec<Pod>, PodProviderError> {
        self.backend_driver.list_pods(state, params).await
    }

    /// Get the central (top) pod.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn central_pod(&self, state: &ServiceState) -> Result<Option<Pod>, PodProviderError> {
        self.backend_driver.central_pod(state).await
    }

    /// Get the bottom pod following the given one in the id order.
    ///
    /// With no current pod the first bottom pod is returned. The helper is
    /// used to round-robin through physical regions when a merged listing is
    /// paged region by region.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn next_pod_after<'a>(
        &self,
        state: &ServiceState,
        current_pod_id: Option<&'a str>,
    ) -> Result<Option<Pod>, PodProviderError> {
        self.backend_driver
            .next_pod_after(state, current_pod_id)
            .await
    }

    /// Delete a pod.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_pod<'a>(
        &self,
        state: &ServiceState,
        pod_id: &'a str,
    ) -> Result<(), PodProviderError> {
        self.backend_driver.delete_pod(state, pod_id).await
    }
}
