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
//! # Resource routing provider
//!
//! The routing table records which logical ("top") resource corresponds to
//! which physical ("bottom") resource in which pod. The unique constraint on
//! (top_id, pod_id, resource_type) is the only synchronization primitive:
//! concurrent writers race to insert and exactly one wins, the rest observe
//! a conflict and re-read the winning row. Reads never block writers.
//!
//! A routing entry with no bottom id is a reserved slot: the logical
//! association is known but the physical resource is not materialized yet,
//! or was intentionally expired ahead of re-provisioning.
use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::cascade::ServiceState;
use crate::common::types::ResourceKind;
use crate::config::Config;
use crate::plugin_manager::PluginManager;
use crate::routing::backend::{RoutingBackend, sql::SqlBackend};
use crate::routing::error::RoutingProviderError;
use crate::routing::types::{Routing, RoutingCreate, RoutingListParameters};

#[cfg(test)]
pub use mock::MockRoutingProvider;
pub use types::RoutingApi;

#[derive(Clone)]
pub struct RoutingProvider {
    backend_driver: Arc<dyn RoutingBackend>,
}

impl RoutingProvider {
    pub fn new(
        config: &Config,
        plugin_manager: &PluginManager,
    ) -> Result<Self, RoutingProviderError> {
        let backend_driver = if let Some(driver) =
            plugin_manager.get_routing_backend(config.routing.driver.clone())
        {
            driver.clone()
        } else {
            match config.routing.driver.as_str() {
                "sql" => Arc::new(SqlBackend::default()),
                _ => {
                    return Err(RoutingProviderError::UnsupportedDriver(
                        config.routing.driver.clone(),
                    ));
                }
            }
        };
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl RoutingApi for RoutingProvider {
    /// Record a mapping.
    ///
    /// A conflict means another caller already owns the triple; it is
    /// surfaced as [`RoutingProviderError::Conflict`] and is not fatal.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn put(
        &self,
        state: &ServiceState,
        params: RoutingCreate,
    ) -> Result<Routing, RoutingProviderError> {
        params.validate()?;
        self.backend_driver.put(state, params).await
    }

    /// Get single routing entry by ID.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get(
        &self,
        state: &ServiceState,
        routing_id: i64,
    ) -> Result<Option<Routing>, RoutingProviderError> {
        self.backend_driver.get(state, routing_id).await
    }

    /// List all mappings of the logical resource across pods.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn lookup<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<Vec<Routing>, RoutingProviderError> {
        self.backend_driver.lookup(state, top_id, resource_type).await
    }

    /// Get the mapping of the logical resource within one pod.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn lookup_in_pod<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<Option<Routing>, RoutingProviderError> {
        self.backend_driver
            .lookup_in_pod(state, top_id, pod_id, resource_type)
            .await
    }

    /// List routing entries.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list(
        &self,
        state: &ServiceState,
        params: &RoutingListParameters,
    ) -> Result<Vec<Routing>, RoutingProviderError> {
        self.backend_driver.list(state, params).await
    }

    /// Fill the physical id of a reserved slot.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn update_physical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
        bottom_id: &'a str,
    ) -> Result<bool, RoutingProviderError> {
        self.backend_driver
            .update_physical(state, top_id, pod_id, resource_type, bottom_id)
            .await
    }

    /// Null out the physical id, keeping the logical association.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn clear_physical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<bool, RoutingProviderError> {
        self.backend_driver
            .clear_physical(state, top_id, pod_id, resource_type)
            .await
    }

    /// Delete single routing entry by ID.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete(&self, state: &ServiceState, routing_id: i64) -> Result<(), RoutingProviderError> {
        self.backend_driver.delete(state, routing_id).await
    }

    /// Delete every mapping of the logical resource.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_by_logical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
    ) -> Result<u64, RoutingProviderError> {
        self.backend_driver.delete_by_logical(state, top_id).await
    }

    /// Delete every mapping pointing at the physical resource.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_by_physical<'a>(
        &self,
        state: &ServiceState,
        bottom_id: &'a str,
    ) -> Result<u64, RoutingProviderError> {
        self.backend_driver.delete_by_physical(state, bottom_id).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;

    use super::backend::MockRoutingBackend;
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
    async fn test_put_conflict_is_not_fatal() {
        let state = get_state_mock();
        let mut backend = MockRoutingBackend::default();
        backend
            .expect_put()
            .returning(|_, _| Err(RoutingProviderError::Conflict("duplicate mapping".into())));
        let provider = RoutingProvider {
            backend_driver: Arc::new(backend),
        };

        let err = provider
            .put(
                &state,
                types::RoutingCreate {
                    top_id: "net-top".into(),
                    bottom_id: Some("net-bottom".into()),
                    pod_id: "pod-1".into(),
                    project_id: "project_uuid".into(),
                    resource_type: ResourceKind::Network,
                },
            )
            .await
            .unwrap_err();
        // The conflict is distinguishable so callers can absorb the race.
        assert!(err.is_conflict());
    }
}
