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
//! # Element provisioner
//!
//! The idempotent find-by-name-or-create protocol layered over the routing
//! store and the region clients:
//!
//! 1. An existing materialized mapping short-circuits everything.
//! 2. Otherwise the pod is asked to list resources carrying the element's
//!    deterministic name. A hit is adopted: a previous partial failure (the
//!    resource was created but the mapping write was lost) heals here.
//! 3. Otherwise the resource is created. A name conflict means another
//!    caller created it between steps 2 and 3; the protocol re-runs the
//!    listing and adopts instead of failing.
//! 4. The mapping is recorded. Losing the insert race means another
//!    caller's mapping won; the just-created resource pointer is discarded
//!    in favour of re-reading the winning row.
//!
//! At most one routing entry per (element, pod) is guaranteed by the store's
//! unique constraint. At most one physical resource is best effort only:
//! steps 2-4 cannot be atomic without a cross-service transaction, and a
//! caller crashing between 3 and 4 leaves an orphan until the next call
//! adopts it. Remote calls are never issued inside a database transaction.
use async_trait::async_trait;

pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::cascade::ServiceState;
use crate::client::error::ClientError;
use crate::common::types::{ResourceKind, shadow_port_name};
use crate::config::Config;
use crate::element::error::ElementProviderError;
use crate::element::types::Element;
use crate::pod::types::Pod;
use crate::routing::RoutingApi;
use crate::routing::types::RoutingCreate;

#[cfg(test)]
pub use mock::MockElementProvider;
pub use types::ElementApi;

#[derive(Clone, Debug, Default)]
pub struct ElementProvider {}

impl ElementProvider {
    pub fn new(_config: &Config) -> Result<Self, ElementProviderError> {
        Ok(Self {})
    }

    /// Record the physical id, yielding to a mapping that won the race.
    async fn adopt(
        &self,
        state: &ServiceState,
        element: &Element,
        pod: &Pod,
        reserved_slot: bool,
        bottom_id: String,
    ) -> Result<String, ElementProviderError> {
        let routing = state.provider.get_routing_provider();
        if reserved_slot {
            // The slot existed with no physical id; fill it in place.
            if routing
                .update_physical(
                    state,
                    &element.top_id,
                    &pod.id,
                    element.resource_type,
                    &bottom_id,
                )
                .await?
            {
                return Ok(bottom_id);
            }
        } else {
            match routing
                .put(
                    state,
                    RoutingCreate {
                        top_id: element.top_id.clone(),
                        bottom_id: Some(bottom_id.clone()),
                        pod_id: pod.id.clone(),
                        project_id: element.project_id.clone(),
                        resource_type: element.resource_type,
                    },
                )
                .await
            {
                Ok(_) => return Ok(bottom_id),
                Err(err) if err.is_conflict() => {}
                Err(err) => return Err(err.into()),
            }
        }

        // Another caller's mapping won; discard our pointer and re-read.
        routing
            .lookup_in_pod(state, &element.top_id, &pod.id, element.resource_type)
            .await?
            .and_then(|route| route.bottom_id)
            .ok_or_else(|| ElementProviderError::ProvisionIncomplete(element.name.clone()))
    }
}

#[async_trait]
impl ElementApi for ElementProvider {
    /// Return the physical id of the element in the pod, creating the
    /// physical resource only if it does not already exist anywhere
    /// reachable.
    #[tracing::instrument(level = "info", skip(self, state, element), fields(element = %element.name))]
    async fn get_or_create_element(
        &self,
        state: &ServiceState,
        element: &Element,
        pod: &Pod,
    ) -> Result<String, ElementProviderError> {
        let routing = state.provider.get_routing_provider();

        let existing = routing
            .lookup_in_pod(state, &element.top_id, &pod.id, element.resource_type)
            .await?;
        if let Some(route) = &existing
            && let Some(bottom_id) = &route.bottom_id
        {
            return Ok(bottom_id.clone());
        }
        let reserved_slot = existing.is_some();

        let client = state
            .clients
            .get(&pod.region_name)
            .ok_or_else(|| ElementProviderError::ClientNotFound(pod.region_name.clone()))?;

        // A resource carrying the deterministic name may already exist:
        // either a concurrent caller is ahead of us or a previous attempt
        // lost its mapping write. Adopt it instead of creating a twin.
        if let Some(found) = client
            .list(element.resource_type, Some(&element.name))
            .await?
            .into_iter()
            .next()
        {
            return self.adopt(state, element, pod, reserved_slot, found.id).await;
        }

        let created = match client
            .create(element.resource_type, element.body.clone())
            .await
        {
            Ok(resource) => resource,
            Err(ClientError::Conflict(_)) => client
                .list(element.resource_type, Some(&element.name))
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| ElementProviderError::ProvisionIncomplete(element.name.clone()))?,
            Err(err) => return Err(err.into()),
        };

        self.adopt(state, element, pod, reserved_slot, created.id)
            .await
    }

    /// Provision the shadow copy of a port in the pod.
    #[tracing::instrument(level = "info", skip(self, state, body))]
    async fn get_or_create_shadow_port<'a>(
        &self,
        state: &ServiceState,
        pod: &Pod,
        port_id: &'a str,
        project_id: &'a str,
        body: serde_json::Value,
    ) -> Result<String, ElementProviderError> {
        let element = Element {
            top_id: port_id.to_string(),
            name: shadow_port_name(port_id),
            resource_type: ResourceKind::ShadowPort,
            project_id: project_id.to_string(),
            body,
        };
        self.get_or_create_element(state, &element, pod).await
    }

    /// Tear the element down in the pod.
    ///
    /// An absent remote resource and an absent mapping are both idempotent
    /// success: the teardown may race with itself or follow a crash at any
    /// point of a previous teardown.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_element<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        resource_type: ResourceKind,
        pod: &Pod,
    ) -> Result<(), ElementProviderError> {
        let routing = state.provider.get_routing_provider();

        let Some(route) = routing
            .lookup_in_pod(state, top_id, &pod.id, resource_type)
            .await?
        else {
            return Ok(());
        };

        if let Some(bottom_id) = &route.bottom_id {
            let client = state
                .clients
                .get(&pod.region_name)
                .ok_or_else(|| ElementProviderError::ClientNotFound(pod.region_name.clone()))?;
            client.delete(resource_type, bottom_id).await?;
        }

        match routing.delete(state, route.id).await {
            Ok(()) => Ok(()),
            // A concurrent teardown removed the row first.
            Err(crate::routing::error::RoutingProviderError::RoutingNotFound(..)) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
