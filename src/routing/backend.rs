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

pub mod sql;

use async_trait::async_trait;

use crate::cascade::ServiceState;
use crate::common::types::ResourceKind;
use crate::routing::error::RoutingProviderError;
use crate::routing::types::{Routing, RoutingCreate, RoutingListParameters};

pub use sql::SqlBackend;

/// Resource routing driver interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    /// Record a mapping.
    async fn put(
        &self,
        state: &ServiceState,
        params: RoutingCreate,
    ) -> Result<Routing, RoutingProviderError>;

    /// Get single routing entry by ID.
    async fn get(
        &self,
        state: &ServiceState,
        routing_id: i64,
    ) -> Result<Option<Routing>, RoutingProviderError>;

    /// List all mappings of the logical resource across pods.
    async fn lookup<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<Vec<Routing>, RoutingProviderError>;

    /// Get the mapping of the logical resource within one pod.
    async fn lookup_in_pod<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<Option<Routing>, RoutingProviderError>;

    /// List routing entries.
    async fn list(
        &self,
        state: &ServiceState,
        params: &RoutingListParameters,
    ) -> Result<Vec<Routing>, RoutingProviderError>;

    /// Fill the physical id of a reserved slot.
    async fn update_physical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
        bottom_id: &'a str,
    ) -> Result<bool, RoutingProviderError>;

    /// Null out the physical id, keeping the logical association.
    async fn clear_physical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<bool, RoutingProviderError>;

    /// Delete single routing entry by ID.
    async fn delete(
        &self,
        state: &ServiceState,
        routing_id: i64,
    ) -> Result<(), RoutingProviderError>;

    /// Delete every mapping of the logical resource.
    async fn delete_by_logical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
    ) -> Result<u64, RoutingProviderError>;

    /// Delete every mapping pointing at the physical resource.
    async fn delete_by_physical<'a>(
        &self,
        state: &ServiceState,
        bottom_id: &'a str,
    ) -> Result<u64, RoutingProviderError>;
}
