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

use crate::cascade::ServiceState;
use crate::common::types::ResourceKind;
use crate::routing::backend::RoutingBackend;
use crate::routing::error::RoutingProviderError;
use crate::routing::types::{Routing, RoutingCreate, RoutingListParameters};

pub(crate) mod routing;

#[derive(Clone, Debug, Default)]
pub struct SqlBackend {}

#[async_trait]
impl RoutingBackend for SqlBackend {
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn put(
        &self,
        state: &ServiceState,
        params: RoutingCreate,
    ) -> Result<Routing, RoutingProviderError> {
        routing::create(&state.db, params).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get(
        &self,
        state: &ServiceState,
        routing_id: i64,
    ) -> Result<Option<Routing>, RoutingProviderError> {
        routing::get(&state.db, routing_id).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn lookup<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<Vec<Routing>, RoutingProviderError> {
        routing::lookup(&state.db, top_id, resource_type).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn lookup_in_pod<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<Option<Routing>, RoutingProviderError> {
        routing::lookup_in_pod(&state.db, top_id, pod_id, resource_type).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list(
        &self,
        state: &ServiceState,
        params: &RoutingListParameters,
    ) -> Result<Vec<Routing>, RoutingProviderError> {
        routing::list(&state.db, params).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn update_physical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
        bottom_id: &'a str,
    ) -> Result<bool, RoutingProviderError> {
        routing::update_physical(&state.db, top_id, pod_id, resource_type, bottom_id).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn clear_physical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        pod_id: &'a str,
        resource_type: ResourceKind,
    ) -> Result<bool, RoutingProviderError> {
        routing::clear_physical(&state.db, top_id, pod_id, resource_type).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete(
        &self,
        state: &ServiceState,
        routing_id: i64,
    ) -> Result<(), RoutingProviderError> {
        routing::delete(&state.db, routing_id).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_by_logical<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
    ) -> Result<u64, RoutingProviderError> {
        routing::delete_by_logical(&state.db, top_id).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_by_physical<'a>(
        &self,
        state: &ServiceState,
        bottom_id: &'a str,
    ) -> Result<u64, RoutingProviderError> {
        routing::delete_by_physical(&state.db, bottom_id).await
    }
}
