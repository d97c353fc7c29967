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
use mockall::mock;

use crate::cascade::ServiceState;
use crate::common::types::ResourceKind;
use crate::config::Config;
use crate::plugin_manager::PluginManager;
use crate::routing::{RoutingApi, error::RoutingProviderError, types::*};

mock! {
    pub RoutingProvider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, RoutingProviderError>;
    }

    #[async_trait]
    impl RoutingApi for RoutingProvider {
        async fn put(
            &self,
            state: &ServiceState,
            params: RoutingCreate,
        ) -> Result<Routing, RoutingProviderError>;

        async fn get(
            &self,
            state: &ServiceState,
            routing_id: i64,
        ) -> Result<Option<Routing>, RoutingProviderError>;

        async fn lookup<'a>(
            &self,
            state: &ServiceState,
            top_id: &'a str,
            resource_type: ResourceKind,
        ) -> Result<Vec<Routing>, RoutingProviderError>;

        async fn lookup_in_pod<'a>(
            &self,
            state: &ServiceState,
            top_id: &'a str,
            pod_id: &'a str,
            resource_type: ResourceKind,
        ) -> Result<Option<Routing>, RoutingProviderError>;

        async fn list(
            &self,
            state: &ServiceState,
            params: &RoutingListParameters,
        ) -> Result<Vec<Routing>, RoutingProviderError>;

        async fn update_physical<'a>(
            &self,
            state: &ServiceState,
            top_id: &'a str,
            pod_id: &'a str,
            resource_type: ResourceKind,
            bottom_id: &'a str,
        ) -> Result<bool, RoutingProviderError>;

        async fn clear_physical<'a>(
            &self,
            state: &ServiceState,
            top_id: &'a str,
            pod_id: &'a str,
            resource_type: ResourceKind,
        ) -> Result<bool, RoutingProviderError>;

        async fn delete(
            &self,
            state: &ServiceState,
            routing_id: i64,
        ) -> Result<(), RoutingProviderError>;

        async fn delete_by_logical<'a>(
            &self,
            state: &ServiceState,
            top_id: &'a str,
        ) -> Result<u64, RoutingProviderError>;

        async fn delete_by_physical<'a>(
            &self,
            state: &ServiceState,
            bottom_id: &'a str,
        ) -> Result<u64, RoutingProviderError>;
    }

    impl Clone for RoutingProvider {
        fn clone(&self) -> Self;
    }
}
