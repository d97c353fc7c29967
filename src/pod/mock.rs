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
use crate::config::Config;
use crate::plugin_manager::PluginManager;
use crate::pod::{PodApi, error::PodProviderError, types::*};

mock! {
    pub PodProvider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, PodProviderError>;
    }

    #[async_trait]
    impl PodApi for PodProvider {
        async fn create_pod(
            &self,
            state: &ServiceState,
            params: PodCreate,
        ) -> Result<Pod, PodProviderError>;

        async fn get_pod<'a>(
            &self,
            state: &ServiceState,
            pod_id: &'a str,
        ) -> Result<Option<Pod>, PodProviderError>;

        async fn list_pods(
            &self,
            state: &ServiceState,
            params: &PodListParameters,
        ) -> Result<Vec<Pod>, PodProviderError>;

        async fn central_pod(&self, state: &ServiceState) -> Result<Option<Pod>, PodProviderError>;

        async fn next_pod_after<'a>(
            &self,
            state: &ServiceState,
            current_pod_id: Option<&'a str>,
        ) -> Result<Option<Pod>, PodProviderError>;

        async fn delete_pod<'a>(
            &self,
            state: &ServiceState,
            pod_id: &'a str,
        ) -> Result<(), PodProviderError>;
    }

    impl Clone for PodProvider {
        fn clone(&self) -> Self;
    }
}
