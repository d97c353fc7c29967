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
use crate::element::{ElementApi, error::ElementProviderError, types::Element};
use crate::pod::types::Pod;

mock! {
    pub ElementProvider {
        pub fn new(cfg: &Config) -> Result<Self, ElementProviderError>;
    }

    #[async_trait]
    impl ElementApi for ElementProvider {
        async fn get_or_create_element(
            &self,
            state: &ServiceState,
            element: &Element,
            pod: &Pod,
        ) -> Result<String, ElementProviderError>;

        async fn get_or_create_shadow_port<'a>(
            &self,
            state: &ServiceState,
            pod: &Pod,
            port_id: &'a str,
            project_id: &'a str,
            body: serde_json::Value,
        ) -> Result<String, ElementProviderError>;

        async fn delete_element<'a>(
            &self,
            state: &ServiceState,
            top_id: &'a str,
            resource_type: ResourceKind,
            pod: &Pod,
        ) -> Result<(), ElementProviderError>;
    }

    impl Clone for ElementProvider {
        fn clone(&self) -> Self;
    }
}
