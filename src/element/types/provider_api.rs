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
use crate::element::error::ElementProviderError;
use crate::element::types::element::Element;
use crate::pod::types::Pod;

/// Element provisioner API.
#[async_trait]
pub trait ElementApi: Send + Sync {
    /// Return the physical id of the element in the pod, creating the
    /// physical resource only if it does not already exist anywhere
    /// reachable.
    async fn get_or_create_element(
        &self,
        state: &ServiceState,
        element: &Element,
        pod: &Pod,
    ) -> Result<String, ElementProviderError>;

    /// Provision the shadow copy of a port in the pod.
    async fn get_or_create_shadow_port<'a>(
        &self,
        state: &ServiceState,
        pod: &Pod,
        port_id: &'a str,
        project_id: &'a str,
        body: serde_json::Value,
    ) -> Result<String, ElementProviderError>;

    /// Tear the element down in the pod.
    async fn delete_element<'a>(
        &self,
        state: &ServiceState,
        top_id: &'a str,
        resource_type: ResourceKind,
        pod: &Pod,
    ) -> Result<(), ElementProviderError>;
}
