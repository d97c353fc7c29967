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
use crate::pod::error::PodProviderError;
use crate::pod::types::{Pod, PodCreate, PodListParameters};

pub use sql::SqlBackend;

/// Pod registry driver interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PodBackend: Send + Sync {
    /// Register a new pod.
    async fn create_pod(
        &self,
        state: &ServiceState,
        params: PodCreate,
    ) -> Result<Pod, PodProviderError>;

    /// Get single pod by ID.
    async fn get_pod<'a>(
        &self,
        state: &ServiceState,
        pod_id: &'a str,
    ) -> Result<Option<Pod>, PodProviderError>;

    /// List pods.
    async fn list_pods(
        &self,
        state: &ServiceState,
        params: &PodListParameters,
    ) -> Result<Vec<Pod>, PodProviderError>;

    /// Get the central (top) pod.
    async fn central_pod(&self, state: &ServiceState) -> Result<Option<Pod>, PodProviderError>;

    /// Get the bottom pod following the given one in the id order.
    async fn next_pod_after<'a>(
        &self,
        state: &ServiceState,
        current_pod_id: Option<&'a str>,
    ) -> Result<Option<Pod>, PodProviderError>;

    /// Delete a pod.
    async fn delete_pod<'a>(
        &self,
        state: &ServiceState,
        pod_id: &'a str,
    ) -> Result<(), PodProviderError>;
}
