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

use crate::client::RegionClient;
use crate::client::error::ClientError;
use crate::client::types::{RemoteFetch, RemoteResource};
use crate::common::types::ResourceKind;

mock! {
    pub RegionClient {}

    #[async_trait]
    impl RegionClient for RegionClient {
        async fn list<'a>(
            &self,
            resource: ResourceKind,
            name_filter: Option<&'a str>,
        ) -> Result<Vec<RemoteResource>, ClientError>;

        async fn create(
            &self,
            resource: ResourceKind,
            body: serde_json::Value,
        ) -> Result<RemoteResource, ClientError>;

        async fn get<'a>(
            &self,
            resource: ResourceKind,
            id: &'a str,
        ) -> Result<RemoteFetch, ClientError>;

        async fn delete<'a>(
            &self,
            resource: ResourceKind,
            id: &'a str,
        ) -> Result<RemoteFetch, ClientError>;
    }
}
