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
//! # Region client
//!
//! The engine never talks to a regional OpenStack installation directly. It
//! consumes an abstract [`RegionClient`] per region, injected through the
//! [`ClientRegistry`] at service construction time. Absence of a remote
//! resource is a value ([`types::RemoteFetch::Absent`]), not an error: the
//! delete and get paths treat it as idempotent success.
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;

use crate::client::error::ClientError;
use crate::client::types::{RemoteFetch, RemoteResource};
use crate::common::types::ResourceKind;

#[cfg(test)]
pub use mock::MockRegionClient;

/// Operations the engine requires from a region.
///
/// Implementations wrap the per-service HTTP clients of one regional
/// installation. They must be safe to share between tasks.
#[async_trait]
pub trait RegionClient: Send + Sync {
    /// List resources of the kind, optionally filtered by the exact name.
    async fn list<'a>(
        &self,
        resource: ResourceKind,
        name_filter: Option<&'a str>,
    ) -> Result<Vec<RemoteResource>, ClientError>;

    /// Create a resource from the opaque body.
    async fn create(
        &self,
        resource: ResourceKind,
        body: serde_json::Value,
    ) -> Result<RemoteResource, ClientError>;

    /// Fetch a single resource by its id.
    async fn get<'a>(
        &self,
        resource: ResourceKind,
        id: &'a str,
    ) -> Result<RemoteFetch, ClientError>;

    /// Delete a resource by its id. An already absent resource reports
    /// [`RemoteFetch::Absent`].
    async fn delete<'a>(
        &self,
        resource: ResourceKind,
        id: &'a str,
    ) -> Result<RemoteFetch, ClientError>;
}

/// Registry of region clients keyed by the pod region name.
///
/// The registry is populated once during service construction and shared
/// behind the service state. `close` tears all clients down; a closed
/// registry resolves no clients.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    clients: Arc<RwLock<HashMap<String, Arc<dyn RegionClient>>>>,
}

impl ClientRegistry {
    /// Open an empty registry.
    pub fn open() -> Self {
        Self::default()
    }

    /// Register the client serving the named region, replacing a previous
    /// registration.
    pub fn register<S: AsRef<str>>(&self, region_name: S, client: Arc<dyn RegionClient>) {
        self.clients
            .write()
            .expect("client registry lock poisoned")
            .insert(region_name.as_ref().to_string(), client);
    }

    /// Resolve the client serving the named region.
    pub fn get<S: AsRef<str>>(&self, region_name: S) -> Option<Arc<dyn RegionClient>> {
        self.clients
            .read()
            .expect("client registry lock poisoned")
            .get(region_name.as_ref())
            .cloned()
    }

    /// Drop all registered clients.
    pub fn close(&self) {
        self.clients
            .write()
            .expect("client registry lock poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lifecycle() {
        let registry = ClientRegistry::open();
        assert!(registry.get("region-1").is_none());

        registry.register("region-1", Arc::new(MockRegionClient::default()));
        assert!(registry.get("region-1").is_some());
        assert!(registry.get("region-2").is_none());

        registry.close();
        assert!(registry.get("region-1").is_none());
    }
}
