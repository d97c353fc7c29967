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
//! # Plugin manager
//!
//! A driver, also known as a backend, is an abstraction around the data
//! access needed by a particular subsystem. The [PluginManager] is
//! responsible for picking the proper backend driver for the provider,
//! allowing custom implementations to be registered during the service
//! start.
use std::collections::HashMap;
use std::sync::Arc;

use crate::job::backend::JobBackend;
use crate::pod::backend::PodBackend;
use crate::quota::backend::QuotaBackend;
use crate::routing::backend::RoutingBackend;

/// Plugin manager allowing to pass custom backend plugins implementing
/// required trait during the service start.
#[derive(Clone, Default)]
pub struct PluginManager {
    /// Job queue backend plugins.
    job_backends: HashMap<String, Arc<dyn JobBackend>>,
    /// Pod registry backend plugins.
    pod_backends: HashMap<String, Arc<dyn PodBackend>>,
    /// Quota ledger backend plugins.
    quota_backends: HashMap<String, Arc<dyn QuotaBackend>>,
    /// Resource routing backend plugins.
    routing_backends: HashMap<String, Arc<dyn RoutingBackend>>,
}

impl PluginManager {
    /// Register job queue backend.
    pub fn register_job_backend<S: AsRef<str>>(&mut self, name: S, plugin: Arc<dyn JobBackend>) {
        self.job_backends.insert(name.as_ref().to_string(), plugin);
    }

    /// Register pod registry backend.
    pub fn register_pod_backend<S: AsRef<str>>(&mut self, name: S, plugin: Arc<dyn PodBackend>) {
        self.pod_backends.insert(name.as_ref().to_string(), plugin);
    }

    /// Register quota ledger backend.
    pub fn register_quota_backend<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Arc<dyn QuotaBackend>,
    ) {
        self.quota_backends
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Register resource routing backend.
    pub fn register_routing_backend<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Arc<dyn RoutingBackend>,
    ) {
        self.routing_backends
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Get registered job queue backend.
    pub fn get_job_backend<S: AsRef<str>>(&self, name: S) -> Option<&Arc<dyn JobBackend>> {
        self.job_backends.get(name.as_ref())
    }

    /// Get registered pod registry backend.
    pub fn get_pod_backend<S: AsRef<str>>(&self, name: S) -> Option<&Arc<dyn PodBackend>> {
        self.pod_backends.get(name.as_ref())
    }

    /// Get registered quota ledger backend.
    pub fn get_quota_backend<S: AsRef<str>>(&self, name: S) -> Option<&Arc<dyn QuotaBackend>> {
        self.quota_backends.get(name.as_ref())
    }

    /// Get registered resource routing backend.
    pub fn get_routing_backend<S: AsRef<str>>(&self, name: S) -> Option<&Arc<dyn RoutingBackend>> {
        self.routing_backends.get(name.as_ref())
    }
}
