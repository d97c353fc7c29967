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
//! # Provider manager
//!
//! Provider manager provides access to the individual service providers.
//! This gives an easy interface for passing the overall manager down to the
//! individual providers that might need to call other providers while also
//! allowing an easy injection of mocked providers.
use derive_builder::Builder;
use mockall_double::double;

use crate::config::Config;
use crate::element::ElementApi;
#[double]
use crate::element::ElementProvider;
use crate::error::CascadeError;
use crate::job::JobApi;
#[double]
use crate::job::JobProvider;
use crate::plugin_manager::PluginManager;
use crate::pod::PodApi;
#[double]
use crate::pod::PodProvider;
use crate::quota::QuotaApi;
#[double]
use crate::quota::QuotaProvider;
use crate::routing::RoutingApi;
#[double]
use crate::routing::RoutingProvider;

/// Global provider manager.
#[derive(Builder, Clone)]
// It is necessary to use the owned pattern since otherwise builder invokes clone which immediately
// confuses mockall used in tests
#[builder(pattern = "owned")]
pub struct Provider {
    /// Configuration.
    pub config: Config,
    /// Element provisioner.
    element: ElementProvider,
    /// Job queue provider.
    job: JobProvider,
    /// Pod registry provider.
    pod: PodProvider,
    /// Quota ledger provider.
    quota: QuotaProvider,
    /// Resource routing provider.
    routing: RoutingProvider,
}

impl Provider {
    pub fn new(cfg: Config, plugin_manager: PluginManager) -> Result<Self, CascadeError> {
        let element_provider = ElementProvider::new(&cfg)?;
        let job_provider = JobProvider::new(&cfg, &plugin_manager)?;
        let pod_provider = PodProvider::new(&cfg, &plugin_manager)?;
        let quota_provider = QuotaProvider::new(&cfg, &plugin_manager)?;
        let routing_provider = RoutingProvider::new(&cfg, &plugin_manager)?;

        Ok(Self {
            config: cfg,
            element: element_provider,
            job: job_provider,
            pod: pod_provider,
            quota: quota_provider,
            routing: routing_provider,
        })
    }

    /// Get the element provisioner.
    pub fn get_element_provider(&self) -> &impl ElementApi {
        &self.element
    }

    /// Get the job queue provider.
    pub fn get_job_provider(&self) -> &impl JobApi {
        &self.job
    }

    /// Get the pod registry provider.
    pub fn get_pod_provider(&self) -> &impl PodApi {
        &self.pod
    }

    /// Get the quota ledger provider.
    pub fn get_quota_provider(&self) -> &impl QuotaApi {
        &self.quota
    }

    /// Get the resource routing provider.
    pub fn get_routing_provider(&self) -> &impl RoutingApi {
        &self.routing
    }
}

#[cfg(test)]
impl Provider {
    /// A builder pre-filled with default mocks for use in tests.
    pub(crate) fn mocked_builder() -> ProviderBuilder {
        ProviderBuilder::default()
            .config(Config::default())
            .element(ElementProvider::default())
            .job(JobProvider::default())
            .pod(PodProvider::default())
            .quota(QuotaProvider::default())
            .routing(RoutingProvider::default())
    }
}
