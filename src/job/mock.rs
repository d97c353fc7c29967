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
use chrono::{DateTime, Utc};
use mockall::mock;

use crate::cascade::ServiceState;
use crate::config::Config;
use crate::job::{JobApi, error::JobProviderError, types::*};
use crate::plugin_manager::PluginManager;

mock! {
    pub JobProvider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, JobProviderError>;
    }

    #[async_trait]
    impl JobApi for JobProvider {
        async fn record<'a>(
            &self,
            state: &ServiceState,
            job_type: &'a str,
            resource_id: &'a str,
            project_id: Option<&'a str>,
        ) -> Result<Job, JobProviderError>;

        async fn acquire<'a>(
            &self,
            state: &ServiceState,
            job_type: &'a str,
            resource_id: &'a str,
            project_id: Option<&'a str>,
        ) -> Result<Option<Job>, JobProviderError>;

        async fn complete<'a>(
            &self,
            state: &ServiceState,
            job_id: &'a str,
            succeeded: bool,
            timestamp: DateTime<Utc>,
        ) -> Result<Job, JobProviderError>;

        async fn latest_failures(&self, state: &ServiceState) -> Result<Vec<Job>, JobProviderError>;

        async fn list(
            &self,
            state: &ServiceState,
            params: &JobListParameters,
        ) -> Result<Vec<Job>, JobProviderError>;

        async fn get<'a>(
            &self,
            state: &ServiceState,
            job_id: &'a str,
        ) -> Result<Option<Job>, JobProviderError>;

        async fn purge_completed(
            &self,
            state: &ServiceState,
            before: DateTime<Utc>,
        ) -> Result<u64, JobProviderError>;
    }

    impl Clone for JobProvider {
        fn clone(&self) -> Self;
    }
}
