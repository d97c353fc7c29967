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
use std::collections::BTreeMap;

use crate::cascade::ServiceState;
use crate::config::Config;
use crate::plugin_manager::PluginManager;
use crate::quota::{QuotaApi, error::QuotaProviderError, types::*};

mock! {
    pub QuotaProvider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, QuotaProviderError>;
    }

    #[async_trait]
    impl QuotaApi for QuotaProvider {
        async fn reserve<'a>(
            &self,
            state: &ServiceState,
            project_id: &'a str,
            deltas: &BTreeMap<String, i64>,
            expire: Option<DateTime<Utc>>,
        ) -> Result<ReservationOutcome, QuotaProviderError>;

        async fn commit<'a>(
            &self,
            state: &ServiceState,
            project_id: &'a str,
            reservation_ids: &'a [String],
        ) -> Result<(), QuotaProviderError>;

        async fn rollback<'a>(
            &self,
            state: &ServiceState,
            project_id: &'a str,
            reservation_ids: &'a [String],
        ) -> Result<(), QuotaProviderError>;

        async fn sweep_expired(&self, state: &ServiceState) -> Result<u64, QuotaProviderError>;

        async fn get_limits<'a>(
            &self,
            state: &ServiceState,
            project_id: &'a str,
        ) -> Result<Vec<QuotaLimit>, QuotaProviderError>;

        async fn set_limit<'a>(
            &self,
            state: &ServiceState,
            project_id: &'a str,
            resource: &'a str,
            hard_limit: i64,
        ) -> Result<QuotaLimit, QuotaProviderError>;

        async fn delete_limit<'a>(
            &self,
            state: &ServiceState,
            project_id: &'a str,
            resource: &'a str,
        ) -> Result<(), QuotaProviderError>;

        async fn list_usages<'a>(
            &self,
            state: &ServiceState,
            project_id: &'a str,
        ) -> Result<Vec<QuotaUsageDetail>, QuotaProviderError>;
    }

    impl Clone for QuotaProvider {
        fn clone(&self) -> Self;
    }
}
