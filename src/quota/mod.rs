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
//! # Quota ledger provider
//!
//! Reserve/commit/rollback accounting for resource usage limits. A
//! reservation passes the limit check inside one short transaction whose
//! usage rows are locked in resource name order, the sole deadlock avoidance
//! mechanism shared by every ledger operation. Deadlocks that slip through
//! are expected and absorbed by a bounded retry with a fixed backoff; only
//! after the attempts are exhausted does the caller see the error.
//!
//! An over-quota rejection is hard: the whole request is aborted and the
//! caller receives a usage snapshot per offending resource. No partial
//! reservation ever survives.
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::cascade::ServiceState;
use crate::config::Config;
use crate::plugin_manager::PluginManager;
use crate::quota::backend::{QuotaBackend, sql::SqlBackend};
use crate::quota::error::QuotaProviderError;
use crate::quota::types::{QuotaLimit, QuotaUsageDetail, RefreshPolicy, ReservationOutcome};

#[cfg(test)]
pub use mock::MockQuotaProvider;
pub use types::QuotaApi;

#[derive(Clone)]
pub struct QuotaProvider {
    backend_driver: Arc<dyn QuotaBackend>,
    refresh: RefreshPolicy,
    reservation_expire: i64,
    max_retries: u32,
    retry_interval: std::time::Duration,
}

impl QuotaProvider {
    pub fn new(
        config: &Config,
        plugin_manager: &PluginManager,
    ) -> Result<Self, QuotaProviderError> {
        let backend_driver =
            if let Some(driver) = plugin_manager.get_quota_backend(config.quota.driver.clone()) {
                driver.clone()
            } else {
                match config.quota.driver.as_str() {
                    "sql" => Arc::new(SqlBackend::default()),
                    _ => {
                        return Err(QuotaProviderError::UnsupportedDriver(
                            config.quota.driver.clone(),
                        ));
                    }
                }
            };
        Ok(Self {
            backend_driver,
            refresh: RefreshPolicy {
                until_refresh: config.quota.until_refresh,
                max_age: config.quota.max_age,
            },
            reservation_expire: config.quota.reservation_expire,
            max_retries: config.quota.max_retries.max(1),
            retry_interval: std::time::Duration::from_millis(config.quota.retry_interval),
        })
    }
}

// Deadlock retry loop shared by the state changing ledger operations.
macro_rules! retry_on_deadlock {
    ($self:ident, $op:expr) => {{
        let mut attempt = 0;
        loop {
            match $op {
                Err(err @ QuotaProviderError::Deadlock { .. })
                    if attempt + 1 < $self.max_retries =>
                {
                    attempt += 1;
                    warn!("retrying quota operation after a deadlock: {err}");
                    tokio::time::sleep($self.retry_interval).await;
                }
                other => break other,
            }
        }
    }};
}

#[async_trait]
impl QuotaApi for QuotaProvider {
    /// Reserve the deltas against the project limits, all or nothing.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn reserve<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        deltas: &BTreeMap<String, i64>,
        expire: Option<DateTime<Utc>>,
    ) -> Result<ReservationOutcome, QuotaProviderError> {
        let expire =
            expire.unwrap_or_else(|| Utc::now() + Duration::seconds(self.reservation_expire));
        retry_on_deadlock!(
            self,
            self.backend_driver
                .reserve(state, project_id, deltas, expire, &self.refresh)
                .await
        )
    }

    /// Fold the reserved deltas into the usage and drop the reservations.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn commit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        reservation_ids: &'a [String],
    ) -> Result<(), QuotaProviderError> {
        retry_on_deadlock!(
            self,
            self.backend_driver
                .commit(state, project_id, reservation_ids)
                .await
        )
    }

    /// Release the reserved deltas without touching the usage.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn rollback<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        reservation_ids: &'a [String],
    ) -> Result<(), QuotaProviderError> {
        retry_on_deadlock!(
            self,
            self.backend_driver
                .rollback(state, project_id, reservation_ids)
                .await
        )
    }

    /// Roll back every reservation past its expiry.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn sweep_expired(&self, state: &ServiceState) -> Result<u64, QuotaProviderError> {
        retry_on_deadlock!(
            self,
            self.backend_driver.sweep_expired(state, Utc::now()).await
        )
    }

    /// List the hard limits of a project.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_limits<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
    ) -> Result<Vec<QuotaLimit>, QuotaProviderError> {
        self.backend_driver.get_limits(state, project_id).await
    }

    /// Create or replace a hard limit.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn set_limit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        resource: &'a str,
        hard_limit: i64,
    ) -> Result<QuotaLimit, QuotaProviderError> {
        self.backend_driver
            .set_limit(state, project_id, resource, hard_limit)
            .await
    }

    /// Delete a hard limit.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_limit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        resource: &'a str,
    ) -> Result<(), QuotaProviderError> {
        self.backend_driver
            .delete_limit(state, project_id, resource)
            .await
    }

    /// List the usage counters of a project.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_usages<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
    ) -> Result<Vec<QuotaUsageDetail>, QuotaProviderError> {
        self.backend_driver.list_usages(state, project_id).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseConnection, DbErr, RuntimeErr};
    use std::sync::Arc;

    use super::backend::MockQuotaBackend;
    use super::*;
    use crate::cascade::Service;
    use crate::client::ClientRegistry;
    use crate::error::DatabaseError;
    use crate::provider::Provider;

    fn get_state_mock() -> ServiceState {
        Arc::new(
            Service::new(
                Config::default(),
                DatabaseConnection::Disconnected,
                Provider::mocked_builder().build().unwrap(),
                ClientRegistry::open(),
            )
            .unwrap(),
        )
    }

    fn get_provider(backend: MockQuotaBackend, max_retries: u32) -> QuotaProvider {
        QuotaProvider {
            backend_driver: Arc::new(backend),
            refresh: RefreshPolicy::default(),
            reservation_expire: 86400,
            max_retries,
            retry_interval: std::time::Duration::from_millis(1),
        }
    }

    fn deadlock() -> QuotaProviderError {
        QuotaProviderError::Deadlock {
            source: DatabaseError::Deadlock {
                context: "locking quota usage",
                source: DbErr::Exec(RuntimeErr::Internal("deadlock detected".into())),
            },
        }
    }

    #[tokio::test]
    async fn test_reserve_retries_after_deadlock() {
        let state = get_state_mock();
        let mut backend = MockQuotaBackend::default();
        backend
            .expect_reserve()
            .times(2)
            .returning(|_, _, _, _, _| Err(deadlock()));
        backend.expect_reserve().times(1).returning(|_, _, _, _, _| {
            Ok(ReservationOutcome {
                reservation_ids: vec!["res_uuid".into()],
                refresh_due: vec![],
            })
        });
        let provider = get_provider(backend, 5);

        let deltas = BTreeMap::from([("port".to_string(), 2)]);
        let outcome = provider
            .reserve(&state, "project_uuid", &deltas, None)
            .await
            .unwrap();
        assert_eq!(outcome.reservation_ids, vec!["res_uuid".to_string()]);
    }

    #[tokio::test]
    async fn test_reserve_deadlock_exhausts_retries() {
        let state = get_state_mock();
        let mut backend = MockQuotaBackend::default();
        // max_retries counts the initial attempt as well.
        backend
            .expect_reserve()
            .times(2)
            .returning(|_, _, _, _, _| Err(deadlock()));
        let provider = get_provider(backend, 2);

        let deltas = BTreeMap::from([("port".to_string(), 2)]);
        assert!(matches!(
            provider
                .reserve(&state, "project_uuid", &deltas, None)
                .await
                .unwrap_err(),
            QuotaProviderError::Deadlock { .. }
        ));
    }

    #[tokio::test]
    async fn test_over_quota_is_not_retried() {
        let state = get_state_mock();
        let mut backend = MockQuotaBackend::default();
        backend
            .expect_reserve()
            .times(1)
            .returning(|_, _, _, _, _| {
                Err(QuotaProviderError::OverQuota {
                    usages: BTreeMap::from([(
                        "port".to_string(),
                        crate::quota::types::QuotaUsageSnapshot {
                            in_use: 8,
                            reserved: 2,
                            hard_limit: 10,
                        },
                    )]),
                })
            });
        let provider = get_provider(backend, 5);

        let deltas = BTreeMap::from([("port".to_string(), 3)]);
        assert!(matches!(
            provider
                .reserve(&state, "project_uuid", &deltas, None)
                .await
                .unwrap_err(),
            QuotaProviderError::OverQuota { .. }
        ));
    }
}
