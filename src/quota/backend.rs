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
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::cascade::ServiceState;
use crate::quota::error::QuotaProviderError;
use crate::quota::types::{QuotaLimit, QuotaUsageDetail, RefreshPolicy, ReservationOutcome};

pub use sql::SqlBackend;

/// Quota ledger driver interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotaBackend: Send + Sync {
    /// Reserve the deltas against the project limits, all or nothing.
    async fn reserve<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        deltas: &BTreeMap<String, i64>,
        expire: DateTime<Utc>,
        refresh: &RefreshPolicy,
    ) -> Result<ReservationOutcome, QuotaProviderError>;

    /// Fold the reserved deltas into the usage and drop the reservations.
    async fn commit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        reservation_ids: &'a [String],
    ) -> Result<(), QuotaProviderError>;

    /// Release the reserved deltas without touching the usage.
    async fn rollback<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        reservation_ids: &'a [String],
    ) -> Result<(), QuotaProviderError>;

    /// Roll back every reservation past its expiry.
    async fn sweep_expired(
        &self,
        state: &ServiceState,
        now: DateTime<Utc>,
    ) -> Result<u64, QuotaProviderError>;

    /// List the hard limits of a project.
    async fn get_limits<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
    ) -> Result<Vec<QuotaLimit>, QuotaProviderError>;

    /// Create or replace a hard limit.
    async fn set_limit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        resource: &'a str,
        hard_limit: i64,
    ) -> Result<QuotaLimit, QuotaProviderError>;

    /// Delete a hard limit.
    async fn delete_limit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        resource: &'a str,
    ) -> Result<(), QuotaProviderError>;

    /// List the usage counters of a project.
    async fn list_usages<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
    ) -> Result<Vec<QuotaUsageDetail>, QuotaProviderError>;
}
