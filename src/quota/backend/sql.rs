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
use std::collections::BTreeMap;

use crate::cascade::ServiceState;
use crate::quota::backend::QuotaBackend;
use crate::quota::error::QuotaProviderError;
use crate::quota::types::{QuotaLimit, QuotaUsageDetail, RefreshPolicy, ReservationOutcome};

pub(crate) mod quota;

#[derive(Clone, Debug, Default)]
pub struct SqlBackend {}

#[async_trait]
impl QuotaBackend for SqlBackend {
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn reserve<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        deltas: &BTreeMap<String, i64>,
        expire: DateTime<Utc>,
        refresh: &RefreshPolicy,
    ) -> Result<ReservationOutcome, QuotaProviderError> {
        quota::reserve(&state.db, project_id, deltas, expire, refresh).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn commit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        reservation_ids: &'a [String],
    ) -> Result<(), QuotaProviderError> {
        quota::commit(&state.db, project_id, reservation_ids).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn rollback<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        reservation_ids: &'a [String],
    ) -> Result<(), QuotaProviderError> {
        quota::rollback(&state.db, project_id, reservation_ids).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn sweep_expired(
        &self,
        state: &ServiceState,
        now: DateTime<Utc>,
    ) -> Result<u64, QuotaProviderError> {
        quota::sweep_expired(&state.db, now).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn get_limits<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
    ) -> Result<Vec<QuotaLimit>, QuotaProviderError> {
        quota::get_limits(&state.db, project_id).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn set_limit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        resource: &'a str,
        hard_limit: i64,
    ) -> Result<QuotaLimit, QuotaProviderError> {
        quota::set_limit(&state.db, project_id, resource, hard_limit).await
    }

    #[tracing::instrument(level = "info", skip(self, state))]
    async fn delete_limit<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
        resource: &'a str,
    ) -> Result<(), QuotaProviderError> {
        quota::delete_limit(&state.db, project_id, resource).await
    }

    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn list_usages<'a>(
        &self,
        state: &ServiceState,
        project_id: &'a str,
    ) -> Result<Vec<QuotaUsageDetail>, QuotaProviderError> {
        quota::list_usages(&state.db, project_id).await
    }
}
