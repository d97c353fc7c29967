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

use chrono::NaiveDateTime;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::BuilderError;

/// A per-project hard limit. A negative limit means unlimited.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct QuotaLimit {
    /// The owning project.
    #[validate(length(min = 1, max = 36))]
    pub project_id: String,
    /// The limited resource.
    #[validate(length(min = 1, max = 255))]
    pub resource: String,
    /// The hard limit.
    pub hard_limit: i64,
}

/// Usage counters of a single (project, resource) pair.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct QuotaUsageDetail {
    /// The counted resource.
    pub resource: String,
    /// Currently consumed amount.
    pub in_use: i64,
    /// Amount held by pending reservations.
    pub reserved: i64,
    /// Remaining reservations until a usage refresh is due.
    #[builder(default)]
    pub until_refresh: Option<i64>,
    #[builder(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Usage as seen at the moment a reservation was rejected.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct QuotaUsageSnapshot {
    /// Currently consumed amount.
    pub in_use: i64,
    /// Amount held by pending reservations.
    pub reserved: i64,
    /// The hard limit the request would have exceeded.
    pub hard_limit: i64,
}

/// When usage counters are considered stale.
///
/// The ledger only decides that a refresh is due; recounting the resources
/// is delegated to the caller.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RefreshPolicy {
    /// Count of reservations until a refresh is due. Zero disables.
    pub until_refresh: i64,
    /// Seconds of usage age until a refresh is due. Zero disables.
    pub max_age: i64,
}

/// The result of a successful reservation.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReservationOutcome {
    /// One reservation per positively reserved resource.
    pub reservation_ids: Vec<String>,
    /// Resources whose usage counters are due for a refresh.
    pub refresh_due: Vec<String>,
}
