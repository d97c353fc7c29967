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
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

use crate::error::BuilderError;

/// The well-known extra id of a running job.
///
/// Registering a running job uses this constant, so the uniqueness of
/// (type, status, resource_id, extra_id) rejects a second registration while
/// the first is in flight. Completion rotates the extra id to a fresh UUID,
/// freeing the slot.
pub const RUNNING_EXTRA_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Job lifecycle state.
///
/// A New row is informational history and terminal. A Running row is the
/// exclusivity token and transitions to Success or Fail through completion.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    New,
    Running,
    Success,
    Fail,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Running => "running",
            Self::Success => "success",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job status string that is not recognized.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown job status {0}")]
pub struct UnknownJobStatus(pub String);

impl FromStr for JobStatus {
    type Err = UnknownJobStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "running" => Ok(Self::Running),
            "success" => Ok(Self::Success),
            "fail" => Ok(Self::Fail),
            other => Err(UnknownJobStatus(other.to_string())),
        }
    }
}

/// A durable work item.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Job {
    /// The job ID.
    pub id: String,
    /// Kind of the work, e.g. `router_setup`.
    pub r#type: String,
    /// Lifecycle state.
    pub status: JobStatus,
    /// Opaque key encoding the target region and resource.
    pub resource_id: String,
    /// Deduplication token.
    pub extra_id: String,
    /// The owning project, when known.
    #[builder(default)]
    pub project_id: Option<String>,
    /// Registration or completion time.
    pub timestamp: NaiveDateTime,
}

/// Query parameters for listing jobs.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct JobListParameters {
    /// Filter jobs by the kind.
    #[builder(default)]
    #[validate(length(min = 1, max = 36))]
    pub r#type: Option<String>,
    /// Filter jobs by the lifecycle state.
    #[builder(default)]
    pub status: Option<JobStatus>,
    /// Filter jobs by the target resource key.
    #[builder(default)]
    pub resource_id: Option<String>,
    /// Filter jobs by the owning project.
    #[builder(default)]
    pub project_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            JobStatus::New,
            JobStatus::Running,
            JobStatus::Success,
            JobStatus::Fail,
        ] {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_tie_break_order() {
        // On equal timestamps the failure feed picks the smallest status
        // string, so fail must sort before every other state.
        let mut statuses = vec!["success", "new", "fail", "running"];
        statuses.sort();
        assert_eq!(statuses[0], "fail");
    }
}
