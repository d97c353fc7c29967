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

use std::collections::BTreeMap;
use thiserror::Error;

use crate::error::{BuilderError, DatabaseError};
use crate::quota::types::QuotaUsageSnapshot;

/// Quota ledger provider error.
#[derive(Debug, Error)]
pub enum QuotaProviderError {
    /// Conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error(transparent)]
    Database {
        /// The source of the error.
        source: DatabaseError,
    },

    /// Database deadlock, retried with backoff by the provider.
    #[error(transparent)]
    Deadlock {
        /// The source of the error.
        source: DatabaseError,
    },

    /// Quota limit not found.
    #[error("no quota limit for {project_id}/{resource}")]
    LimitNotFound {
        project_id: String,
        resource: String,
    },

    /// The reservation would exceed a hard limit.
    ///
    /// Carries the usage snapshot of every offending resource; the whole
    /// request was aborted, no partial reservation exists.
    #[error("quota exceeded for resources: {}", usages.keys().cloned().collect::<Vec<_>>().join(", "))]
    OverQuota {
        usages: BTreeMap<String, QuotaUsageSnapshot>,
    },

    /// The reservation is gone: already committed, rolled back or expired.
    #[error("reservation {0} not found")]
    ReservationNotFound(String),

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder {
        /// The source of the error.
        #[from]
        source: BuilderError,
    },

    /// Unsupported driver.
    #[error("unsupported driver {0}")]
    UnsupportedDriver(String),
}

impl From<DatabaseError> for QuotaProviderError {
    fn from(source: DatabaseError) -> Self {
        match source {
            cfl @ DatabaseError::Conflict { .. } => Self::Conflict(cfl.to_string()),
            dl @ DatabaseError::Deadlock { .. } => Self::Deadlock { source: dl },
            other => Self::Database { source: other },
        }
    }
}

impl QuotaProviderError {
    /// Whether the provider may retry the whole operation.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Deadlock { .. })
    }
}
