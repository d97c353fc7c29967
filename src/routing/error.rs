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

use thiserror::Error;

use crate::common::types::UnknownResourceKind;
use crate::error::{BuilderError, DatabaseError};

/// Resource routing provider error.
#[derive(Debug, Error)]
pub enum RoutingProviderError {
    /// Another caller already owns the mapping triple.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error(transparent)]
    Database {
        /// The source of the error.
        source: DatabaseError,
    },

    /// Routing entry not found.
    #[error("routing entry {0} not found")]
    RoutingNotFound(String),

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder {
        /// The source of the error.
        #[from]
        source: BuilderError,
    },

    /// A stored resource type is not recognized.
    #[error(transparent)]
    UnknownResourceKind {
        /// The source of the error.
        #[from]
        source: UnknownResourceKind,
    },

    /// Unsupported driver.
    #[error("unsupported driver {0}")]
    UnsupportedDriver(String),

    /// Request validation error.
    #[error("request validation error: {}", source)]
    Validation {
        /// The source of the error.
        #[from]
        source: validator::ValidationErrors,
    },
}

impl From<DatabaseError> for RoutingProviderError {
    fn from(source: DatabaseError) -> Self {
        match source {
            cfl @ DatabaseError::Conflict { .. } => Self::Conflict(cfl.to_string()),
            other => Self::Database { source: other },
        }
    }
}

impl RoutingProviderError {
    /// Whether the error is the duplicate-mapping race.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(..))
    }
}
