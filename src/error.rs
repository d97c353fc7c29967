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
//! # Error
//!
//! Diverse errors that can occur during the cascade processing.
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::client::error::ClientError;
use crate::element::error::ElementProviderError;
use crate::job::error::JobProviderError;
use crate::pod::error::PodProviderError;
use crate::quota::error::QuotaProviderError;
use crate::routing::error::RoutingProviderError;

/// Cascade error.
#[derive(Debug, Error)]
pub enum CascadeError {
    #[error(transparent)]
    Client {
        #[from]
        source: ClientError,
    },

    #[error(transparent)]
    Element {
        #[from]
        source: ElementProviderError,
    },

    #[error(transparent)]
    IO {
        #[from]
        source: std::io::Error,
    },

    #[error(transparent)]
    Job {
        #[from]
        source: JobProviderError,
    },

    /// Json serialization error.
    #[error("json serde error: {}", source)]
    JsonError {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Pod {
        #[from]
        source: PodProviderError,
    },

    #[error(transparent)]
    Quota {
        #[from]
        source: QuotaProviderError,
    },

    #[error(transparent)]
    Routing {
        #[from]
        source: RoutingProviderError,
    },
}

/// Database error carrying the operation context.
///
/// The conflict and lock classes are separated from everything else because
/// callers treat them differently: a [`DatabaseError::Conflict`] means
/// "somebody else already owns this row", a [`DatabaseError::Deadlock`] is
/// retried with backoff, while [`DatabaseError::Other`] is fatal.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Unique or foreign key constraint violation.
    #[error("conflict while {context}: {source}")]
    Conflict {
        context: &'static str,
        source: DbErr,
    },

    /// Deadlock or lock wait timeout.
    #[error("lock conflict while {context}: {source}")]
    Deadlock {
        context: &'static str,
        source: DbErr,
    },

    /// Any other database failure.
    #[error("database error while {context}: {source}")]
    Other {
        context: &'static str,
        source: DbErr,
    },
}

impl DatabaseError {
    /// Whether retrying the whole operation may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Deadlock { .. })
    }
}

/// Attach an operation context to a database result, classifying the error.
pub trait DbContextExt<T> {
    fn context(self, context: &'static str) -> Result<T, DatabaseError>;
}

impl<T> DbContextExt<T> for Result<T, DbErr> {
    fn context(self, context: &'static str) -> Result<T, DatabaseError> {
        self.map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_))
            | Some(SqlErr::ForeignKeyConstraintViolation(_)) => DatabaseError::Conflict {
                context,
                source: err,
            },
            _ if is_lock_error(&err) => DatabaseError::Deadlock {
                context,
                source: err,
            },
            _ => DatabaseError::Other {
                context,
                source: err,
            },
        })
    }
}

// The database drivers do not classify deadlocks for us.
fn is_lock_error(err: &DbErr) -> bool {
    let text = err.to_string().to_lowercase();
    text.contains("deadlock") || text.contains("lock wait timeout")
}

/// Structure builder error.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BuilderError(String);

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BuilderError {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_error_classification() {
        let err: Result<(), DbErr> = Err(DbErr::Exec(sea_orm::RuntimeErr::Internal(
            "Deadlock found when trying to get lock".into(),
        )));
        let classified = err.context("testing").unwrap_err();
        assert!(classified.is_retriable());
    }

    #[test]
    fn test_other_error_classification() {
        let err: Result<(), DbErr> = Err(DbErr::Exec(sea_orm::RuntimeErr::Internal(
            "connection reset".into(),
        )));
        let classified = err.context("testing").unwrap_err();
        assert!(!classified.is_retriable());
        assert!(classified.to_string().contains("testing"));
    }
}
