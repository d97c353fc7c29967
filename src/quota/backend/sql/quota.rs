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

use sea_orm::ConnectionTrait;
use sea_orm::entity::*;
use sea_orm::query::*;

use crate::db::entity::{
    prelude::QuotaUsage as DbQuotaUsage, quota as db_quota, quota_usage as db_usage,
};
use crate::error::{DatabaseError, DbContextExt};
use crate::quota::error::QuotaProviderError;
use crate::quota::types::{QuotaLimit, QuotaUsageDetail};

mod commit;
mod expire;
mod limit;
mod reserve;
mod rollback;
mod usage;

pub use commit::*;
pub use expire::*;
pub use limit::*;
pub use reserve::*;
pub use rollback::*;
pub use usage::*;

impl From<db_quota::Model> for QuotaLimit {
    fn from(value: db_quota::Model) -> Self {
        QuotaLimit {
            project_id: value.project_id,
            resource: value.resource,
            hard_limit: value.hard_limit,
        }
    }
}

impl From<db_usage::Model> for QuotaUsageDetail {
    fn from(value: db_usage::Model) -> Self {
        QuotaUsageDetail {
            resource: value.resource,
            in_use: value.in_use,
            reserved: value.reserved,
            until_refresh: value.until_refresh,
            updated_at: value.updated_at,
        }
    }
}

/// Lock a usage row for the remainder of the transaction.
pub(crate) async fn lock_usage<C: ConnectionTrait>(
    conn: &C,
    usage_id: i64,
) -> Result<db_usage::Model, QuotaProviderError> {
    Ok(DbQuotaUsage::find_by_id(usage_id)
        .lock_exclusive()
        .one(conn)
        .await
        .context("locking quota usage")?
        .ok_or_else(|| DatabaseError::Other {
            context: "locking quota usage",
            source: sea_orm::DbErr::RecordNotFound(format!("quota_usage {usage_id}")),
        })?)
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::db::entity::{
        quota as db_quota, quota_usage as db_usage, reservation as db_reservation,
    };

    pub fn get_limit_mock<P: Into<String>, R: Into<String>>(
        id: i64,
        project_id: P,
        resource: R,
        hard_limit: i64,
    ) -> db_quota::Model {
        db_quota::Model {
            id,
            project_id: project_id.into(),
            resource: resource.into(),
            hard_limit,
        }
    }

    pub fn get_usage_mock<P: Into<String>, R: Into<String>>(
        id: i64,
        project_id: P,
        resource: R,
        in_use: i64,
        reserved: i64,
    ) -> db_usage::Model {
        db_usage::Model {
            id,
            project_id: project_id.into(),
            resource: resource.into(),
            in_use,
            reserved,
            until_refresh: None,
            updated_at: None,
        }
    }

    pub fn get_reservation_mock<U: Into<String>, R: Into<String>>(
        id: i64,
        uuid: U,
        usage_id: i64,
        resource: R,
        delta: i64,
    ) -> db_reservation::Model {
        db_reservation::Model {
            id,
            uuid: uuid.into(),
            usage_id,
            project_id: "project_uuid".into(),
            resource: resource.into(),
            delta,
            expire: None,
        }
    }
}
