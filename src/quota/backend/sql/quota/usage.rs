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

use sea_orm::DatabaseConnection;
use sea_orm::entity::*;
use sea_orm::query::*;

use crate::db::entity::{prelude::QuotaUsage as DbQuotaUsage, quota_usage as db_usage};
use crate::error::DbContextExt;
use crate::quota::error::QuotaProviderError;
use crate::quota::types::QuotaUsageDetail;

/// List the usage counters of a project.
pub async fn list_usages<'a>(
    db: &DatabaseConnection,
    project_id: &'a str,
) -> Result<Vec<QuotaUsageDetail>, QuotaProviderError> {
    Ok(DbQuotaUsage::find()
        .filter(db_usage::Column::ProjectId.eq(project_id))
        .order_by_asc(db_usage::Column::Resource)
        .all(db)
        .await
        .context("listing quota usages")?
        .into_iter()
        .map(Into::into)
        .collect())
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn test_list_usages() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![get_usage_mock(1, "project_uuid", "port", 8, 2)]])
            .into_connection();
        let usages = list_usages(&db, "project_uuid").await.unwrap();
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].in_use, 8);
        assert_eq!(usages[0].reserved, 2);
    }
}
