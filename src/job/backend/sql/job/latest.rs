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
use std::collections::HashSet;

use crate::db::entity::{async_job as db_job, prelude::AsyncJob as DbJob};
use crate::error::DbContextExt;
use crate::job::error::JobProviderError;
use crate::job::types::{Job, JobStatus};

/// The retry feed.
///
/// For every (type, resource_id) pair the most recent row decides: only when
/// it is a failure does the pair appear in the feed. Rows are ordered by
/// timestamp descending with the status string as the tie breaker, so on an
/// equal timestamp a `fail` row sorts ahead of `new`, `running` and
/// `success` and wins the pick.
pub async fn latest_failures(db: &DatabaseConnection) -> Result<Vec<Job>, JobProviderError> {
    let rows = DbJob::find()
        .order_by_desc(db_job::Column::Timestamp)
        .order_by_asc(db_job::Column::Status)
        .all(db)
        .await
        .context("listing jobs for the failure feed")?;

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut failures = Vec::new();
    for row in rows {
        if seen.insert((row.r#type.clone(), row.resource_id.clone()))
            && row.status == JobStatus::Fail.as_str()
        {
            failures.push(row.try_into()?);
        }
    }
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::super::tests::*;
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_latest_failures() {
        let now = Utc::now().naive_utc();
        // Rows arrive in the query order: newest first, fail first on ties.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                // router-9: latest row failed -> in the feed.
                get_job_mock("j4", "router_setup", "region-1#router-9", "fail", now),
                // router-9: an older success is shadowed.
                get_job_mock(
                    "j3",
                    "router_setup",
                    "region-1#router-9",
                    "success",
                    now - Duration::seconds(60),
                ),
                // net-3: latest row succeeded -> not in the feed.
                get_job_mock(
                    "j2",
                    "port_setup",
                    "region-1#net-3",
                    "success",
                    now - Duration::seconds(30),
                ),
                get_job_mock(
                    "j1",
                    "port_setup",
                    "region-1#net-3",
                    "fail",
                    now - Duration::seconds(90),
                ),
            ]])
            .into_connection();

        let feed = latest_failures(&db).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "j4");
        assert_eq!(feed[0].status, JobStatus::Fail);
    }

    #[tokio::test]
    async fn test_latest_failures_tie_prefers_fail() {
        let now = Utc::now().naive_utc();
        // Same timestamp: the ascending status order places fail first, so
        // the pair stays in the feed.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                get_job_mock("j2", "router_setup", "region-1#router-9", "fail", now),
                get_job_mock("j1", "router_setup", "region-1#router-9", "new", now),
            ]])
            .into_connection();

        let feed = latest_failures(&db).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "j2");
    }
}
