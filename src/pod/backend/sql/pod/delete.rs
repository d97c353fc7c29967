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

use crate::db::entity::prelude::Pod as DbPod;
use crate::error::DbContextExt;
use crate::pod::error::PodProviderError;

/// Delete the pod by ID.
pub async fn delete<P: AsRef<str>>(
    db: &DatabaseConnection,
    pod_id: P,
) -> Result<(), PodProviderError> {
    let res = DbPod::delete_by_id(pod_id.as_ref())
        .exec(db)
        .await
        .context("removing pod record")?;
    if res.rows_affected == 1 {
        Ok(())
    } else {
        Err(PodProviderError::PodNotFound(pod_id.as_ref().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    use super::*;

    #[tokio::test]
    async fn test_delete() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 1,
                ..Default::default()
            }])
            .into_connection();

        delete(&db, "p1").await.unwrap();
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"DELETE FROM "pod" WHERE "pod"."id" = $1"#,
                ["p1".into()]
            ),]
        );
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 0,
                ..Default::default()
            }])
            .into_connection();

        assert!(matches!(
            delete(&db, "p1").await.unwrap_err(),
            PodProviderError::PodNotFound(..)
        ));
    }
}
