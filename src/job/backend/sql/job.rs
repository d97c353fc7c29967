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

use crate::db::entity::async_job as db_job;
use crate::job::error::JobProviderError;
use crate::job::types::Job;

mod acquire;
mod complete;
mod get;
mod latest;
mod list;
mod purge;
mod record;

pub use acquire::*;
pub use complete::*;
pub use get::*;
pub use latest::*;
pub use list::*;
pub use purge::*;
pub use record::*;

impl TryFrom<db_job::Model> for Job {
    type Error = JobProviderError;

    fn try_from(value: db_job::Model) -> Result<Self, Self::Error> {
        Ok(Job {
            id: value.id,
            r#type: value.r#type,
            status: value.status.parse()?,
            resource_id: value.resource_id,
            extra_id: value.extra_id,
            project_id: value.project_id,
            timestamp: value.timestamp,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDateTime;

    use crate::db::entity::async_job as db_job;
    use crate::job::types::RUNNING_EXTRA_ID;

    pub fn get_job_mock<I, T, R, S>(
        id: I,
        job_type: T,
        resource_id: R,
        status: S,
        timestamp: NaiveDateTime,
    ) -> db_job::Model
    where
        I: Into<String>,
        T: Into<String>,
        R: Into<String>,
        S: Into<String>,
    {
        let status = status.into();
        db_job::Model {
            id: id.into(),
            r#type: job_type.into(),
            timestamp,
            extra_id: if status == "running" {
                RUNNING_EXTRA_ID.into()
            } else {
                "extra_uuid".into()
            },
            status,
            resource_id: resource_id.into(),
            project_id: None,
        }
    }
}
