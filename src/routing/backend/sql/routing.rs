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

use crate::db::entity::resource_routing as db_routing;
use crate::routing::error::RoutingProviderError;
use crate::routing::types::Routing;

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::*;
pub use delete::*;
pub use get::*;
pub use list::*;
pub use update::*;

impl TryFrom<db_routing::Model> for Routing {
    type Error = RoutingProviderError;

    fn try_from(value: db_routing::Model) -> Result<Self, Self::Error> {
        Ok(Routing {
            id: value.id,
            top_id: value.top_id,
            bottom_id: value.bottom_id,
            pod_id: value.pod_id,
            project_id: value.project_id,
            resource_type: value.resource_type.parse()?,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::db::entity::resource_routing as db_routing;

    pub fn get_routing_mock<T: Into<String>, P: Into<String>>(
        id: i64,
        top_id: T,
        pod_id: P,
        bottom_id: Option<String>,
    ) -> db_routing::Model {
        db_routing::Model {
            id,
            top_id: top_id.into(),
            bottom_id,
            pod_id: pod_id.into(),
            project_id: "project_uuid".into(),
            resource_type: "network".into(),
            created_at: None,
            updated_at: None,
        }
    }
}
