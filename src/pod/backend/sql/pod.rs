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

use crate::db::entity::pod as db_pod;
use crate::pod::types::Pod;

mod create;
mod delete;
mod get;
mod list;

pub use create::*;
pub use delete::*;
pub use get::*;
pub use list::*;

impl From<db_pod::Model> for Pod {
    fn from(value: db_pod::Model) -> Self {
        Pod {
            id: value.id,
            region_name: value.region_name,
            az_name: value.az_name,
            pod_az_name: value.pod_az_name,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::db::entity::pod as db_pod;

    pub fn get_pod_mock<I: Into<String>, R: Into<String>, A: Into<String>>(
        id: I,
        region_name: R,
        az_name: A,
    ) -> db_pod::Model {
        db_pod::Model {
            id: id.into(),
            region_name: region_name.into(),
            az_name: az_name.into(),
            pod_az_name: None,
        }
    }
}
