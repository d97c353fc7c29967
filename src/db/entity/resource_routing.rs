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

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

/// A logical to physical resource mapping.
///
/// The triple (top_id, pod_id, resource_type) is unique. A NULL bottom_id
/// denotes a slot that is reserved but not materialized, or intentionally
/// expired ahead of re-provisioning.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "resource_routing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub top_id: String,
    pub bottom_id: Option<String>,
    pub pod_id: String,
    pub project_id: String,
    pub resource_type: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
