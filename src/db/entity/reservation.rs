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

/// A pending, uncommitted quota delta.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub uuid: String,
    pub usage_id: i64,
    pub project_id: String,
    pub resource: String,
    pub delta: i64,
    pub expire: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quota_usage::Entity",
        from = "Column::UsageId",
        to = "super::quota_usage::Column::Id"
    )]
    QuotaUsage,
}

impl Related<super::quota_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuotaUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
