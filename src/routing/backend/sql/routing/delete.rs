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

use crate::db::entity::{prelude::ResourceRouting as DbRouting, resource_routing as db_routing};
use crate::error::DbContextExt;
use crate::routing::error::RoutingProviderError;

/// Delete the routing entry by ID.
pub async fn delete(db: &DatabaseConnection, routing_id: i64) -> Result<(), RoutingProviderError> {
    let res = DbRouting::delete_by_id(routing_id)
        .exec(db)
        .await
        .context("removing routing entry")?;
    if res.rows_affected == 1 {
        Ok(())
    } else {
        Err(RoutingProviderError::RoutingNotFound(
            routing_id.to_string(),
        ))
    }
}

/// Delete every mapping of the logical resource.
pub async fn delete_by_logical<T: AsRef<str>>(
    db: &DatabaseConnection,
    top_id: T,
) -> Result<u64, RoutingProviderError> {
    let res = DbRouting::delete_many()
        .filter(db_routing::Column::TopId.eq(top_id.as_ref()))
        .exec(db)
        .await
        .context("removing routing entries of the logical resource")?;
    Ok(res.rows_affected)
}

/// Delete every mapping pointing at the physical resource.
pub async fn delete_by_physical<B: AsRef<str>>(
    db: &DatabaseConnection,
    bottom_id: B,
) -> Result<u64, RoutingProviderError> {
    let res = DbRouting::delete_many()
        .filter(db_routing::Column::BottomId.eq(bottom_id.as_ref()))
        .exec(db)
        .await
        .context("removing routing entries of the physical resource")?;
    Ok(res.rows_affected)
}
