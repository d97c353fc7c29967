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
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::types::ResourceKind;
use crate::error::BuilderError;

/// A logical to physical resource mapping.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Routing {
    /// The routing entry ID.
    pub id: i64,
    /// The logical resource id in the central pod.
    pub top_id: String,
    /// The physical resource id in the bottom pod, when materialized.
    #[builder(default)]
    pub bottom_id: Option<String>,
    /// The pod hosting the physical resource.
    pub pod_id: String,
    /// The owning project.
    pub project_id: String,
    /// Kind of the routed resource.
    pub resource_type: ResourceKind,
    #[builder(default)]
    pub created_at: Option<NaiveDateTime>,
    #[builder(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Routing entry creation data.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct RoutingCreate {
    /// The logical resource id in the central pod.
    #[validate(length(min = 1, max = 127))]
    pub top_id: String,
    /// The physical resource id, absent for a reserved slot.
    #[builder(default)]
    pub bottom_id: Option<String>,
    /// The pod hosting the physical resource.
    #[validate(length(min = 1, max = 36))]
    pub pod_id: String,
    /// The owning project.
    #[validate(length(min = 1, max = 36))]
    pub project_id: String,
    /// Kind of the routed resource.
    pub resource_type: ResourceKind,
}

/// Query parameters for listing routing entries.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct RoutingListParameters {
    /// Filter by the logical resource id.
    #[builder(default)]
    pub top_id: Option<String>,
    /// Filter by the physical resource id.
    #[builder(default)]
    pub bottom_id: Option<String>,
    /// Filter by the hosting pod.
    #[builder(default)]
    pub pod_id: Option<String>,
    /// Filter by the owning project.
    #[builder(default)]
    pub project_id: Option<String>,
    /// Filter by the resource kind.
    #[builder(default)]
    pub resource_type: Option<ResourceKind>,
}
