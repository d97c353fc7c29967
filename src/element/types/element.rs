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

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::types::ResourceKind;
use crate::error::BuilderError;

/// A logical element to materialize in a pod.
///
/// The name is deterministic: every caller provisioning the same logical
/// element computes the same name, which is what lets concurrent callers and
/// crash-recovery find an already created resource instead of duplicating
/// it.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Element {
    /// The logical id the mapping is recorded under.
    #[validate(length(min = 1, max = 127))]
    pub top_id: String,
    /// Deterministic name identifying the element within its region.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Kind of the element.
    pub resource_type: ResourceKind,
    /// The owning project.
    #[validate(length(min = 1, max = 36))]
    pub project_id: String,
    /// Opaque creation payload handed to the region client.
    pub body: serde_json::Value,
}
