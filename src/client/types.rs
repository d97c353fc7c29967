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

use serde::{Deserialize, Serialize};

/// A resource living in a region, reduced to what the engine needs.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RemoteResource {
    /// Physical id within the owning region.
    pub id: String,
    /// Resource name, when the remote service exposes one.
    pub name: Option<String>,
    /// The raw remote representation.
    pub body: serde_json::Value,
}

/// Outcome of fetching or deleting a single remote resource.
#[derive(Clone, Debug, PartialEq)]
pub enum RemoteFetch {
    Found(RemoteResource),
    Absent,
}

impl RemoteFetch {
    pub fn found(self) -> Option<RemoteResource> {
        match self {
            Self::Found(resource) => Some(resource),
            Self::Absent => None,
        }
    }
}
