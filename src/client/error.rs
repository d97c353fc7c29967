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

use thiserror::Error;

/// Region client error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote resource with the same name or identity already exists.
    ///
    /// Raised by create when it races with another caller; the provisioning
    /// protocol falls back to adopting the existing resource.
    #[error("remote conflict: {0}")]
    Conflict(String),

    /// The region cannot be reached.
    #[error("endpoint of region {region} is unavailable")]
    EndpointUnavailable {
        /// Region name.
        region: String,
    },

    /// The region rejected the request.
    #[error("remote error: {0}")]
    Remote(String),
}
