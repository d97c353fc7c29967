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

use crate::client::error::ClientError;
use crate::error::BuilderError;
use crate::routing::error::RoutingProviderError;

/// Element provisioner error.
#[derive(Debug, Error)]
pub enum ElementProviderError {
    /// Region client error, including an unreachable endpoint. The
    /// provisioner does not fail over; the caller decides whether to retry
    /// the whole operation later.
    #[error(transparent)]
    Client {
        /// The source of the error.
        #[from]
        source: ClientError,
    },

    /// No client is registered for the pod's region.
    #[error("no region client registered for {0}")]
    ClientNotFound(String),

    /// The element is claimed by another caller that has not finished
    /// materializing it yet.
    #[error("provisioning of element {0} is incomplete")]
    ProvisionIncomplete(String),

    /// Routing store error.
    #[error(transparent)]
    Routing {
        /// The source of the error.
        #[from]
        source: RoutingProviderError,
    },

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder {
        /// The source of the error.
        #[from]
        source: BuilderError,
    },
}
