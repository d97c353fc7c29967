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

use crate::error::BuilderError;

/// A region participating in the deployment.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Pod {
    /// The pod ID.
    #[validate(length(min = 1, max = 36))]
    pub id: String,
    /// The region name the pod serves.
    #[validate(length(min = 1, max = 255))]
    pub region_name: String,
    /// The availability zone the pod belongs to. Empty for the central pod.
    #[builder(default)]
    pub az_name: String,
    /// The availability zone to use inside the pod when creating resources.
    #[builder(default)]
    pub pod_az_name: Option<String>,
}

impl Pod {
    /// Whether this pod is the central (top) region.
    pub fn is_central(&self) -> bool {
        self.az_name.is_empty()
    }
}

/// Pod creation data.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct PodCreate {
    /// The pod ID. Generated when missing.
    #[builder(default)]
    #[validate(length(min = 1, max = 36))]
    pub id: Option<String>,
    /// The region name the pod serves.
    #[validate(length(min = 1, max = 255))]
    pub region_name: String,
    /// The availability zone the pod belongs to. Empty for the central pod.
    #[builder(default)]
    pub az_name: String,
    /// The availability zone to use inside the pod when creating resources.
    #[builder(default)]
    pub pod_az_name: Option<String>,
}

/// Query parameters for listing pods.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct PodListParameters {
    /// Filter pods by the availability zone name.
    #[builder(default)]
    pub az_name: Option<String>,
    /// Filter pods by the region name.
    #[builder(default)]
    #[validate(length(min = 1, max = 255))]
    pub region_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_central() {
        let central = Pod {
            id: "p0".into(),
            region_name: "CentralRegion".into(),
            az_name: "".into(),
            pod_az_name: None,
        };
        assert!(central.is_central());

        let bottom = Pod {
            az_name: "az1".into(),
            ..central
        };
        assert!(!bottom.is_central());
    }
}
