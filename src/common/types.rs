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
//! # Common types
//!
//! Resource kinds shared by every provider. A "shadow" or "bridge" copy of a
//! resource is tracked under its own kind so that routing entries for the
//! copy never collide with the entries of the resource it mirrors.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a routed resource.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Network,
    Subnet,
    Port,
    Router,
    SecurityGroup,
    /// Stand-in port materializing a remote port locally.
    ShadowPort,
    /// Inter-region bridge network.
    BridgeNetwork,
    BridgeSubnet,
    BridgePort,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Subnet => "subnet",
            Self::Port => "port",
            Self::Router => "router",
            Self::SecurityGroup => "security_group",
            Self::ShadowPort => "shadow_port",
            Self::BridgeNetwork => "bridge_network",
            Self::BridgeSubnet => "bridge_subnet",
            Self::BridgePort => "bridge_port",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource kind string that is not recognized.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown resource kind {0}")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "network" => Ok(Self::Network),
            "subnet" => Ok(Self::Subnet),
            "port" => Ok(Self::Port),
            "router" => Ok(Self::Router),
            "security_group" => Ok(Self::SecurityGroup),
            "shadow_port" => Ok(Self::ShadowPort),
            "bridge_network" => Ok(Self::BridgeNetwork),
            "bridge_subnet" => Ok(Self::BridgeSubnet),
            "bridge_port" => Ok(Self::BridgePort),
            other => Err(UnknownResourceKind(other.to_string())),
        }
    }
}

/// Deterministic name of the inter-region bridge network of a project.
///
/// The names produced by these helpers are the identity the provisioning
/// protocol converges on: two callers provisioning the same logical element
/// always compute the same name and therefore find each other's resource.
pub fn bridge_network_name<P: AsRef<str>>(project_id: P) -> String {
    format!("bridge_net_{}", project_id.as_ref())
}

/// Deterministic name of the bridge subnet of a project.
pub fn bridge_subnet_name<P: AsRef<str>>(project_id: P) -> String {
    format!("bridge_subnet_{}", project_id.as_ref())
}

/// Deterministic name of the bridge port of a router.
pub fn bridge_port_name<P: AsRef<str>, R: AsRef<str>>(project_id: P, router_id: R) -> String {
    format!("bridge_port_{}_{}", project_id.as_ref(), router_id.as_ref())
}

/// Deterministic name of the shadow copy of a port.
pub fn shadow_port_name<P: AsRef<str>>(port_id: P) -> String {
    format!("shadow_port_{}", port_id.as_ref())
}

/// Deterministic name of the dhcp port of a subnet.
pub fn dhcp_port_name<S: AsRef<str>>(subnet_id: S) -> String {
    format!("dhcp_port_{}", subnet_id.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ResourceKind::Network,
            ResourceKind::Subnet,
            ResourceKind::Port,
            ResourceKind::Router,
            ResourceKind::SecurityGroup,
            ResourceKind::ShadowPort,
            ResourceKind::BridgeNetwork,
            ResourceKind::BridgeSubnet,
            ResourceKind::BridgePort,
        ] {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            "flavor".parse::<ResourceKind>().unwrap_err(),
            UnknownResourceKind("flavor".into())
        );
    }

    #[test]
    fn test_deterministic_names() {
        assert_eq!(bridge_network_name("p1"), "bridge_net_p1");
        assert_eq!(bridge_port_name("p1", "r2"), "bridge_port_p1_r2");
        assert_eq!(shadow_port_name("uuid"), "shadow_port_uuid");
    }
}
