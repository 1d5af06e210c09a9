// Copyright 2026 BadCompany
//
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

//! Domain models for meshcheck.
//!
//! This module contains pure data structures representing peer-authentication
//! policies, gateways, and the scope keys the policy index records decisions
//! under. It is designed to be free of I/O side effects.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::engine_core::types::Origin;
use crate::utils::names;

/// Port part of a workload key.
///
/// A port is selected by name or by number, never both; `Any` stands for
/// every port of the workload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortSelector {
    Any,
    Name(String),
    Number(u32),
}

impl PortSelector {
    /// Build a selector from an authored port entry. A non-empty name wins
    /// over a number; zero counts as "no number".
    pub fn from_spec(spec: &PortSelectorSpec) -> Option<Self> {
        if let Some(name) = spec.name.as_deref().filter(|n| !n.is_empty()) {
            return Some(PortSelector::Name(name.to_string()));
        }
        match spec.number {
            Some(n) if n != 0 => Some(PortSelector::Number(n)),
            _ => None,
        }
    }
}

impl fmt::Display for PortSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSelector::Any => f.write_str("*"),
            PortSelector::Name(name) => f.write_str(name),
            PortSelector::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Identifies a policy target or a lookup target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkloadKey {
    pub fqdn: String,
    pub port: PortSelector,
}

impl WorkloadKey {
    /// Key covering every port of the workload
    pub fn new(fqdn: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            port: PortSelector::Any,
        }
    }

    pub fn with_port_name(fqdn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            port: PortSelector::Name(name.into()),
        }
    }

    pub fn with_port_number(fqdn: impl Into<String>, number: u32) -> Self {
        Self {
            fqdn: fqdn.into(),
            port: PortSelector::Number(number),
        }
    }

    /// Same workload, any port
    pub fn any_port(&self) -> Self {
        Self::new(self.fqdn.clone())
    }

    /// Namespace encoded in the fqdn, if the fqdn has one
    pub fn namespace(&self) -> Option<&str> {
        names::namespace_of(&self.fqdn)
    }
}

impl fmt::Display for WorkloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.fqdn, self.port)
    }
}

/// Granularity at which an enforcement decision is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKey {
    Mesh,
    Namespace(String),
    Workload(WorkloadKey),
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::Mesh => f.write_str("mesh"),
            ScopeKey::Namespace(ns) => write!(f, "namespace:{}", ns),
            ScopeKey::Workload(w) => write!(f, "workload:{}", w),
        }
    }
}

/// Mutual TLS mode of a peer authentication method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MtlsMode {
    #[default]
    Strict,
    Permissive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutualTls {
    #[serde(default)]
    pub mode: MtlsMode,
    #[serde(default)]
    pub allow_tls: bool,
}

/// One peer authentication method of a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PeerAuthMethodSpec", into = "PeerAuthMethodSpec")]
pub enum PeerAuthMethod {
    Mtls(MutualTls),
    /// Any non-mTLS method (e.g. JWT); irrelevant to enforcement.
    Other,
}

/// Wire form of a peer method: `{mtls: {...}}`, `{mtls: null}` or anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PeerAuthMethodSpec {
    #[serde(
        default,
        deserialize_with = "present_or_default",
        skip_serializing_if = "Option::is_none"
    )]
    mtls: Option<MutualTls>,
}

/// Called only when the key is present, so `mtls:` with a null value still
/// yields a default (strict) method.
fn present_or_default<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(|v| Some(v.unwrap_or_default()))
}

impl From<PeerAuthMethodSpec> for PeerAuthMethod {
    fn from(spec: PeerAuthMethodSpec) -> Self {
        match spec.mtls {
            Some(mtls) => PeerAuthMethod::Mtls(mtls),
            None => PeerAuthMethod::Other,
        }
    }
}

impl From<PeerAuthMethod> for PeerAuthMethodSpec {
    fn from(method: PeerAuthMethod) -> Self {
        match method {
            PeerAuthMethod::Mtls(mtls) => PeerAuthMethodSpec { mtls: Some(mtls) },
            PeerAuthMethod::Other => PeerAuthMethodSpec { mtls: None },
        }
    }
}

/// Port entry on a policy target, as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSelectorSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl PortSelectorSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: None,
        }
    }

    pub fn numbered(number: u32) -> Self {
        Self {
            name: None,
            number: Some(number),
        }
    }
}

/// Workload a policy applies to, by short name within the policy's namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSelector {
    pub name: String,
    #[serde(default)]
    pub ports: Vec<PortSelectorSpec>,
}

/// Peer-authentication policy record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    #[serde(default)]
    pub targets: Vec<TargetSelector>,
    #[serde(default)]
    pub peers: Vec<PeerAuthMethod>,
    #[serde(default)]
    pub peer_is_optional: bool,
}

/// A listener declared by a gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(deserialize_with = "port_number")]
    pub port: u32,
    #[serde(default)]
    pub hosts: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortSpec {
    Number(u32),
    Detailed { number: u32 },
}

/// Accepts `port: 80` as well as the CRD form `port: {number: 80, ...}`.
fn port_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PortSpec::deserialize(deserializer)? {
        PortSpec::Number(n) | PortSpec::Detailed { number: n } => n,
    })
}

/// Gateway record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRecord {
    #[serde(default)]
    pub selector: BTreeMap<String, String>,
    #[serde(default)]
    pub servers: Vec<Server>,
}

/// Typed body of a snapshot entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Policy(PolicyRecord),
    Gateway(GatewayRecord),
}

/// One resource in a snapshot, with the origin findings are attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub origin: Origin,
    pub resource: Resource,
}

impl Entry {
    pub fn as_policy(&self) -> Option<&PolicyRecord> {
        match self.resource {
            Resource::Policy(ref p) => Some(p),
            _ => None,
        }
    }

    pub fn as_gateway(&self) -> Option<&GatewayRecord> {
        match self.resource {
            Resource::Gateway(ref g) => Some(g),
            _ => None,
        }
    }

    /// Namespace the resource lives in (empty for cluster-scoped)
    pub fn namespace(&self) -> &str {
        self.origin.name.namespace()
    }
}
