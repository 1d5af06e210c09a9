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

//! Resource identity types.
//!
//! Strongly typed names for the kinds of configuration the analyzers read,
//! and the origin a diagnostic is attributed to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


/// Resource kinds the analyzers know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    MeshPolicy,
    Policy,
    Gateway,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::MeshPolicy,
        ResourceKind::Policy,
        ResourceKind::Gateway,
    ];

    /// The `kind` field of a manifest of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::MeshPolicy => "MeshPolicy",
            ResourceKind::Policy => "Policy",
            ResourceKind::Gateway => "Gateway",
        }
    }

    /// Look a kind up by its manifest `kind` string.
    pub fn from_manifest_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespaced resource name. Cluster-scoped resources have an empty namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceName {
    namespace: String,
    name: String,
}

impl ResourceName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn cluster_scoped(name: impl Into<String>) -> Self {
        Self::new(String::new(), name)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}

impl FromStr for ResourceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = match s.split_once('/') {
            Some((ns, name)) => (ns, name),
            None => ("", s),
        };
        if name.is_empty() || name.contains('/') {
            return Err(format!("invalid resource name '{}'", s));
        }
        Ok(Self::new(namespace, name))
    }
}

impl TryFrom<String> for ResourceName {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ResourceName> for String {
    fn from(name: ResourceName) -> Self {
        name.to_string()
    }
}

/// Where a resource came from, used to attribute diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Origin {
    pub kind: ResourceKind,
    pub name: ResourceName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Origin {
    pub fn new(kind: ResourceKind, name: ResourceName) -> Self {
        Self {
            kind,
            name,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// `Kind/ns/name`, the form used when one resource refers to another.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.kind, self.name)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;
        if let Some(ref source) = self.source {
            write!(f, " ({})", source)?;
        }
        Ok(())
    }
}
