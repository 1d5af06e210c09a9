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

//! In-memory configuration snapshot.
//!
//! Holds already-decoded resources and serves them to analyzers by kind.
//! Manifests can be loaded from multi-document YAML in the shape of the
//! mesh's custom resources (`kind`, `metadata`, `spec`).

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::engine_core::constants::naming;
use crate::engine_core::errors::AnalysisError;
use crate::engine_core::models::{Entry, GatewayRecord, PolicyRecord, Resource};
use crate::engine_core::traits::Snapshot;
use crate::engine_core::types::{Origin, ResourceKind, ResourceName};

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: ManifestMetadata,
    #[serde(default)]
    spec: serde_yaml_ng::Value,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    namespace: Option<String>,
}

/// Snapshot backed by a vector of entries, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    entries: Vec<Entry>,
}

impl InMemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode every supported manifest in `text`. `source` names the input
    /// in origins and errors.
    pub fn from_yaml_str(source: &str, text: &str) -> Result<Self, AnalysisError> {
        let mut snapshot = Self::new();
        snapshot.extend_from_yaml_str(source, text)?;
        Ok(snapshot)
    }

    /// Read and decode each file in order. Each file is its own `source`.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, AnalysisError> {
        let mut snapshot = Self::new();
        for path in paths {
            let source = path.as_ref().display().to_string();
            let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::IoError {
                path: source.clone(),
                source: e,
            })?;
            snapshot.extend_from_yaml_str(&source, &text)?;
        }
        Ok(snapshot)
    }

    /// Append the manifests in `text`; returns how many entries were added.
    ///
    /// Empty documents and kinds no analyzer reads are skipped. A supported
    /// manifest that fails to decode aborts the load.
    pub fn extend_from_yaml_str(&mut self, source: &str, text: &str) -> Result<usize, AnalysisError> {
        let before = self.entries.len();
        for document in serde_yaml_ng::Deserializer::from_str(text) {
            let value = serde_yaml_ng::Value::deserialize(document)
                .map_err(|e| AnalysisError::parse(source, e))?;
            if value.is_null() {
                continue;
            }
            let manifest: Manifest =
                serde_yaml_ng::from_value(value).map_err(|e| AnalysisError::parse(source, e))?;
            if let Some(entry) = decode_manifest(source, manifest)? {
                self.entries.push(entry);
            }
        }
        let added = self.entries.len() - before;
        debug!(source, added, "Loaded manifests");
        Ok(added)
    }
}

fn decode_manifest(source: &str, manifest: Manifest) -> Result<Option<Entry>, AnalysisError> {
    let Some(kind) = manifest.kind.as_deref().and_then(ResourceKind::from_manifest_kind) else {
        debug!(source, kind = ?manifest.kind, "Skipping unsupported manifest");
        return Ok(None);
    };

    let name = manifest
        .metadata
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            AnalysisError::UnknownResource(format!("{} in {} has no metadata.name", kind, source))
        })?;

    let name = match kind {
        ResourceKind::MeshPolicy => ResourceName::cluster_scoped(name),
        ResourceKind::Policy | ResourceKind::Gateway => {
            let namespace = manifest
                .metadata
                .namespace
                .filter(|ns| !ns.is_empty())
                .unwrap_or_else(|| naming::DEFAULT_NAMESPACE.to_string());
            ResourceName::new(namespace, name)
        }
    };

    let resource = match kind {
        ResourceKind::MeshPolicy | ResourceKind::Policy => {
            Resource::Policy(decode_spec::<PolicyRecord>(source, manifest.spec)?)
        }
        ResourceKind::Gateway => {
            Resource::Gateway(decode_spec::<GatewayRecord>(source, manifest.spec)?)
        }
    };

    Ok(Some(Entry {
        origin: Origin::new(kind, name).with_source(source),
        resource,
    }))
}

fn decode_spec<T>(source: &str, spec: serde_yaml_ng::Value) -> Result<T, AnalysisError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if spec.is_null() {
        return Ok(T::default());
    }
    serde_yaml_ng::from_value(spec).map_err(|e| AnalysisError::parse(source, e))
}

impl Snapshot for InMemorySnapshot {
    fn list_by_kind(&self, kind: ResourceKind) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.origin.kind == kind)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFESTS: &str = r#"
apiVersion: authentication.istio.io/v1alpha1
kind: MeshPolicy
metadata:
  name: default
spec:
  peers:
  - mtls: {}
---
apiVersion: authentication.istio.io/v1alpha1
kind: Policy
metadata:
  name: foobar-strict
  namespace: my-namespace
spec:
  targets:
  - name: foobar
---
apiVersion: v1
kind: Service
metadata:
  name: ignored
---
apiVersion: networking.istio.io/v1alpha3
kind: Gateway
metadata:
  name: ingress
spec:
  selector:
    istio: ingressgateway
  servers:
  - port:
      number: 80
      protocol: HTTP
    hosts:
    - "*"
---
"#;

    #[test]
    fn test_loads_supported_kinds_only() {
        let snapshot = InMemorySnapshot::from_yaml_str("mesh.yaml", MANIFESTS).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.list_by_kind(ResourceKind::MeshPolicy).len(), 1);
        assert_eq!(snapshot.list_by_kind(ResourceKind::Policy).len(), 1);

        let gateways = snapshot.list_by_kind(ResourceKind::Gateway);
        assert_eq!(gateways.len(), 1);
        assert_eq!(gateways[0].origin.to_string(), "Gateway default/ingress (mesh.yaml)");
        assert_eq!(gateways[0].as_gateway().unwrap().servers[0].port, 80);
    }

    #[test]
    fn test_mesh_policy_is_cluster_scoped() {
        let snapshot = InMemorySnapshot::from_yaml_str("mesh.yaml", MANIFESTS).unwrap();
        let mesh = snapshot.list_by_kind(ResourceKind::MeshPolicy);
        assert_eq!(mesh[0].namespace(), "");
        assert_eq!(mesh[0].origin.name.name(), "default");
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = InMemorySnapshot::from_yaml_str("bad.yaml", "kind: Gateway\nspec: {}\n")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownResource(_)));
    }

    #[test]
    fn test_bad_spec_is_parse_error() {
        let text = "kind: Gateway\nmetadata:\n  name: gw\nspec:\n  servers: 12\n";
        let err = InMemorySnapshot::from_yaml_str("bad.yaml", text).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { ref source_name, .. } if source_name == "bad.yaml"));
    }

    #[test]
    fn test_from_paths_reads_files_in_order() {
        use std::io::Write;

        let mut first = tempfile::NamedTempFile::new().unwrap();
        first.write_all(MANIFESTS.as_bytes()).unwrap();
        let mut second = tempfile::NamedTempFile::new().unwrap();
        second
            .write_all(b"kind: Policy\nmetadata:\n  name: extra\n  namespace: ns\n")
            .unwrap();

        let snapshot = InMemorySnapshot::from_paths(&[first.path(), second.path()]).unwrap();
        assert_eq!(snapshot.len(), 4);
        let policies = snapshot.list_by_kind(ResourceKind::Policy);
        assert_eq!(policies[1].origin.name.to_string(), "ns/extra");
        assert_eq!(
            policies[1].origin.source.as_deref(),
            Some(second.path().display().to_string().as_str())
        );
    }

    #[test]
    fn test_from_paths_missing_file_is_io_error() {
        let err = InMemorySnapshot::from_paths(&["/nonexistent/meshcheck.yaml"]).unwrap_err();
        assert!(matches!(err, AnalysisError::IoError { ref path, .. } if path == "/nonexistent/meshcheck.yaml"));
        assert_eq!(err.user_message(), "Failed to read /nonexistent/meshcheck.yaml");
    }

    #[test]
    fn test_empty_spec_decodes_to_default() {
        let text = "kind: Policy\nmetadata:\n  name: p\n  namespace: ns\n";
        let snapshot = InMemorySnapshot::from_yaml_str("p.yaml", text).unwrap();
        let entry = snapshot.list_by_kind(ResourceKind::Policy)[0];
        assert_eq!(entry.as_policy(), Some(&PolicyRecord::default()));
    }
}
