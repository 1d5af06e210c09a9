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

//! Mutual TLS policy analyzer.
//!
//! Builds the policy index for a snapshot. Malformed policies do not stop
//! the pass; each one is reported as a schema validation finding and the
//! rest of the snapshot is still ingested.

use tracing::{info, warn};

use crate::engine::policy_index::PolicyIndex;
use crate::engine_core::constants::{analyzers, naming};
use crate::engine_core::diag::Finding;
use crate::engine_core::traits::{Analyzer, AnalyzerMetadata, Snapshot};
use crate::engine_core::types::ResourceKind;

#[derive(Debug, Clone)]
pub struct MtlsAnalyzer {
    cluster_domain: String,
}

impl Default for MtlsAnalyzer {
    fn default() -> Self {
        Self::new(naming::DEFAULT_CLUSTER_DOMAIN)
    }
}

impl MtlsAnalyzer {
    pub fn new(cluster_domain: impl Into<String>) -> Self {
        Self {
            cluster_domain: cluster_domain.into(),
        }
    }

    /// Ingest every mesh and namespaced policy in `snapshot`.
    ///
    /// Returns the index for enforcement queries together with findings for
    /// the policies that could only be partially ingested.
    pub fn build_index(&self, snapshot: &dyn Snapshot) -> (PolicyIndex, Vec<Finding>) {
        let mut index = PolicyIndex::with_cluster_domain(self.cluster_domain.clone());
        let mut findings = Vec::new();

        for entry in snapshot.list_by_kind(ResourceKind::MeshPolicy) {
            let Some(policy) = entry.as_policy() else {
                continue;
            };
            if entry.origin.name.name() != naming::DEFAULT_MESH_POLICY_NAME {
                warn!(origin = %entry.origin, "Ignoring mesh policy not named 'default'");
                continue;
            }
            index.add_mesh_policy(policy);
        }

        for entry in snapshot.list_by_kind(ResourceKind::Policy) {
            let Some(policy) = entry.as_policy() else {
                continue;
            };
            if let Err(e) = index.add_scoped_policy(entry.namespace(), policy) {
                warn!(origin = %entry.origin, error = %e, "Policy partially ingested");
                findings.push(Finding::schema_validation_error(entry.origin.clone(), &e));
            }
        }

        info!(
            scopes = index.len(),
            malformed = findings.len(),
            "Built mTLS policy index"
        );
        (index, findings)
    }
}

impl Analyzer for MtlsAnalyzer {
    fn metadata(&self) -> AnalyzerMetadata {
        AnalyzerMetadata {
            name: analyzers::MTLS,
            inputs: vec![ResourceKind::MeshPolicy, ResourceKind::Policy],
        }
    }

    fn analyze(&self, snapshot: &dyn Snapshot) -> Vec<Finding> {
        self.build_index(snapshot).1
    }
}
