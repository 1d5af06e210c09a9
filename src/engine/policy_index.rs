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

//! Peer-authentication policy index.
//!
//! Records, per scope, whether a policy confirming strict mutual TLS has been
//! seen. Namespace and workload scopes live in an insert-only set: a key is
//! either confirmed or absent, and nothing is ever removed. The mesh scope is
//! a single flag that the (single) mesh-wide policy overwrites.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::engine::resolver::EffectivePolicyResolver;
use crate::engine_core::constants::naming;
use crate::engine_core::errors::AnalysisError;
use crate::engine_core::models::{
    MtlsMode, PeerAuthMethod, PolicyRecord, PortSelector, ScopeKey, WorkloadKey,
};
use crate::utils::names;

/// Whether `policy` makes mutual TLS mandatory for its peers.
///
/// Optional peer authentication never enforces. Otherwise the first mTLS
/// method that is neither permissive nor TLS-tolerant decides; non-mTLS
/// methods are ignored.
pub fn enforces_strict_mtls(policy: &PolicyRecord) -> bool {
    if policy.peer_is_optional {
        return false;
    }
    policy.peers.iter().any(|peer| match peer {
        PeerAuthMethod::Mtls(mtls) => !mtls.allow_tls && mtls.mode != MtlsMode::Permissive,
        PeerAuthMethod::Other => false,
    })
}

#[derive(Debug, Clone)]
pub struct PolicyIndex {
    mesh_strict: bool,
    strict: HashSet<ScopeKey>,
    cluster_domain: String,
}

impl Default for PolicyIndex {
    fn default() -> Self {
        Self::with_cluster_domain(naming::DEFAULT_CLUSTER_DOMAIN)
    }
}

impl PolicyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster_domain(cluster_domain: impl Into<String>) -> Self {
        Self {
            mesh_strict: false,
            strict: HashSet::new(),
            cluster_domain: cluster_domain.into(),
        }
    }

    /// Record the mesh-wide policy. Only one is meaningful, so this overwrites.
    pub fn add_mesh_policy(&mut self, policy: &PolicyRecord) {
        self.mesh_strict = enforces_strict_mtls(policy);
        debug!(strict = self.mesh_strict, "Recorded mesh policy");
    }

    /// Record a policy authored in `namespace`.
    ///
    /// Non-enforcing policies are ignored. A policy without targets covers the
    /// whole namespace; a target without ports covers every port of the
    /// workload. Port entries with neither name nor number are skipped and
    /// their targets reported together as `MalformedPolicy` once the rest of
    /// the policy has been ingested; keys already marked stay marked.
    pub fn add_scoped_policy(
        &mut self,
        namespace: &str,
        policy: &PolicyRecord,
    ) -> Result<(), AnalysisError> {
        if !enforces_strict_mtls(policy) {
            return Ok(());
        }

        if policy.targets.is_empty() {
            self.insert(ScopeKey::Namespace(namespace.to_string()));
            return Ok(());
        }

        let mut malformed: Vec<String> = Vec::new();
        for target in &policy.targets {
            let fqdn = names::convert_host_to_fqdn(namespace, &target.name, &self.cluster_domain);

            if target.ports.is_empty() {
                self.insert(ScopeKey::Workload(WorkloadKey::new(fqdn.clone())));
            }

            for port in &target.ports {
                match PortSelector::from_spec(port) {
                    Some(selector) => self.insert(ScopeKey::Workload(WorkloadKey {
                        fqdn: fqdn.clone(),
                        port: selector,
                    })),
                    None => {
                        warn!(
                            namespace,
                            target = %target.name,
                            "Policy port selector has no name or number; skipping"
                        );
                        if !malformed.contains(&target.name) {
                            malformed.push(target.name.clone());
                        }
                    }
                }
            }
        }

        if malformed.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::MalformedPolicy { targets: malformed })
        }
    }

    fn insert(&mut self, key: ScopeKey) {
        debug!(scope = %key, "Strict mTLS confirmed");
        self.strict.insert(key);
    }

    /// Whether strict mTLS has been confirmed at exactly this scope.
    pub fn contains(&self, key: &ScopeKey) -> bool {
        match key {
            ScopeKey::Mesh => self.mesh_strict,
            other => self.strict.contains(other),
        }
    }

    /// Number of confirmed scopes, the mesh included.
    pub fn len(&self) -> usize {
        self.strict.len() + usize::from(self.mesh_strict)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cluster_domain(&self) -> &str {
        &self.cluster_domain
    }

    pub fn resolver(&self) -> EffectivePolicyResolver<'_> {
        EffectivePolicyResolver::new(self)
    }
}
