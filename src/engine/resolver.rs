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

//! Effective-policy resolution.
//!
//! Walks the policy index from the narrowest scope to the widest and stops at
//! the first scope with a confirmed strict policy.

use tracing::debug;

use crate::engine::policy_index::PolicyIndex;
use crate::engine_core::models::{ScopeKey, WorkloadKey};

pub struct EffectivePolicyResolver<'a> {
    index: &'a PolicyIndex,
}

impl<'a> EffectivePolicyResolver<'a> {
    pub fn new(index: &'a PolicyIndex) -> Self {
        Self { index }
    }

    /// Whether strict mTLS is effectively enforced for `workload`.
    pub fn is_enforced(&self, workload: &WorkloadKey) -> bool {
        self.deciding_scope(workload).is_some()
    }

    /// The scope that confirms enforcement, checked in order: exact
    /// workload+port, workload on any port, the fqdn's namespace, the mesh.
    pub fn deciding_scope(&self, workload: &WorkloadKey) -> Option<ScopeKey> {
        let candidates = [
            Some(ScopeKey::Workload(workload.clone())),
            Some(ScopeKey::Workload(workload.any_port())),
            workload
                .namespace()
                .map(|ns| ScopeKey::Namespace(ns.to_string())),
            Some(ScopeKey::Mesh),
        ];

        let found = candidates
            .into_iter()
            .flatten()
            .find(|scope| self.index.contains(scope));
        debug!(workload = %workload, scope = ?found, "Resolved mTLS enforcement");
        found
    }
}
