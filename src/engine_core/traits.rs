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

//! Analysis seams.
//!
//! Defines the read-only snapshot interface the analyzers consume and the
//! analyzer interface the host drives.

use crate::engine_core::diag::Finding;
use crate::engine_core::models::Entry;
use crate::engine_core::types::ResourceKind;

/// Read-only view over an already-materialized configuration snapshot.
pub trait Snapshot: Send + Sync {
    /// Every entry of `kind`, each exactly once. No order is promised.
    fn list_by_kind(&self, kind: ResourceKind) -> Vec<&Entry>;
}

/// Static description of an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerMetadata {
    pub name: &'static str,
    pub inputs: Vec<ResourceKind>,
}

/// A single-pass check over a snapshot.
pub trait Analyzer: Send + Sync {
    fn metadata(&self) -> AnalyzerMetadata;

    /// Run to completion and return every finding. Never fails: malformed
    /// input is reported as a finding.
    fn analyze(&self, snapshot: &dyn Snapshot) -> Vec<Finding>;
}
