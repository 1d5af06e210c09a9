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

//! Snapshot analyzers.
//!
//! Each analyzer reads the resource kinds it declares from a snapshot and
//! returns findings. Analyzers share no state, so a host may run them
//! concurrently over the same read-only snapshot.

pub mod gateway;
pub mod mtls;

use tracing::info;

use crate::config::Config;
use crate::engine_core::diag::Finding;
use crate::engine_core::traits::{Analyzer, Snapshot};

pub use gateway::GatewayOverlapAnalyzer;
pub use mtls::MtlsAnalyzer;

/// Every built-in analyzer, configured from `config`.
pub fn all(config: &Config) -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(MtlsAnalyzer::new(config.cluster_domain.clone())),
        Box::new(GatewayOverlapAnalyzer),
    ]
}

/// Run every built-in analyzer in sequence and concatenate their findings.
pub fn run_all(config: &Config, snapshot: &dyn Snapshot) -> Vec<Finding> {
    let mut findings = Vec::new();
    for analyzer in all(config) {
        let found = analyzer.analyze(snapshot);
        info!(
            analyzer = analyzer.metadata().name,
            findings = found.len(),
            "Analyzer finished"
        );
        findings.extend(found);
    }
    findings
}
