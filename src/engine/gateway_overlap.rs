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

//! Gateway overlap detection.
//!
//! Two gateways conflict when they select the same workloads, listen on the
//! same port, and declare hosts that could match the same request. Only one
//! of them will take effect, so each side of every conflict is reported.

use tracing::debug;

use crate::engine::host_matcher;
use crate::engine_core::diag::Finding;
use crate::engine_core::models::{Entry, GatewayRecord};
use crate::engine_core::types::Origin;

/// A gateway record together with the resource it came from.
#[derive(Debug, Clone, Copy)]
pub struct GatewayView<'a> {
    pub origin: &'a Origin,
    pub gateway: &'a GatewayRecord,
}

impl<'a> GatewayView<'a> {
    pub fn new(origin: &'a Origin, gateway: &'a GatewayRecord) -> Self {
        Self { origin, gateway }
    }

    pub fn from_entry(entry: &'a Entry) -> Option<Self> {
        entry.as_gateway().map(|gateway| Self::new(&entry.origin, gateway))
    }

    fn namespace(&self) -> &str {
        self.origin.name.namespace()
    }
}

/// Every overlapping (gateway, gateway, server, server, host, host)
/// combination, reported once from each side.
pub fn find_overlaps(gateways: &[GatewayView<'_>]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (i, gw1) in gateways.iter().enumerate() {
        for gw2 in &gateways[i + 1..] {
            // Live workload matching is unavailable; equal selectors stand in
            // for "applies to the same workloads".
            if gw1.gateway.selector != gw2.gateway.selector {
                continue;
            }
            collect_pair(gw1, gw2, &mut findings);
        }
    }

    debug!(
        gateways = gateways.len(),
        findings = findings.len(),
        "Gateway overlap scan complete"
    );
    findings
}

fn collect_pair(gw1: &GatewayView<'_>, gw2: &GatewayView<'_>, findings: &mut Vec<Finding>) {
    for sv1 in &gw1.gateway.servers {
        for sv2 in gw2.gateway.servers.iter().filter(|sv2| sv2.port == sv1.port) {
            for h1 in &sv1.hosts {
                for h2 in &sv2.hosts {
                    if !host_matcher::hosts_overlap(gw1.namespace(), h1, gw2.namespace(), h2) {
                        continue;
                    }
                    findings.push(Finding::gateway_overlaps(
                        gw1.origin.clone(),
                        sv1.port,
                        h1,
                        &gw2.origin.reference(),
                        h2,
                    ));
                    findings.push(Finding::gateway_overlaps(
                        gw2.origin.clone(),
                        sv2.port,
                        h2,
                        &gw1.origin.reference(),
                        h1,
                    ));
                }
            }
        }
    }
}
