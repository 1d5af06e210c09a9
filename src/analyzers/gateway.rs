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

//! Overlapping gateway analyzer.

use crate::engine::gateway_overlap::{self, GatewayView};
use crate::engine_core::constants::analyzers;
use crate::engine_core::diag::Finding;
use crate::engine_core::traits::{Analyzer, AnalyzerMetadata, Snapshot};
use crate::engine_core::types::ResourceKind;

/// Reports gateways whose hosts overlap on a shared port and selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayOverlapAnalyzer;

impl Analyzer for GatewayOverlapAnalyzer {
    fn metadata(&self) -> AnalyzerMetadata {
        AnalyzerMetadata {
            name: analyzers::GATEWAY_OVERLAP,
            inputs: vec![ResourceKind::Gateway],
        }
    }

    fn analyze(&self, snapshot: &dyn Snapshot) -> Vec<Finding> {
        let gateways: Vec<GatewayView<'_>> = snapshot
            .list_by_kind(ResourceKind::Gateway)
            .into_iter()
            .filter_map(GatewayView::from_entry)
            .collect();
        gateway_overlap::find_overlaps(&gateways)
    }
}
