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

//! meshcheck Constants - Single source of truth for well-known values.
//!
//! This module centralizes diagnostic codes, naming
//! defaults and configuration keys.

/// Diagnostic message codes
pub mod codes {
    /// The resource failed structural validation
    pub const SCHEMA_VALIDATION_ERROR: &str = "IST0106";
    /// Two gateways claim overlapping hosts on the same port
    pub const GATEWAY_OVERLAPS: &str = "IST0107";
}

/// Hostname and naming conventions
pub mod naming {
    /// Wildcard used for both namespace scope and domain pattern
    pub const WILDCARD: &str = "*";
    /// Self-namespace shorthand in a gateway host
    pub const SELF_NAMESPACE: &str = ".";
    /// Separator between namespace scope and domain in a gateway host
    pub const NAMESPACE_SEPARATOR: char = '/';
    /// Service subdomain inserted between namespace and cluster domain
    pub const SERVICE_SUBDOMAIN: &str = "svc";
    /// Default Kubernetes cluster domain
    pub const DEFAULT_CLUSTER_DOMAIN: &str = "cluster.local";
    /// Namespace assumed for namespaced manifests that omit one
    pub const DEFAULT_NAMESPACE: &str = "default";
    /// The only mesh-wide policy name the mesh honours
    pub const DEFAULT_MESH_POLICY_NAME: &str = "default";
}

/// Analyzer names
pub mod analyzers {
    pub const MTLS: &str = "auth.MTLSAnalyzer";
    pub const GATEWAY_OVERLAP: &str = "gateway.OverlappingGatewayAnalyzer";
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
    pub const ENV_CLUSTER_DOMAIN: &str = "MESHCHECK_CLUSTER_DOMAIN";
    pub const ENV_OUTPUT_FORMAT: &str = "MESHCHECK_OUTPUT";
}
