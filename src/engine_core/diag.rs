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

//! Diagnostic findings.
//!
//! A `Finding` pairs a catalog `MessageType` with the origin it is attributed
//! to and its formatted arguments. Rendering beyond `Display` is left to the
//! host.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::engine_core::constants::codes;
use crate::engine_core::errors::AnalysisError;
use crate::engine_core::types::Origin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    fn short(&self) -> &'static str {
        match self {
            Severity::Warning => "Warn",
            Severity::Error => "Error",
        }
    }
}

/// Catalog entry. `template` uses `{}` placeholders filled in argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageType {
    pub code: &'static str,
    pub severity: Severity,
    pub template: &'static str,
}

pub const GATEWAY_OVERLAPS: MessageType = MessageType {
    code: codes::GATEWAY_OVERLAPS,
    severity: Severity::Warning,
    template: "The gateway's server on port {} with host {} overlaps with {} with host {}. Only one will take effect.",
};

pub const SCHEMA_VALIDATION_ERROR: MessageType = MessageType {
    code: codes::SCHEMA_VALIDATION_ERROR,
    severity: Severity::Error,
    template: "The resource has one or more schema validation errors: {}",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(rename = "code", serialize_with = "serialize_code")]
    pub message_type: MessageType,
    pub severity: Severity,
    pub origin: Origin,
    pub args: Vec<String>,
}

fn serialize_code<S: Serializer>(mt: &MessageType, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(mt.code)
}

impl Finding {
    pub fn new(message_type: MessageType, origin: Origin, args: Vec<String>) -> Self {
        Self {
            severity: message_type.severity,
            message_type,
            origin,
            args,
        }
    }

    /// Gateway `origin` has a server on `port` whose `host` overlaps
    /// `other_host` of `other_gateway`.
    pub fn gateway_overlaps(
        origin: Origin,
        port: u32,
        host: &str,
        other_gateway: &str,
        other_host: &str,
    ) -> Self {
        Self::new(
            GATEWAY_OVERLAPS,
            origin,
            vec![
                port.to_string(),
                host.to_string(),
                other_gateway.to_string(),
                other_host.to_string(),
            ],
        )
    }

    pub fn schema_validation_error(origin: Origin, err: &AnalysisError) -> Self {
        Self::new(SCHEMA_VALIDATION_ERROR, origin, vec![err.to_string()])
    }

    pub fn code(&self) -> &'static str {
        self.message_type.code
    }

    /// Template with arguments substituted. Missing arguments render empty.
    pub fn message(&self) -> String {
        let mut out = String::with_capacity(self.message_type.template.len());
        let mut args = self.args.iter();
        let mut pieces = self.message_type.template.split("{}").peekable();
        while let Some(piece) = pieces.next() {
            out.push_str(piece);
            if pieces.peek().is_some() {
                if let Some(arg) = args.next() {
                    out.push_str(arg);
                }
            }
        }
        out
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({}) {}",
            self.severity.short(),
            self.code(),
            self.origin,
            self.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_core::types::{ResourceKind, ResourceName};

    #[test]
    fn test_gateway_overlap_rendering() {
        let origin = Origin::new(ResourceKind::Gateway, ResourceName::new("a", "gw1"));
        let finding = Finding::gateway_overlaps(origin, 80, "*/host", "Gateway/b/gw2", "host");
        assert_eq!(finding.code(), "IST0107");
        assert_eq!(finding.severity, Severity::Warning);
        assert_eq!(
            finding.to_string(),
            "Warn [IST0107] (Gateway a/gw1) The gateway's server on port 80 with host */host \
             overlaps with Gateway/b/gw2 with host host. Only one will take effect."
        );
    }

    #[test]
    fn test_json_shape() {
        let origin = Origin::new(ResourceKind::Policy, ResourceName::new("ns", "p"));
        let err = AnalysisError::MalformedPolicy {
            targets: vec!["foo".to_string()],
        };
        let finding = Finding::schema_validation_error(origin, &err);
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["code"], "IST0106");
        assert_eq!(json["severity"], "Error");
        assert_eq!(json["origin"]["name"], "ns/p");
    }
}
