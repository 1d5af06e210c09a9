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

use crate::engine_core::constants::{config, naming};
use crate::engine_core::errors::AnalysisError;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse_safe(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,
    pub log_format: String, // "json" or "text"
    pub cluster_domain: String,
    pub output_format: OutputFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, AnalysisError> {
        let cfg = Self {
            log_level: env::var(config::ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
            log_format: env::var(config::ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string()),
            cluster_domain: env::var(config::ENV_CLUSTER_DOMAIN)
                .unwrap_or_else(|_| naming::DEFAULT_CLUSTER_DOMAIN.to_string()),
            output_format: OutputFormat::parse_safe(
                &env::var(config::ENV_OUTPUT_FORMAT).unwrap_or_else(|_| "text".to_string()),
            ),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings that would produce unusable fqdns.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let domain = self.cluster_domain.as_str();
        if domain.is_empty() || domain.starts_with('.') || domain.ends_with('.') {
            return Err(AnalysisError::ConfigurationError(format!(
                "invalid cluster domain '{}'",
                domain
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            cluster_domain: naming::DEFAULT_CLUSTER_DOMAIN.to_string(),
            output_format: OutputFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_falls_back_to_text() {
        assert_eq!(OutputFormat::parse_safe("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse_safe("yaml"), OutputFormat::Text);
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_cluster_domain() {
        for domain in ["", ".cluster.local", "cluster.local."] {
            let cfg = Config {
                cluster_domain: domain.to_string(),
                ..Config::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(AnalysisError::ConfigurationError(_))
            ));
        }
    }
}
