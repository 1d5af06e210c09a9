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

// Domain error types

use thiserror::Error;

/// Main error type for snapshot loading and policy ingestion
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// One or more port selectors name neither a port name nor a port number.
    /// Recoverable: ingestion of the remaining policies continues.
    #[error(
        "Malformed policy: port selector for target(s) {} has no name or number",
        .targets.join(", ")
    )]
    MalformedPolicy { targets: Vec<String> },

    /// A manifest could not be decoded
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// A manifest of a known kind is missing its identity
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A manifest file could not be read
    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    /// Get user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::MalformedPolicy { targets } => format!(
                "Policy port selectors for {} need a name or a number",
                targets.join(", ")
            ),
            AnalysisError::Parse { source_name, .. } => {
                format!("Could not parse {}", source_name)
            }
            AnalysisError::UnknownResource(reason) => format!("Invalid resource: {}", reason),
            AnalysisError::ConfigurationError(reason) => {
                format!("Invalid configuration: {}", reason)
            }
            AnalysisError::IoError { path, .. } => format!("Failed to read {}", path),
        }
    }

    pub(crate) fn parse(source_name: &str, err: impl std::fmt::Display) -> Self {
        AnalysisError::Parse {
            source_name: source_name.to_string(),
            message: err.to_string(),
        }
    }
}
