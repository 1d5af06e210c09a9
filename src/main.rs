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

// Main entry point for meshcheck
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use meshcheck::analyzers::{self, MtlsAnalyzer};
use meshcheck::config::{Config, OutputFormat};
use meshcheck::engine_core::diag::{Finding, Severity};
use meshcheck::engine_core::models::WorkloadKey;
use meshcheck::snapshot::InMemorySnapshot;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log filter (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: text or json (overrides LOG_FORMAT)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Output format: text or json (overrides MESHCHECK_OUTPUT)
    #[arg(long, global = true)]
    output: Option<String>,

    /// Kubernetes cluster domain used to qualify service names
    #[arg(long, global = true)]
    cluster_domain: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every analyzer over the given manifests
    Analyze {
        /// Multi-document YAML manifests
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Exit non-zero on warnings too
        #[arg(long)]
        fail_on_warning: bool,
    },
    /// Report whether strict mTLS is enforced for a workload
    Mtls {
        /// Multi-document YAML manifests
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Fully-qualified service name, e.g. foo.bar.svc.cluster.local
        #[arg(long)]
        fqdn: String,

        /// Port number to check
        #[arg(long, conflicts_with = "port_name")]
        port_number: Option<u32>,

        /// Port name to check
        #[arg(long)]
        port_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    install_panic_hook();

    let mut config = Config::from_env().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config from env, using defaults: {}",
            e
        );
        Config::default()
    });

    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(output) = cli.output.as_deref() {
        config.output_format = OutputFormat::parse_safe(output);
    }
    if let Some(domain) = cli.cluster_domain {
        config.cluster_domain = domain;
    }
    config.validate()?;

    init_tracing(&config);

    match cli.command {
        Command::Analyze {
            files,
            fail_on_warning,
        } => analyze(&config, &files, fail_on_warning).await,
        Command::Mtls {
            files,
            fqdn,
            port_number,
            port_name,
        } => {
            let workload = match (port_number, port_name) {
                (Some(n), _) => WorkloadKey::with_port_number(fqdn, n),
                (None, Some(name)) => WorkloadKey::with_port_name(fqdn, name),
                (None, None) => WorkloadKey::new(fqdn),
            };
            check_mtls(&config, &files, &workload).await
        }
    }
}

async fn load_snapshot(files: &[PathBuf]) -> anyhow::Result<InMemorySnapshot> {
    let paths = files.to_vec();
    let snapshot = tokio::task::spawn_blocking(move || InMemorySnapshot::from_paths(&paths))
        .await?
        .map_err(|e| {
            error!(error = %e, "Snapshot load failed");
            anyhow::anyhow!(e.user_message())
        })?;
    info!(files = files.len(), resources = snapshot.len(), "Snapshot loaded");
    Ok(snapshot)
}

async fn analyze(
    config: &Config,
    files: &[PathBuf],
    fail_on_warning: bool,
) -> anyhow::Result<ExitCode> {
    let snapshot = Arc::new(load_snapshot(files).await?);

    // Analyzers share nothing but the read-only snapshot.
    let tasks = analyzers::all(config).into_iter().map(|analyzer| {
        let snapshot = Arc::clone(&snapshot);
        tokio::task::spawn_blocking(move || analyzer.analyze(&*snapshot))
    });
    let findings: Vec<Finding> = futures::future::try_join_all(tasks)
        .await?
        .into_iter()
        .flatten()
        .collect();

    print_findings(config.output_format, &findings)?;

    let threshold = if fail_on_warning {
        Severity::Warning
    } else {
        Severity::Error
    };
    if findings.iter().any(|f| f.severity >= threshold) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_findings(format: OutputFormat, findings: &[Finding]) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(findings)?),
        _ if findings.is_empty() => println!("No validation issues found."),
        _ => {
            for finding in findings {
                println!("{}", finding);
            }
        }
    }
    Ok(())
}

async fn check_mtls(
    config: &Config,
    files: &[PathBuf],
    workload: &WorkloadKey,
) -> anyhow::Result<ExitCode> {
    let snapshot = load_snapshot(files).await?;
    let (index, malformed) = MtlsAnalyzer::new(config.cluster_domain.clone()).build_index(&snapshot);
    for finding in &malformed {
        eprintln!("{}", finding);
    }

    let scope = index.resolver().deciding_scope(workload);
    match config.output_format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "workload": workload,
                "enforced": scope.is_some(),
                "scope": scope.as_ref().map(|s| s.to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => match scope {
            Some(scope) => println!("{}: enforced ({})", workload, scope),
            None => println!("{}: not enforced", workload),
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("PANIC: {} at {}", message, location);
    }));
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("meshcheck=info,warn"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
