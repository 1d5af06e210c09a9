use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const OVERLAPPING_GATEWAYS: &str = r#"
apiVersion: networking.istio.io/v1alpha3
kind: Gateway
metadata:
  name: public
  namespace: team-a
spec:
  selector:
    istio: ingressgateway
  servers:
  - port:
      number: 80
      protocol: HTTP
    hosts:
    - "*.example.com"
---
apiVersion: networking.istio.io/v1alpha3
kind: Gateway
metadata:
  name: api
  namespace: team-b
spec:
  selector:
    istio: ingressgateway
  servers:
  - port:
      number: 80
      protocol: HTTP
    hosts:
    - "api.example.com"
"#;

const NAMESPACE_POLICY: &str = r#"
apiVersion: authentication.istio.io/v1alpha1
kind: Policy
metadata:
  name: default
  namespace: my-namespace
spec:
  peers:
  - mtls: {}
"#;

fn manifest(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write manifest");
    file
}

fn meshcheck() -> Command {
    // Use env!("CARGO_BIN_EXE_meshcheck") provided by cargo for integration tests.
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_meshcheck"));
    cmd.env_remove("RUST_LOG")
        .env_remove("MESHCHECK_OUTPUT")
        .env_remove("MESHCHECK_CLUSTER_DOMAIN");
    cmd
}

#[test]
fn test_binary_help() {
    meshcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("mtls"));
}

#[test]
fn test_analyze_reports_overlap_as_warning() {
    let file = manifest(OVERLAPPING_GATEWAYS);
    meshcheck()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Warn [IST0107] (Gateway team-a/public"))
        .stdout(predicate::str::contains("overlaps with Gateway/team-a/public"));
}

#[test]
fn test_fail_on_warning_sets_exit_status() {
    let file = manifest(OVERLAPPING_GATEWAYS);
    meshcheck()
        .arg("analyze")
        .arg("--fail-on-warning")
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn test_analyze_json_output() {
    let file = manifest(OVERLAPPING_GATEWAYS);
    let output = meshcheck()
        .args(["--output", "json", "analyze"])
        .arg(file.path())
        .output()
        .expect("run meshcheck");
    assert!(output.status.success());

    let findings: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let findings = findings.as_array().expect("array");
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0]["code"], "IST0107");
    assert_eq!(findings[0]["args"][0], "80");
}

#[test]
fn test_analyze_clean_snapshot() {
    let file = manifest(NAMESPACE_POLICY);
    meshcheck()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No validation issues found."));
}

#[test]
fn test_analyze_missing_file_fails() {
    meshcheck()
        .args(["analyze", "/nonexistent/meshcheck.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_mtls_enforced_by_namespace() {
    let file = manifest(NAMESPACE_POLICY);
    meshcheck()
        .arg("mtls")
        .arg(file.path())
        .args(["--fqdn", "foobar.my-namespace.svc.cluster.local", "--port-number", "8080"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enforced (namespace:my-namespace)"));
}

#[test]
fn test_mtls_not_enforced_elsewhere() {
    let file = manifest(NAMESPACE_POLICY);
    meshcheck()
        .arg("mtls")
        .arg(file.path())
        .args(["--fqdn", "foobar.other.svc.cluster.local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not enforced"));
}

#[test]
fn test_mtls_port_flags_conflict() {
    let file = manifest(NAMESPACE_POLICY);
    meshcheck()
        .arg("mtls")
        .arg(file.path())
        .args(["--fqdn", "a.b.svc.cluster.local", "--port-number", "1", "--port-name", "http"])
        .assert()
        .failure();
}

#[test]
fn test_analyze_unparseable_manifest_reports_source() {
    let file = manifest("kind: Gateway\nmetadata:\n  name: gw\nspec:\n  servers: 12\n");
    meshcheck()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse"));
}

#[test]
fn test_mtls_json_output() {
    let file = manifest(NAMESPACE_POLICY);
    let output = meshcheck()
        .args(["--output", "json", "mtls"])
        .arg(file.path())
        .args(["--fqdn", "foobar.my-namespace.svc.cluster.local", "--port-name", "http"])
        .output()
        .expect("run meshcheck");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["enforced"], true);
    assert_eq!(report["scope"], "namespace:my-namespace");
    assert_eq!(report["workload"]["fqdn"], "foobar.my-namespace.svc.cluster.local");

    let file = manifest(NAMESPACE_POLICY);
    let output = meshcheck()
        .args(["--output", "json", "mtls"])
        .arg(file.path())
        .args(["--fqdn", "foobar.other.svc.cluster.local"])
        .output()
        .expect("run meshcheck");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["enforced"], false);
    assert!(report["scope"].is_null());
}
