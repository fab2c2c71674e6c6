use crate::constants::{FINDINGS_FILE, SEMGREP_BIN, SEMGREP_RULESET};
use crate::error::MinerError;
use log::info;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

/// outer shape of a semgrep JSON report; anything that does not deserialize
/// into this counts as malformed engine output
#[derive(Debug, Deserialize)]
struct ScanReport {
    results: Vec<Value>,
    #[serde(default)]
    errors: Vec<Value>,
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub findings: usize,
}

/// run the security ruleset over an extracted commit folder
///
/// blocks until the engine finishes; with `--error` the engine exits 0 for a
/// clean scan and 1 when findings are present, so both are success. On
/// success the raw report is persisted as `semgrep_findings.json` in the
/// folder, overwriting any previous report. Any other exit code, a spawn
/// failure or an unparseable report is a `Scan` error and leaves no findings
/// file behind.
pub fn scan(folder: &Path) -> Result<ScanOutcome, MinerError> {
    info!("running {SEMGREP_BIN} scan on {}", folder.display());

    let output = Command::new(SEMGREP_BIN)
        .args(["scan", "--config", SEMGREP_RULESET])
        .args(["--json", "--error", "--quiet", "--metrics", "off"])
        .arg(folder)
        .output()
        .map_err(|e| MinerError::Scan(format!("failed to run {SEMGREP_BIN}: {e}")))?;

    if !scan_exit_ok(output.status.code()) {
        return Err(MinerError::Scan(format!(
            "{SEMGREP_BIN} exited with {:?}: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let report = parse_report(&output.stdout)?;

    let findings_path = folder.join(FINDINGS_FILE);
    fs::write(&findings_path, &output.stdout)?;

    if !report.errors.is_empty() {
        info!("scan reported {} rule errors", report.errors.len());
    }
    info!("saved scan report to {}", findings_path.display());
    Ok(ScanOutcome {
        findings: report.results.len(),
    })
}

/// clean-scan and findings-present exits are success, anything else failed
fn scan_exit_ok(code: Option<i32>) -> bool {
    matches!(code, Some(0) | Some(1))
}

fn parse_report(stdout: &[u8]) -> Result<ScanReport, MinerError> {
    serde_json::from_slice(stdout)
        .map_err(|e| MinerError::Scan(format!("unparseable {SEMGREP_BIN} report: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_zero_and_one_are_success() {
        assert!(scan_exit_ok(Some(0)));
        assert!(scan_exit_ok(Some(1)));
    }

    #[test]
    fn other_exits_are_failures() {
        assert!(!scan_exit_ok(Some(2)));
        assert!(!scan_exit_ok(Some(127)));
        // killed by signal
        assert!(!scan_exit_ok(None));
    }

    #[test]
    fn well_formed_report_parses() {
        let body = br#"{"results": [{"check_id": "rule"}], "errors": [], "paths": {}}"#;
        let report = parse_report(body).unwrap();
        assert_eq!(report.results.len(), 1);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn malformed_report_is_a_scan_error() {
        assert!(matches!(parse_report(b"not json"), Err(MinerError::Scan(_))));
        // valid JSON but not a report
        assert!(matches!(parse_report(b"[1, 2]"), Err(MinerError::Scan(_))));
    }

    #[test]
    fn missing_engine_is_a_scan_error_not_a_panic() {
        let dir = tempfile::TempDir::new().unwrap();
        // a folder scan only fails cleanly when the engine is unavailable or
        // unable to load rules; either way no findings file may appear
        if let Err(e) = scan(dir.path()) {
            assert!(matches!(e, MinerError::Scan(_)));
            assert!(!dir.path().join(FINDINGS_FILE).exists());
        }
    }
}
