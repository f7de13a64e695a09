//! `--out` results and their provenance sidecars.
//!
//! A result file `runs/eigen.json` gets `runs/eigen.provenance.json` next to
//! it, holding the tool version, the code revision and the typed inputs that
//! determine the result (formula, matrix source, probe vector, tolerance).

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Everything a command's JSON result depends on.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RunInputs {
    Area {
        u: [f64; 2],
        v: [f64; 2],
        point: Option<[f64; 2]>,
    },
    Eigen {
        /// Resolved row-major matrix, whatever its source.
        matrix: [[f64; 2]; 2],
        preset: Option<&'static str>,
        seed: Option<u64>,
        v: [f64; 2],
        tolerance: f64,
    },
    Validate {
        formula: String,
        normalized: String,
        /// Custom battery file; `None` means the five standard cases.
        cases: Option<PathBuf>,
        case_count: usize,
    },
    Evaluate {
        formula: String,
        u: [f64; 2],
        v: [f64; 2],
    },
    Hint {
        formula: String,
    },
    Presets,
    Report,
}

impl RunInputs {
    pub fn command(&self) -> &'static str {
        match self {
            RunInputs::Area { .. } => "area",
            RunInputs::Eigen { .. } => "eigen",
            RunInputs::Validate { .. } => "validate",
            RunInputs::Evaluate { .. } => "evaluate",
            RunInputs::Hint { .. } => "hint",
            RunInputs::Presets => "presets",
            RunInputs::Report => "report",
        }
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    tool_version: &'static str,
    code_rev: String,
    #[serde(flatten)]
    inputs: &'a RunInputs,
    result: &'a Path,
}

/// Write `output` as pretty JSON to `path`, then its sidecar. Returns the
/// sidecar path.
pub fn write_result(path: &Path, inputs: &RunInputs, output: &Value) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output dir {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_vec_pretty(output)?)
        .with_context(|| format!("writing {}", path.display()))?;

    let sidecar = sidecar_path(path);
    let doc = Sidecar {
        tool_version: detlab::VERSION,
        code_rev: code_rev(),
        inputs,
        result: path,
    };
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

fn sidecar_path(result: &Path) -> PathBuf {
    result.with_extension("provenance.json")
}

/// Revision from `GIT_COMMIT` (build time, then run time), else `git`.
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_result() {
        assert_eq!(
            sidecar_path(Path::new("runs/eigen.json")),
            Path::new("runs/eigen.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("locks")),
            Path::new("locks.provenance.json")
        );
    }

    #[test]
    fn eigen_sidecar_records_matrix_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runs").join("lock-a.json");
        let inputs = RunInputs::Eigen {
            matrix: [[2.0, 0.0], [0.0, 3.0]],
            preset: Some("lock-a"),
            seed: None,
            v: [0.0, 1.0],
            tolerance: 0.02,
        };
        let sidecar = write_result(&path, &inputs, &json!({ "is_eigenvector": true })).unwrap();

        let written: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(written["is_eigenvector"], true);
        let prov: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(prov["command"], "eigen");
        assert_eq!(prov["matrix"], json!([[2.0, 0.0], [0.0, 3.0]]));
        assert_eq!(prov["preset"], "lock-a");
        assert_eq!(prov["seed"], Value::Null);
        assert_eq!(prov["tolerance"], 0.02);
        assert_eq!(prov["tool_version"], detlab::VERSION);
        assert_eq!(prov["result"], path.to_string_lossy().as_ref());
    }

    #[test]
    fn unit_commands_are_tagged_only() {
        let value = serde_json::to_value(RunInputs::Presets).unwrap();
        assert_eq!(value, json!({ "command": "presets" }));
        assert_eq!(RunInputs::Report.command(), "report");
    }
}
