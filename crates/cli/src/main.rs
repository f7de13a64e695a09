use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use detlab::area::Parallelogram;
use detlab::eigen::{detect, mat2, real_eigenpairs, DEFAULT_TOLERANCE};
use detlab::formula::{hint, normalize, FormulaCase, FormulaValidator};
use detlab::presets::{random_matrix, Preset};
use nalgebra::{Matrix2, Vector2};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::provenance::RunInputs;

mod provenance;

#[derive(Parser)]
#[command(name = "detlab")]
#[command(about = "Determinant and eigenvector lab: areas, formula checks, matrix locks")]
struct Cmd {
    /// Write the JSON result here (plus a provenance sidecar) instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Signed/absolute area of the parallelogram spanned by u and v
    Area {
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        u: Vector2<f64>,
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        v: Vector2<f64>,
        /// Optional point for the hit test
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        point: Option<Vector2<f64>>,
    },
    /// Check whether v is an eigenvector of a matrix (does the lock open?)
    Eigen {
        #[command(flatten)]
        source: MatrixSource,
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        v: Vector2<f64>,
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },
    /// Validate a determinant formula over a, b, c, d
    Validate {
        #[arg(long, allow_hyphen_values = true)]
        formula: String,
        /// JSON file of `[{"u": [x, y], "v": [x, y], "expected": n}, ...]`
        #[arg(long)]
        cases: Option<PathBuf>,
    },
    /// Evaluate a formula on one (u, v) pair
    Evaluate {
        #[arg(long, allow_hyphen_values = true)]
        formula: String,
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        u: Vector2<f64>,
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        v: Vector2<f64>,
    },
    /// Print the hint for a formula
    Hint {
        #[arg(long, allow_hyphen_values = true)]
        formula: String,
    },
    /// List the built-in matrices
    Presets,
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct MatrixSource {
    /// Row-major entries `m00,m01,m10,m11`
    #[arg(long, value_parser = parse_mat2, allow_hyphen_values = true)]
    matrix: Option<Matrix2<f64>>,
    /// Built-in matrix name (see `presets`)
    #[arg(long)]
    preset: Option<Preset>,
    /// Seed for a random matrix with entries in [-2, 2)
    #[arg(long)]
    seed: Option<u64>,
}

impl MatrixSource {
    fn resolve(&self) -> Result<Matrix2<f64>> {
        match (self.matrix, self.preset, self.seed) {
            (Some(m), _, _) => Ok(m),
            (_, Some(p), _) => Ok(p.matrix()),
            (_, _, Some(seed)) => Ok(random_matrix(seed)),
            _ => bail!("one of --matrix, --preset or --seed is required"),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let (inputs, output) = run(&cmd.action)?;
    match cmd.out {
        Some(path) => {
            let sidecar = provenance::write_result(&path, &inputs, &output)?;
            tracing::info!(
                command = inputs.command(),
                out = %path.display(),
                provenance = %sidecar.display(),
                "wrote"
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&output)?),
    }
    Ok(())
}

/// Execute one subcommand; returns the inputs that determine it and its JSON result.
fn run(action: &Action) -> Result<(RunInputs, Value)> {
    match action {
        Action::Area { u, v, point } => {
            let inputs = RunInputs::Area {
                u: vec_arr(*u),
                v: vec_arr(*v),
                point: point.map(vec_arr),
            };
            Ok((inputs, area(*u, *v, *point)))
        }
        Action::Eigen {
            source,
            v,
            tolerance,
        } => {
            let m = source.resolve()?;
            let inputs = RunInputs::Eigen {
                matrix: mat_arr(&m),
                preset: source.preset.map(Preset::name),
                seed: source.seed,
                v: vec_arr(*v),
                tolerance: *tolerance,
            };
            Ok((inputs, eigen(&m, *v, *tolerance)))
        }
        Action::Validate { formula, cases } => {
            let validator = match cases {
                Some(path) => FormulaValidator::with_cases(load_cases(path)?),
                None => FormulaValidator::new(),
            };
            let inputs = RunInputs::Validate {
                formula: formula.clone(),
                normalized: normalize(formula),
                cases: cases.clone(),
                case_count: validator.cases().len(),
            };
            Ok((inputs, validate(&validator, formula)))
        }
        Action::Evaluate { formula, u, v } => {
            let current = FormulaValidator::new().validate_current(formula, *u, *v);
            tracing::info!(formula, valid = current.valid, "evaluate");
            let inputs = RunInputs::Evaluate {
                formula: formula.clone(),
                u: vec_arr(*u),
                v: vec_arr(*v),
            };
            let output = json!({
                "valid": current.valid,
                "result": current.result,
                "message": current.message
            });
            Ok((inputs, output))
        }
        Action::Hint { formula } => {
            let hint = hint(formula);
            tracing::info!(formula, hint = ?hint, "hint");
            let inputs = RunInputs::Hint {
                formula: formula.clone(),
            };
            Ok((inputs, json!({ "hint": hint.to_string() })))
        }
        Action::Presets => {
            let list: Vec<Value> = Preset::ALL
                .iter()
                .map(|p| json!({ "name": p.name(), "matrix": mat_arr(&p.matrix()) }))
                .collect();
            Ok((RunInputs::Presets, Value::Array(list)))
        }
        Action::Report => Ok((RunInputs::Report, report())),
    }
}

fn area(u: Vector2<f64>, v: Vector2<f64>, point: Option<Vector2<f64>>) -> Value {
    let p = Parallelogram::new(u, v);
    tracing::info!(signed_area = p.signed_area(), "area");
    json!({
        "signed_area": p.signed_area(),
        "area": p.area(),
        "vertices": p.vertices().map(vec_arr),
        "center": vec_arr(p.center()),
        "contains_point": point.map(|q| p.contains_point(q))
    })
}

fn eigen(m: &Matrix2<f64>, v: Vector2<f64>, tolerance: f64) -> Value {
    let r = detect(m, v, tolerance);
    tracing::info!(
        is_eigenvector = r.is_eigenvector,
        eigenvalue = ?r.eigenvalue,
        "eigen"
    );
    let pairs: Vec<Value> = real_eigenpairs(m)
        .into_iter()
        .map(|(lambda, dir)| json!({ "eigenvalue": lambda, "direction": vec_arr(dir) }))
        .collect();
    json!({
        "is_eigenvector": r.is_eigenvector,
        "eigenvalue": r.eigenvalue,
        "image": vec_arr(r.image),
        "lambda_v": r.lambda_v(v).map(vec_arr),
        "real_eigenpairs": pairs
    })
}

fn validate(validator: &FormulaValidator, formula: &str) -> Value {
    let res = validator.validate_formula(formula);
    tracing::info!(
        formula,
        valid = res.valid,
        matches = res.matches,
        total = res.total,
        "validate"
    );
    json!({
        "valid": res.valid,
        "matches": res.matches,
        "total": res.total,
        "message": res.message(),
        "details": res.details,
        "parsed": res.compiled.as_ref().map(|f| f.expr().to_string()),
        "hint": (!res.valid).then(|| hint(formula).to_string())
    })
}

fn report() -> Value {
    json!({
        "tool_version": detlab::VERSION,
        "code_rev": provenance::code_rev()
    })
}

#[derive(Deserialize)]
struct CaseRow {
    u: [f64; 2],
    v: [f64; 2],
    expected: f64,
}

fn load_cases(path: &Path) -> Result<Vec<FormulaCase>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading cases {}", path.display()))?;
    let rows: Vec<CaseRow> = serde_json::from_str(&text)
        .with_context(|| format!("parsing cases {}", path.display()))?;
    if rows.is_empty() {
        bail!("case file {} has no cases", path.display());
    }
    Ok(rows
        .into_iter()
        .map(|r| FormulaCase::new(Vector2::from(r.u), Vector2::from(r.v), r.expected))
        .collect())
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got '{s}'"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        let x: f64 = part
            .parse()
            .map_err(|_| format!("'{part}' is not a number"))?;
        if !x.is_finite() {
            return Err(format!("'{part}' is not finite"));
        }
        *slot = x;
    }
    Ok(out)
}

fn parse_vec2(s: &str) -> Result<Vector2<f64>, String> {
    parse_numbers::<2>(s).map(Vector2::from)
}

fn parse_mat2(s: &str) -> Result<Matrix2<f64>, String> {
    parse_numbers::<4>(s).map(|[m00, m01, m10, m11]| mat2(m00, m01, m10, m11))
}

fn vec_arr(v: Vector2<f64>) -> [f64; 2] {
    [v.x, v.y]
}

fn mat_arr(m: &Matrix2<f64>) -> [[f64; 2]; 2] {
    [[m[(0, 0)], m[(0, 1)]], [m[(1, 0)], m[(1, 1)]]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_vectors_and_matrices() {
        assert_eq!(parse_vec2("1,2"), Ok(vector![1.0, 2.0]));
        assert_eq!(parse_vec2(" -1.5 , 2 "), Ok(vector![-1.5, 2.0]));
        assert!(parse_vec2("1").is_err());
        assert!(parse_vec2("1,2,3").is_err());
        assert!(parse_vec2("a,b").is_err());
        assert!(parse_vec2("inf,0").is_err());
        assert_eq!(parse_mat2("0,-1,1,0"), Ok(Preset::Rotation90.matrix()));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
    }

    #[test]
    fn eigen_accepts_exactly_one_matrix_source() {
        let ok = Cmd::try_parse_from(["detlab", "eigen", "--preset", "lock-a", "--v", "1,0"]);
        assert!(ok.is_ok());
        let both = Cmd::try_parse_from([
            "detlab", "eigen", "--preset", "lock-a", "--seed", "3", "--v", "1,0",
        ]);
        assert!(both.is_err());
        let none = Cmd::try_parse_from(["detlab", "eigen", "--v", "1,0"]);
        assert!(none.is_err());
    }

    #[test]
    fn area_command_reports_orientation_and_hit() {
        let out = area(vector![1.0, 2.0], vector![3.0, 1.0], Some(vector![2.0, 1.5]));
        assert_eq!(out["signed_area"], -5.0);
        assert_eq!(out["area"], 5.0);
        assert_eq!(out["vertices"][2], json!([4.0, 3.0]));
        assert_eq!(out["contains_point"], true);
    }

    #[test]
    fn eigen_command_unlocks_scaling_lock() {
        let out = eigen(&Preset::LockA.matrix(), vector![0.0, 1.0], DEFAULT_TOLERANCE);
        assert_eq!(out["is_eigenvector"], true);
        assert_eq!(out["eigenvalue"], 3.0);
        assert_eq!(out["lambda_v"], json!([0.0, 3.0]));
        assert_eq!(out["real_eigenpairs"].as_array().unwrap().len(), 2);

        let out = eigen(&Preset::Rotation90.matrix(), vector![1.0, 0.0], DEFAULT_TOLERANCE);
        assert_eq!(out["is_eigenvector"], false);
        assert_eq!(out["eigenvalue"], Value::Null);
        assert_eq!(out["real_eigenpairs"], json!([]));
    }

    #[test]
    fn validate_command_adds_hint_on_failure() {
        let validator = FormulaValidator::new();
        let ok = validate(&validator, "ad-bc");
        assert_eq!(ok["valid"], true);
        assert_eq!(ok["hint"], Value::Null);
        assert_eq!(ok["parsed"], "((u.x * v.y) - (u.y * v.x))");

        let bad = validate(&validator, "bc-ad");
        assert_eq!(bad["valid"], false);
        assert_eq!(bad["matches"], 1);
        assert_eq!(bad["hint"], "very close! check the order of the subtraction");

        let broken = validate(&validator, "a*(");
        assert_eq!(broken["parsed"], Value::Null);
        assert_eq!(broken["matches"], 0);
    }

    #[test]
    fn custom_cases_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cases.json");
        fs::write(
            &path,
            r#"[{"u": [1, 1], "v": [-1, 1], "expected": 2}, {"u": [0, 2], "v": [3, 0], "expected": -6}]"#,
        )
        .unwrap();
        let cases = load_cases(&path).unwrap();
        assert_eq!(cases.len(), 2);
        let out = validate(&FormulaValidator::with_cases(cases), "ad-bc");
        assert_eq!(out["valid"], true);
        assert_eq!(out["total"], 2);

        fs::write(&path, "[]").unwrap();
        assert!(load_cases(&path).is_err());
        assert!(load_cases(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn evaluate_command_reports_current_value() {
        let cmd = Cmd::try_parse_from([
            "detlab", "evaluate", "--formula", "ad-bc", "--u", "1,2", "--v", "3,4",
        ])
        .unwrap();
        let (inputs, out) = run(&cmd.action).unwrap();
        assert_eq!(inputs.command(), "evaluate");
        assert_eq!(out["valid"], true);
        assert_eq!(out["result"], -2.0);
        assert_eq!(out["message"], "current value: -2.00");

        let cmd = Cmd::try_parse_from([
            "detlab", "evaluate", "--formula", "a/c", "--u", "1,0", "--v", "0,1",
        ])
        .unwrap();
        let (_, out) = run(&cmd.action).unwrap();
        assert_eq!(out["valid"], false);
        assert_eq!(out["result"], Value::Null);
        assert_eq!(out["message"], "evaluation error: division by zero");
    }

    #[test]
    fn presets_command_lists_every_matrix() {
        let (inputs, out) = run(&Action::Presets).unwrap();
        assert_eq!(inputs, RunInputs::Presets);
        let list = out.as_array().unwrap();
        assert_eq!(list.len(), Preset::ALL.len());
        assert_eq!(list[0]["name"], "identity");
        let lock_a = list.iter().find(|p| p["name"] == "lock-a").unwrap();
        assert_eq!(lock_a["matrix"], json!([[2.0, 0.0], [0.0, 3.0]]));
    }

    #[test]
    fn report_command_names_version_and_revision() {
        let (inputs, out) = run(&Action::Report).unwrap();
        assert_eq!(inputs.command(), "report");
        assert_eq!(out["tool_version"], detlab::VERSION);
        assert!(!out["code_rev"].as_str().unwrap().is_empty());
    }

    #[test]
    fn validate_inputs_record_the_battery() {
        let cmd = Cmd::try_parse_from(["detlab", "validate", "--formula", "ad - bc"]).unwrap();
        let (inputs, _) = run(&cmd.action).unwrap();
        assert_eq!(
            inputs,
            RunInputs::Validate {
                formula: "ad - bc".to_string(),
                normalized: "a*d-b*c".to_string(),
                cases: None,
                case_count: 5,
            }
        );
    }

    #[test]
    fn out_flag_writes_result_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("runs").join("hint.json");
        let cmd = Cmd::try_parse_from([
            "detlab",
            "hint",
            "--formula",
            "a*d+b*c",
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();
        let (inputs, output) = run(&cmd.action).unwrap();
        provenance::write_result(cmd.out.as_deref().unwrap(), &inputs, &output).unwrap();

        let written: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(
            written["hint"],
            "hint: try an expression that contains a subtraction"
        );
        let sidecar = dir.path().join("runs").join("hint.provenance.json");
        let prov: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(prov["command"], "hint");
        assert_eq!(prov["formula"], "a*d+b*c");
    }
}
