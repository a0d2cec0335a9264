use chartmap::coerce::coerce;
use chartmap::csv_reader::read_csv;
use chartmap::index::UniqueIndex;
use chartmap::ir::ChartResult;
use chartmap::mapping::MappingValue;
use chartmap::palette::DEFAULT_PALETTE;
use chartmap::parser::parse_mapping_str;
use chartmap::scale::normalize;
use chartmap::{build, CellValue, ChartKind, ChartOptions, Dataset, ErrorKind, RawMapping};
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

fn load(path: &str) -> Dataset {
    let file = fs::File::open(path).expect("Failed to open test CSV");
    read_csv(file).expect("Failed to parse test CSV")
}

fn mapping(text: &str) -> RawMapping {
    parse_mapping_str(text).expect("Failed to parse mapping")
}

/// Run the chartmap binary with `args`, feeding `input` on stdin.
/// Returns the exit code and stdout.
fn run_chartmap(args: &[&str], input: &str) -> Result<(i32, String), String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chartmap"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .map_err(|e| format!("Failed to write to stdin: {}", e))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    match output.status.code() {
        Some(code) => Ok((code, String::from_utf8_lossy(&output.stdout).to_string())),
        None => Err(String::from_utf8_lossy(&output.stderr).to_string()),
    }
}

fn run_json(args: &[&str], input: &str) -> (i32, Value) {
    let (code, stdout) = run_chartmap(args, input).expect("chartmap did not run");
    let value = serde_json::from_str(&stdout).expect("Output is not valid JSON");
    (code, value)
}

// =============================================================================
// Library
// =============================================================================

#[test]
fn test_deterministic_output() {
    let data = load("test/sales.csv");
    let m = mapping("x: month, y: [sales, cost], group: region");
    let a = build(&data, ChartKind::Line, &m, &ChartOptions::default());
    let b = build(&data, ChartKind::Line, &m, &ChartOptions::default());
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_label_order_is_first_occurrence() {
    let index = UniqueIndex::from_labels(["b", "a", "b", "c"]);
    assert_eq!(index.values(), &["b", "a", "c"]);
}

#[test]
fn test_categorical_from_csv() {
    let data = load("test/sales.csv");
    let m = mapping("x: month, y: sales, group: region");
    match build(&data, ChartKind::Bar, &m, &ChartOptions::default()) {
        ChartResult::Categorical(c) => {
            assert_eq!(c.labels, vec!["Jan", "Feb", "Mar"]);
            assert_eq!(c.series.len(), 2);
            assert_eq!(c.series[0].name, "sales (North)");
            assert_eq!(c.series[0].values, vec![120.0, 135.0, 150.0]);
            assert_eq!(c.series[1].values, vec![90.0, 0.0, 110.0]);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_pie_sums_per_label() {
    let data = Dataset::from_json(&json!([
        {"cat": "A", "v": 1},
        {"cat": "A", "v": 2},
        {"cat": "B", "v": 5}
    ]))
    .unwrap();
    let m = mapping("labels: cat, values: v");
    match build(&data, ChartKind::Pie, &m, &ChartOptions::default()) {
        ChartResult::Proportion(p) => {
            assert_eq!(p.labels, vec!["A", "B"]);
            assert_eq!(p.values, vec![3.0, 5.0]);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_user_colors_are_not_cycled() {
    let data = load("test/sales.csv");
    let options = ChartOptions {
        colors: vec!["#111".to_string()],
        ..ChartOptions::default()
    };
    let m = mapping("x: month, y: [sales, cost], group: region");
    match build(&data, ChartKind::Bar, &m, &options) {
        ChartResult::Categorical(c) => {
            assert!(c.series.len() >= 3);
            assert_eq!(c.series[0].color, "#111");
            assert_eq!(c.series[1].color, DEFAULT_PALETTE[1 % DEFAULT_PALETTE.len()]);
            assert_eq!(c.series[2].color, DEFAULT_PALETTE[2 % DEFAULT_PALETTE.len()]);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_numeric_fallback() {
    assert_eq!(coerce(&CellValue::from("abc")), 0.0);
    assert_eq!(coerce(&CellValue::from("3.5")), 3.5);
}

#[test]
fn test_normalization_bounds() {
    let values = [4.0, 1.0, 9.0, 6.0];
    let out = normalize(&values, 1.0, 9.0, -5.0, 5.0);
    assert_eq!(out[1], -5.0);
    assert_eq!(out[2], 5.0);
    let flat = normalize(&[2.0, 2.0], 2.0, 2.0, -5.0, 5.0);
    assert_eq!(flat, vec![0.0, 0.0]);
}

#[test]
fn test_surface_face_count() {
    let data = load("test/surface.csv");
    let m = mapping("x: x, y: height, z: z");
    match build(&data, ChartKind::Surface3d, &m, &ChartOptions::default()) {
        ChartResult::SurfaceMesh3D(mesh) => {
            assert_eq!(mesh.vertices.len(), 9);
            assert_eq!(mesh.faces.len(), 2 * 2 * 2);
            assert_eq!(mesh.vertex_colors.len(), 9);
            for face in &mesh.faces {
                assert!(face.iter().all(|&i| i < mesh.vertices.len()));
            }
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_bar3d_without_z_is_missing_mapping() {
    let data = load("test/sales.csv");
    let m = mapping("x: month, y: sales");
    let result = build(&data, ChartKind::Bar3d, &m, &ChartOptions::default());
    assert_eq!(result.error_kind(), Some(ErrorKind::MissingMapping));
}

#[test]
fn test_scatter_point_per_row() {
    let data = load("test/points.csv");
    let m = mapping("x: height, y: weight");
    match build(&data, ChartKind::Scatter, &m, &ChartOptions::default()) {
        ChartResult::PointGroups(p) => {
            let total: usize = p.groups.iter().map(|g| g.points.len()).sum();
            assert_eq!(p.groups.len(), 1);
            assert_eq!(total, data.len());
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_scatter3d_grouped() {
    let data = load("test/points.csv");
    let m = mapping("x: height, y: weight, z: age, category: team");
    match build(&data, ChartKind::Scatter3d, &m, &ChartOptions::default()) {
        ChartResult::Points3D(p) => {
            let names: Vec<&str> = p.groups.iter().map(|g| g.name.as_str()).collect();
            assert_eq!(names, vec!["red", "blue", "green"]);
            for point in p.groups.iter().flat_map(|g| &g.points) {
                assert!(point.position.iter().all(|c| (-5.0..=5.0).contains(c)));
            }
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_three_d_kinds_with_full_f64_span() {
    let data = Dataset::from_json(&json!([
        {"x": -1e308, "z": 0, "h": 1},
        {"x": 1e308, "z": 1, "h": 1e308},
        {"x": 0, "z": 2, "h": -1e308}
    ]))
    .unwrap();
    let m = mapping("x: x, y: h, z: z");
    for kind in [ChartKind::Bar3d, ChartKind::Scatter3d, ChartKind::Surface3d] {
        let result = build(&data, kind, &m, &ChartOptions::default());
        assert!(!result.is_error(), "{} failed: {:?}", kind, result.error());
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("null"), "{} produced a non-finite value", kind);
    }

    match build(&data, ChartKind::Surface3d, &m, &ChartOptions::default()) {
        ChartResult::SurfaceMesh3D(mesh) => {
            assert_eq!(mesh.vertices.len(), 9);
            assert_eq!(mesh.vertices[5], [0.0, -5.0, 5.0]);
            assert!(mesh.vertices.iter().flatten().all(|v| v.is_finite()));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_radar_from_json_mapping() {
    let data = Dataset::from_json(&json!({
        "columns": ["skill", "alice", "bob"],
        "rows": [
            {"skill": "speed", "alice": 3, "bob": 4},
            {"skill": "power", "alice": 5}
        ]
    }))
    .unwrap();
    let m: RawMapping = serde_json::from_value(json!({
        "label": "skill",
        "datasets": ["alice", "bob"],
        "group": null
    }))
    .unwrap();
    assert_eq!(
        m["datasets"],
        Some(MappingValue::Many(vec!["alice".to_string(), "bob".to_string()]))
    );
    match build(&data, ChartKind::Radar, &m, &ChartOptions::default()) {
        ChartResult::Radar(r) => {
            assert_eq!(r.labels, vec!["speed", "power"]);
            assert_eq!(r.series[1].values, vec![4.0, 0.0]);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

// =============================================================================
// Command line
// =============================================================================

#[test]
fn test_cli_bar_chart() {
    let csv = fs::read_to_string("test/sales.csv").expect("Failed to read test CSV");
    let (code, out) = run_json(&["bar", "x: month, y: sales"], &csv);
    assert_eq!(code, 0);
    assert_eq!(out["type"], "categorical");
    assert_eq!(out["labels"], json!(["Jan", "Feb", "Mar"]));
    assert_eq!(out["display"]["showLegend"], true);
}

#[test]
fn test_cli_error_result_exit_code() {
    let csv = fs::read_to_string("test/sales.csv").expect("Failed to read test CSV");
    let (code, out) = run_json(&["3d-bar", "x: month, y: sales"], &csv);
    assert_eq!(code, 2);
    assert_eq!(out["type"], "error");
    assert_eq!(out["kind"], "MissingMapping");
    assert_eq!(out["message"], "z is required");
}

#[test]
fn test_cli_strict_mode() {
    let csv = fs::read_to_string("test/sales.csv").expect("Failed to read test CSV");
    let (code, out) = run_json(&["line", "x: month, y: sales", "--strict"], &csv);
    assert_eq!(code, 2);
    assert_eq!(out["kind"], "NonNumericValues");
}

#[test]
fn test_cli_schema() {
    let csv = fs::read_to_string("test/sales.csv").expect("Failed to read test CSV");
    let (code, out) = run_json(&["--schema"], &csv);
    assert_eq!(code, 0);
    assert_eq!(out[0], json!({"name": "month", "type": "string"}));
    assert_eq!(out[2], json!({"name": "sales", "type": "string"}));
    assert_eq!(out[3], json!({"name": "cost", "type": "number"}));
}

#[test]
fn test_cli_json_input_and_options() {
    let input = r#"[{"cat": "A", "v": 1}, {"cat": "B", "v": 2}]"#;
    let (code, out) = run_json(
        &[
            "pie",
            "labels: cat, values: v",
            "--json",
            "--color",
            "#123456",
            "--dark-mode",
            "--no-animation",
        ],
        input,
    );
    assert_eq!(code, 0);
    assert_eq!(out["type"], "proportion");
    assert_eq!(out["colors"][0], "#123456");
    assert_eq!(out["display"]["borderColor"], "#374151");
    assert_eq!(out["display"]["animationMs"], 0);
}

#[test]
fn test_cli_auto_mapping() {
    let csv = fs::read_to_string("test/points.csv").expect("Failed to read test CSV");
    let (code, out) = run_json(&["scatter", "--auto"], &csv);
    assert_eq!(code, 0);
    assert_eq!(out["type"], "pointGroups");
    assert_eq!(out["groups"][0]["points"].as_array().map(|p| p.len()), Some(5));
    assert_eq!(out["groups"][0]["points"][0]["x"], 170.0);
    assert_eq!(out["groups"][0]["points"][0]["y"], 65.0);
}

#[test]
fn test_cli_pretty_output() {
    let csv = fs::read_to_string("test/surface.csv").expect("Failed to read test CSV");
    let args = ["surface3d", "x: x, y: height, z: z", "--pretty"];
    let (code, stdout) = run_chartmap(&args, &csv).unwrap();
    assert_eq!(code, 0);
    assert!(stdout.lines().count() > 1);
    let out: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(out["type"], "surface3d");
}

#[test]
fn test_cli_invalid_mapping_fails() {
    let csv = fs::read_to_string("test/sales.csv").expect("Failed to read test CSV");
    let (code, stdout) = run_chartmap(&["bar", "x month"], &csv).unwrap();
    assert_ne!(code, 0);
    assert_ne!(code, 2);
    assert!(stdout.is_empty());
}

#[test]
fn test_cli_unknown_kind_fails() {
    let (code, _) = run_chartmap(&["histogram", "x: a"], "a\n1\n").unwrap();
    assert_eq!(code, 1);
}
