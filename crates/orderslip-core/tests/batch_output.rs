//! Batch behavior over real directories: log files, output naming,
//! idempotent reruns.

use std::fs;
use std::path::Path;

use orderslip_core::{
    run_batch, Converter, LineItem, LogSink, ParsedDocument, Result, RunLog,
};

/// Minimal converter over `.txt` files: every non-empty line is a product
/// with quantity 1.
struct LineConverter;

impl Converter for LineConverter {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn accepts(&self, filename: &str) -> bool {
        filename.ends_with(".txt")
    }

    fn convert(&self, path: &Path, _log: &mut dyn LogSink) -> Result<Vec<ParsedDocument>> {
        let content = fs::read_to_string(path)?;
        let rows: Vec<LineItem> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| LineItem {
                product_name: line.trim().to_string(),
                qty: 1.0,
                unit_price: None,
                tax: 0.0,
            })
            .collect();
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let filename = path.file_name().unwrap().to_str().unwrap();
        Ok(vec![ParsedDocument::new(
            Some("2025-03-07".to_string()),
            filename,
            rows,
        )])
    }
}

#[test]
fn test_log_file_and_outputs_land_together() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("don hang.txt"), "Bánh mì\nCà phê\n").unwrap();

    let log_path = output.join("parse_lines.log");
    fs::create_dir_all(&output).unwrap();
    let mut log = RunLog::append(&log_path).unwrap();

    let summary = run_batch(&LineConverter, &input, &output, &mut log).unwrap();
    drop(log);

    assert_eq!(summary.files_seen, 1);
    assert_eq!(summary.documents_written, 1);
    assert!(output.join("don hang.json").exists());

    let tail = RunLog::tail(&log_path, 10).unwrap();
    assert!(tail.iter().any(|l| l.contains("Parsing file: don hang.txt")));
    assert!(tail.iter().any(|l| l.contains("Output written:")));
}

#[test]
fn test_rerun_produces_byte_identical_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("a.txt"), "Sữa tươi\n").unwrap();
    fs::write(input.join("b.txt"), "Trà đá\n").unwrap();

    let log_path = output.join("parse_lines.log");
    fs::create_dir_all(&output).unwrap();

    let mut log = RunLog::fresh(&log_path).unwrap();
    run_batch(&LineConverter, &input, &output, &mut log).unwrap();
    let first_a = fs::read(output.join("a.json")).unwrap();
    let first_b = fs::read(output.join("b.json")).unwrap();

    let mut log = RunLog::fresh(&log_path).unwrap();
    run_batch(&LineConverter, &input, &output, &mut log).unwrap();

    assert_eq!(fs::read(output.join("a.json")).unwrap(), first_a);
    assert_eq!(fs::read(output.join("b.json")).unwrap(), first_b);
}

#[test]
fn test_written_json_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("don.txt"), "Bánh tráng trộn\n").unwrap();

    let log_path = output.join("parse_lines.log");
    fs::create_dir_all(&output).unwrap();
    let mut log = RunLog::fresh(&log_path).unwrap();
    run_batch(&LineConverter, &input, &output, &mut log).unwrap();

    let json = fs::read_to_string(output.join("don.json")).unwrap();
    let doc: ParsedDocument = serde_json::from_str(&json).unwrap();

    assert_eq!(doc.source_file, "don.txt");
    assert_eq!(doc.delivery_date.as_deref(), Some("2025-03-07"));
    assert_eq!(doc.rows[0].product_name, "Bánh tráng trộn");
    assert_eq!(doc.rows[0].unit_price, None);
}
