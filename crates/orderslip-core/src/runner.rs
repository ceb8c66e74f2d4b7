//! Directory batch runner shared by every converter.
//!
//! One input directory listing, one file at a time, in sorted order so
//! repeated runs over unchanged input produce byte-identical output. A
//! file's failure is captured, logged, and recorded in the summary; the
//! loop never aborts early.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::document::ParsedDocument;
use crate::runlog::LogSink;

/// A single vendor's conversion routine.
pub trait Converter {
    /// Vendor identifier used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Whether `filename` is an input this converter handles.
    fn accepts(&self, filename: &str) -> bool;

    /// Convert one input file into zero or more documents.
    ///
    /// An empty Vec means the file held no valid rows; the runner logs a
    /// warning and writes nothing.
    fn convert(&self, path: &Path, log: &mut dyn LogSink) -> Result<Vec<ParsedDocument>>;

    /// Output file name for one document.
    fn output_name(&self, source: &Path, doc: &ParsedDocument) -> String {
        let _ = doc;
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        format!("{stem}.json")
    }
}

/// Failure captured for one input file.
#[derive(Debug)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

/// Outcome of a batch run, examined by the caller.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files matching the converter's input filter.
    pub files_seen: usize,
    /// Files that produced at least one output document.
    pub files_converted: usize,
    /// Output documents written.
    pub documents_written: usize,
    /// Per-file failures, in directory order.
    pub failures: Vec<FileFailure>,
}

/// Run `converter` over every accepted file in `input_dir`.
pub fn run_batch(
    converter: &dyn Converter,
    input_dir: &Path,
    output_dir: &Path,
    log: &mut dyn LogSink,
) -> Result<RunSummary> {
    fs::create_dir_all(output_dir)?;

    let mut entries: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    let mut summary = RunSummary::default();

    for path in entries {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        if !converter.accepts(&filename) {
            continue;
        }

        summary.files_seen += 1;
        log.info(&format!("Parsing file: {filename}"));

        let documents = match converter.convert(&path, log) {
            Ok(documents) => documents,
            Err(e) => {
                log.error(&format!("Failed to parse {filename}: {e}"));
                summary.failures.push(FileFailure {
                    file: filename,
                    error: e.to_string(),
                });
                continue;
            }
        };

        if documents.is_empty() {
            log.warning(&format!("No valid rows parsed in {filename}"));
            continue;
        }

        let mut wrote_any = false;
        for doc in &documents {
            let out_path = output_dir.join(converter.output_name(&path, doc));
            match write_document(doc, &out_path) {
                Ok(()) => {
                    log.info(&format!("Output written: {}", out_path.display()));
                    summary.documents_written += 1;
                    wrote_any = true;
                }
                Err(e) => log.error(&format!("Failed to write JSON output: {e}")),
            }
        }
        if wrote_any {
            summary.files_converted += 1;
        }
    }

    Ok(summary)
}

/// Write one document as pretty-printed UTF-8 JSON, non-ASCII preserved.
pub fn write_document(doc: &ParsedDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SheetError, SlipError};
    use crate::models::document::LineItem;
    use crate::runlog::Level;

    struct MemoryLog(Vec<(Level, String)>);

    impl LogSink for MemoryLog {
        fn log(&mut self, level: Level, message: &str) {
            self.0.push((level, message.to_string()));
        }
    }

    /// Converts `.txt` files whose content is one product name per line;
    /// files containing "boom" fail.
    struct FakeConverter;

    impl Converter for FakeConverter {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn accepts(&self, filename: &str) -> bool {
            filename.ends_with(".txt")
        }

        fn convert(&self, path: &Path, _log: &mut dyn LogSink) -> Result<Vec<ParsedDocument>> {
            let content = fs::read_to_string(path)?;
            if content.contains("boom") {
                return Err(SlipError::Sheet(SheetError::Open("boom".to_string())));
            }
            let rows: Vec<LineItem> = content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| LineItem {
                    product_name: l.trim().to_string(),
                    qty: 1.0,
                    unit_price: None,
                    tax: 0.0,
                })
                .collect();
            if rows.is_empty() {
                return Ok(vec![]);
            }
            let filename = path.file_name().unwrap().to_str().unwrap();
            Ok(vec![ParsedDocument::new(None, filename, rows)])
        }
    }

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        fs::create_dir_all(&input).unwrap();
        (dir, input, output)
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let (_dir, input, output) = setup();
        fs::write(input.join("a.txt"), "Bánh mì\n").unwrap();
        fs::write(input.join("b.txt"), "boom\n").unwrap();
        fs::write(input.join("c.txt"), "Trà sữa\n").unwrap();
        fs::write(input.join("ignored.csv"), "x\n").unwrap();

        let mut log = MemoryLog(Vec::new());
        let summary = run_batch(&FakeConverter, &input, &output, &mut log).unwrap();

        assert_eq!(summary.files_seen, 3);
        assert_eq!(summary.files_converted, 2);
        assert_eq!(summary.documents_written, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].file, "b.txt");

        assert!(output.join("a.json").exists());
        assert!(!output.join("b.json").exists());
        assert!(output.join("c.json").exists());
        assert!(log
            .0
            .iter()
            .any(|(level, msg)| *level == Level::Error && msg.contains("b.txt")));
    }

    #[test]
    fn test_empty_result_writes_nothing() {
        let (_dir, input, output) = setup();
        fs::write(input.join("empty.txt"), "\n").unwrap();

        let mut log = MemoryLog(Vec::new());
        let summary = run_batch(&FakeConverter, &input, &output, &mut log).unwrap();

        assert_eq!(summary.files_seen, 1);
        assert_eq!(summary.documents_written, 0);
        assert!(!output.join("empty.json").exists());
        assert!(log
            .0
            .iter()
            .any(|(level, msg)| *level == Level::Warning && msg.contains("No valid rows")));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let (_dir, input, output) = setup();
        fs::write(input.join("a.txt"), "Bánh mì\nCà phê sữa\n").unwrap();

        let mut log = MemoryLog(Vec::new());
        run_batch(&FakeConverter, &input, &output, &mut log).unwrap();
        let first = fs::read(output.join("a.json")).unwrap();

        run_batch(&FakeConverter, &input, &output, &mut log).unwrap();
        let second = fs::read(output.join("a.json")).unwrap();

        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        assert!(text.contains("Bánh mì"));
        assert!(text.contains("  \"rows\""), "expected 2-space indent");
    }
}
