//! Per-vendor run logs.
//!
//! Each vendor run writes timestamped lines to its own log file next to the
//! outputs, and the CLI echoes the tail afterwards. The sink is an injected
//! trait object so converters never touch a shared logger registry; events
//! are mirrored to `tracing` for anyone running with a subscriber.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Severity of a run log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "INFO"),
            Level::Warning => write!(f, "WARNING"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

/// Sink for run log lines.
pub trait LogSink {
    fn log(&mut self, level: Level, message: &str);

    fn info(&mut self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warning(&mut self, message: &str) {
        self.log(Level::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Timestamped log file, one per vendor run.
pub struct RunLog {
    path: PathBuf,
    file: File,
}

impl RunLog {
    /// Open in append mode, creating parent directories as needed.
    pub fn append(path: &Path) -> io::Result<Self> {
        Self::open(path, true)
    }

    /// Truncate any previous run's log and start fresh.
    pub fn fresh(path: &Path) -> io::Result<Self> {
        Self::open(path, false)
    }

    fn open(path: &Path, append: bool) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(append)
            .write(true)
            .truncate(!append)
            .open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last `n` lines of a log file; empty when the file does not exist.
    pub fn tail(path: &Path, n: usize) -> io::Result<Vec<String>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let lines: Vec<String> = BufReader::new(File::open(path)?)
            .lines()
            .collect::<io::Result<_>>()?;
        let skip = lines.len().saturating_sub(n);
        Ok(lines.into_iter().skip(skip).collect())
    }
}

impl LogSink for RunLog {
    fn log(&mut self, level: Level, message: &str) {
        let line = format!(
            "{} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            message
        );
        // A log write failing should never abort the batch
        let _ = writeln!(self.file, "{line}");

        match level {
            Level::Info => tracing::info!("{message}"),
            Level::Warning => tracing::warn!("{message}"),
            Level::Error => tracing::error!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_truncates_and_append_keeps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parse_test.log");

        {
            let mut log = RunLog::fresh(&path).unwrap();
            log.info("first run");
        }
        {
            let mut log = RunLog::append(&path).unwrap();
            log.warning("second run");
        }

        let lines = RunLog::tail(&path, 10).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO - first run"));
        assert!(lines[1].contains("WARNING - second run"));

        {
            let mut log = RunLog::fresh(&path).unwrap();
            log.error("third run");
        }
        let lines = RunLog::tail(&path, 10).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR - third run"));
    }

    #[test]
    fn test_tail_limits_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parse_test.log");

        assert!(RunLog::tail(&path, 10).unwrap().is_empty());

        let mut log = RunLog::fresh(&path).unwrap();
        for i in 0..15 {
            log.info(&format!("line {i}"));
        }
        drop(log);

        let lines = RunLog::tail(&path, 10).unwrap();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].contains("line 5"));
        assert!(lines[9].contains("line 14"));
    }
}
