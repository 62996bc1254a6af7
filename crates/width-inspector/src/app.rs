//! Application context shared by the window and the command line.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crispy_core::config::DEFAULT_SAMPLE_TEXT;
use log::{error, info};

use crate::{compile::Compiler, export::ExportDir, inspect::measure_instances, report::Report};

/// Longest error message shown in the status line, in characters.
pub const STATUS_MESSAGE_LIMIT: usize = 50;

/// State of the most recent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Running,
    NoData,
    Completed(usize),
    Failed(String),
}

impl Status {
    /// Failure status with the message cut to [`STATUS_MESSAGE_LIMIT`] characters.
    pub fn failed(message: impl fmt::Display) -> Self {
        Status::Failed(message.to_string().chars().take(STATUS_MESSAGE_LIMIT).collect())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => f.write_str("Ready"),
            Status::Running => f.write_str("Running..."),
            Status::NoData => f.write_str("No data found."),
            Status::Completed(count) => write!(f, "Completed: {count} instances measured"),
            Status::Failed(message) => write!(f, "Error: {message}"),
        }
    }
}

/// One inspection session: a source, a compiler and the last result.
///
/// Dropping the inspector removes the export directory.
#[derive(Debug)]
pub struct Inspector {
    source: PathBuf,
    compiler: Compiler,
    export: ExportDir,
    report: Report,
    status: Status,
}

impl Inspector {
    pub fn new(source: impl Into<PathBuf>, compiler: Compiler, export: ExportDir) -> Self {
        Self {
            source: source.into(),
            compiler,
            export,
            report: Report::default(),
            status: Status::Ready,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn export_dir(&self) -> &Path {
        self.export.path()
    }

    /// Clear the previous result and mark a run as started.
    pub fn begin(&mut self) {
        self.report = Report::default();
        self.status = Status::Running;
    }

    /// Measure `text` (or `H` when blank) in every instance of the source.
    ///
    /// Failures end up in [`Inspector::status`]; the session stays usable.
    pub fn run_check(&mut self, text: &str) -> &Status {
        let text = match text.trim() {
            "" => DEFAULT_SAMPLE_TEXT,
            text => text,
        };

        self.begin();
        self.report = Report::new(text);

        self.status = match measure_instances(&self.source, text, &self.compiler, &self.export) {
            Ok(report) if report.is_empty() => Status::NoData,
            Ok(report) => {
                let count = report.len();
                info!("Completed: {count} instances measured");
                self.report = report;
                Status::Completed(count)
            }
            Err(e) => {
                error!("Error during checking: {e}");
                Status::failed(e)
            }
        };
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text() {
        assert_eq!(Status::Ready.to_string(), "Ready");
        assert_eq!(Status::Running.to_string(), "Running...");
        assert_eq!(Status::NoData.to_string(), "No data found.");
        assert_eq!(Status::Completed(9).to_string(), "Completed: 9 instances measured");
        assert_eq!(Status::failed("boom").to_string(), "Error: boom");
    }

    #[test]
    fn failure_message_is_truncated() {
        let Status::Failed(message) = Status::failed("é".repeat(80)) else {
            panic!("expected failure");
        };
        assert_eq!(message.chars().count(), STATUS_MESSAGE_LIMIT);
    }

    #[test]
    fn new_inspector_is_ready() {
        let dir = tempfile::tempdir().unwrap();
        let inspector = Inspector::new(
            "Crispy.glyphs",
            Compiler::default(),
            ExportDir::new(dir.path().join("export")),
        );
        assert_eq!(inspector.status(), &Status::Ready);
        assert!(inspector.report().is_empty());
        assert_eq!(inspector.source(), Path::new("Crispy.glyphs"));
    }

    #[test]
    fn begin_clears_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportDir::new(dir.path().join("export"));
        let mut inspector = Inspector::new("Crispy.glyphs", Compiler::default(), export);
        inspector.report.text = "H".into();
        inspector.begin();
        assert_eq!(inspector.status(), &Status::Running);
        assert_eq!(inspector.report(), &Report::default());
    }
}
