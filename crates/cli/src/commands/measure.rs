use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use crispy_core::config::DEFAULT_SAMPLE_TEXT;
use width_inspector::{Compiler, ExportDir, OutputFormat, Report, measure_instances};

/// Arguments of a headless width check.
#[derive(Debug, Clone)]
pub struct MeasureOptions {
    pub source: PathBuf,
    pub text: String,
    pub compiler: String,
    pub format: OutputFormat,
    pub export_dir: PathBuf,
}

/// Compile and measure once, removing the export directory afterwards.
pub fn measure(options: &MeasureOptions) -> Result<Report> {
    if !options.source.exists() {
        bail!("File not found: {}", options.source.display());
    }

    let compiler = Compiler::from_command_line(&options.compiler).with_format(options.format);
    let export = ExportDir::new(&options.export_dir);
    let text = match options.text.trim() {
        "" => DEFAULT_SAMPLE_TEXT,
        text => text,
    };

    let report = measure_instances(&options.source, text, &compiler, &export)
        .with_context(|| format!("Failed to measure {}", options.source.display()))?;
    if report.is_empty() {
        println!("No data found.");
    }
    Ok(report)
}
