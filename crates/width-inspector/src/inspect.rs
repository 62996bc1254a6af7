//! Compile, then measure every generated instance.

use std::{collections::BTreeSet, fs::read, path::Path};

use log::{error, info, warn};

use crate::{
    axes::FontAxes,
    compile::Compiler,
    error::{Error, Result},
    export::ExportDir,
    measure::measure_text_width,
    report::{Report, Row},
};

/// Compile `source` into `export` and measure `text` in each binary.
///
/// Rows follow the binaries' file names. Axis columns are the union of the
/// axis tags found in any binary; an instance whose coordinates cannot be
/// resolved still gets a row with placeholder cells.
pub fn measure_instances(
    source: &Path,
    text: &str,
    compiler: &Compiler,
    export: &ExportDir,
) -> Result<Report> {
    export.prepare()?;
    compiler.compile(source, export.path())?;

    let binaries = export.binaries(compiler.format)?;
    let mut report = Report::new(text);
    if binaries.is_empty() {
        error!("No {} files generated.", compiler.format.as_str().to_uppercase());
        return Ok(report);
    }
    info!("Generated {} instance files", binaries.len());

    let mut tags = BTreeSet::new();
    for path in &binaries {
        let instance = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("Processing instance: {instance}");

        let data = read(path).map_err(|source| Error::Io { path: path.clone(), source })?;
        let width = measure_text_width(&data, text)?;
        info!("{text} width in '{instance}': {width}");

        let axes = FontAxes::read(&data).unwrap_or_else(|e| {
            warn!("Could not extract axes from {}: {e}", path.display());
            FontAxes::default()
        });
        tags.extend(axes.tags.iter().cloned());

        let coordinates = axes.instance_for(&instance).cloned().unwrap_or_default();
        report.rows.push(Row { instance, axes: coordinates, width });
    }

    report.axes = tags.into_iter().collect();
    Ok(report)
}
