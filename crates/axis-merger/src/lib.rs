//! Crispy Axis Merger - extend a designspace with CSV-driven axes.
//!
//! The merge reads a mapping of instance style names to axis values, adds
//! every column marked as an extension axis to the designspace, pins the
//! existing masters to each axis minimum, duplicates them at the maximum,
//! places instances from the CSV (or at the midpoint) and finally rewrites
//! each axis default on disk to the smallest source coordinate.
//!
//! # Example
//!
//! ```no_run
//! use axis_merger::{MergeConfig, run};
//!
//! let summary = run(&MergeConfig::default())?;
//! println!("{} sources duplicated", summary.sources_duplicated.len());
//! # Ok::<(), axis_merger::Error>(())
//! ```

mod config;
mod duplicate;
mod error;
mod mapping;
mod merge;

use std::{fs::create_dir_all, path::PathBuf};

use designspace::{DesignSpace, normalize_axis_defaults};
use indexmap::IndexMap;
use log::info;

pub use config::MergeConfig;
pub use duplicate::{Duplication, MasterLayout, duplicate_sources, duplicate_suffix};
pub use error::{Error, Result};
pub use mapping::{ExtensionAxis, Mapping, MappingOptions, MappingRow};
pub use merge::{InstanceAssignment, assign_instance_coordinates, ensure_extension_axes};

/// What a merge run changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeSummary {
    /// Extension axes found in the mapping, in header order
    pub extension_axes: Vec<String>,
    /// Axes that were not yet declared and got added
    pub axes_added: Vec<String>,
    /// File names of the duplicated masters
    pub sources_duplicated: Vec<String>,
    /// Masters missing on disk
    pub sources_skipped: Vec<PathBuf>,
    pub instances_matched: usize,
    pub instances_midpoint: usize,
    /// Axis defaults written by the final pass
    pub defaults: IndexMap<String, f64>,
    pub output: PathBuf,
}

/// Merge the mapping's extension axes into `doc` in memory.
///
/// Covers axis merge, master duplication and instance placement; the
/// default pass runs on the saved file and is left to [`run`].
pub fn merge_designspace(
    doc: &mut DesignSpace,
    mapping: &Mapping,
    layout: &MasterLayout,
) -> Result<MergeSummary> {
    let axes_added = ensure_extension_axes(doc, mapping.axes());
    let duplication = duplicate_sources(doc, mapping.axes(), layout)?;
    let assignment = assign_instance_coordinates(doc, mapping);

    Ok(MergeSummary {
        extension_axes: mapping.axis_names().into_iter().map(str::to_string).collect(),
        axes_added,
        sources_duplicated: duplication.created,
        sources_skipped: duplication.skipped,
        instances_matched: assignment.matched,
        instances_midpoint: assignment.midpoint,
        ..MergeSummary::default()
    })
}

/// Run the whole merge described by `config`.
pub fn run(config: &MergeConfig) -> Result<MergeSummary> {
    let mapping = Mapping::from_path(&config.csv, &config.mapping_options())?;

    info!("Loading designspace: {}", config.designspace.display());
    let mut doc = DesignSpace::load(&config.designspace)?;

    let mut summary = merge_designspace(&mut doc, &mapping, &config.master_layout())?;

    if let Some(parent) = config.output.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)
            .map_err(|source| Error::OutputDir { path: parent.to_path_buf(), source })?;
    }
    doc.save(&config.output)?;
    info!("Updated designspace saved to: {}", config.output.display());

    summary.defaults = normalize_axis_defaults(&config.output, &doc)?;
    info!("Axis defaults set to source minimums in {}", config.output.display());

    summary.output = config.output.clone();
    Ok(summary)
}
