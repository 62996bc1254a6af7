//! Master duplication at the extension axes' maximum.

use std::path::{Path, PathBuf};

use crispy_core::{config::DUPLICATE_AXIS_SUFFIX, relative_path, replace_dir_with_copy};
use designspace::{DesignSpace, Source};
use log::{debug, info, warn};

use crate::{
    error::{Error, Result},
    mapping::ExtensionAxis,
};

/// Where masters are found and where their duplicates go.
#[derive(Debug, Clone)]
pub struct MasterLayout {
    /// Directory masters are looked up in, by file name
    pub master_dir: PathBuf,
    /// Directory duplicated masters are written to
    pub output_dir: PathBuf,
    /// Directory of the designspace being written; duplicate file names are relative to it
    pub designspace_dir: PathBuf,
    /// Family name for duplicates of sources that have none
    pub family_fallback: String,
}

/// Outcome of a duplication pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Duplication {
    /// File names of the duplicated masters, relative to the designspace
    pub created: Vec<String>,
    /// Master paths that were missing on disk
    pub skipped: Vec<PathBuf>,
}

/// `Weight-eMax-Width-eMax` for axes `Weight-e` and `Width-e`.
pub fn duplicate_suffix(axes: &[ExtensionAxis]) -> String {
    axes.iter()
        .map(|axis| format!("{}{DUPLICATE_AXIS_SUFFIX}", axis.name))
        .collect::<Vec<_>>()
        .join("-")
}

/// Pin existing sources to the extension axes' minimum and add a duplicate
/// of each at their maximum.
///
/// Every original source gets each extension axis set to its minimum,
/// replacing any coordinate it already had. Each master directory is then
/// copied next to the others under a name carrying the axes at maximum,
/// replacing an earlier copy. A missing master is reported and skipped.
/// New sources are appended after all originals.
pub fn duplicate_sources(
    doc: &mut DesignSpace,
    axes: &[ExtensionAxis],
    layout: &MasterLayout,
) -> Result<Duplication> {
    let mut duplication = Duplication::default();
    if axes.is_empty() {
        info!("No extension axes; sources left unchanged");
        return Ok(duplication);
    }

    info!("Duplicating master sources and updating designspace sources...");
    let suffix = duplicate_suffix(axes);
    let mut new_sources = Vec::new();

    for source in &mut doc.sources {
        for axis in axes {
            source.location.insert(axis.name.clone(), axis.minimum);
        }

        let file_name = Path::new(&source.filename)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.filename.clone());
        let (stem, extension) = split_extension(&file_name);

        let master_path = layout.master_dir.join(&file_name);
        if !master_path.exists() {
            warn!("Source master not found: {}. Skipping.", master_path.display());
            duplication.skipped.push(master_path);
            continue;
        }

        let new_stem = format!("{stem}-{suffix}");
        let new_path = layout.output_dir.join(format!("{new_stem}{extension}"));
        info!("Duplicating {} -> {} (overwrite if exists)", master_path.display(), new_path.display());
        let copied = replace_dir_with_copy(&master_path, &new_path).map_err(|e| {
            Error::CopyMaster {
                from: master_path.clone(),
                to: new_path.clone(),
                message: format!("{e:#}"),
            }
        })?;
        debug!("Copied {} files in {} directories", copied.files, copied.directories);

        let filename = relative_path(&new_path, &layout.designspace_dir)
            .to_string_lossy()
            .into_owned();
        let family = source.family_name.as_deref().unwrap_or(&layout.family_fallback);
        let style = source.style_name.as_deref().unwrap_or(stem);

        let inherited = source.location.iter().map(|(name, value)| (name.as_str(), *value));
        let mut duplicate = Source::new(&filename, inherited)
            .with_name(&new_stem)
            .with_family_name(family)
            .with_style_name(&format!("{style}-{suffix}"));
        for axis in axes {
            duplicate.location.insert(axis.name.clone(), axis.maximum);
        }

        info!("Added new source: {filename} with location {:?}", duplicate.location);
        duplication.created.push(filename);
        new_sources.push(duplicate);
    }

    doc.sources.extend(new_sources);
    Ok(duplication)
}

fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(index) if index > 0 => file_name.split_at(index),
        _ => (file_name, ""),
    }
}
