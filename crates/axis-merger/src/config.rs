//! Paths and conventions for an axis merge run.

use std::path::PathBuf;

use crispy_core::config::{
    EXTENSION_AXIS_MARKER, FAMILY_FALLBACK, INSTANCE_COLUMN, MAPPING_CSV, MASTER_DIR,
    MASTER_OUTPUT_DIR, OUTPUT_DESIGNSPACE, SOURCE_DESIGNSPACE,
};

use crate::{duplicate::MasterLayout, mapping::MappingOptions};

/// Everything [`crate::run`] reads from and writes to.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// CSV mapping of instance names to axis values
    pub csv: PathBuf,
    /// Designspace to extend
    pub designspace: PathBuf,
    /// Directory the source masters live in
    pub master_dir: PathBuf,
    /// Directory duplicated masters are written to
    pub output_dir: PathBuf,
    /// Designspace written by the merge
    pub output: PathBuf,
    /// Substring marking extension axis columns
    pub marker: String,
    /// CSV column holding instance style names
    pub instance_column: String,
    /// Family name for duplicates of sources without one
    pub family_fallback: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            csv: MAPPING_CSV.into(),
            designspace: SOURCE_DESIGNSPACE.into(),
            master_dir: MASTER_DIR.into(),
            output_dir: MASTER_OUTPUT_DIR.into(),
            output: OUTPUT_DESIGNSPACE.into(),
            marker: EXTENSION_AXIS_MARKER.to_string(),
            instance_column: INSTANCE_COLUMN.to_string(),
            family_fallback: FAMILY_FALLBACK.to_string(),
        }
    }
}

impl MergeConfig {
    /// Resolve every relative path against `root`.
    pub fn rooted_at(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        for path in [
            &mut self.csv,
            &mut self.designspace,
            &mut self.master_dir,
            &mut self.output_dir,
            &mut self.output,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }

    pub fn mapping_options(&self) -> MappingOptions {
        MappingOptions {
            marker: self.marker.clone(),
            instance_column: self.instance_column.clone(),
        }
    }

    pub fn master_layout(&self) -> MasterLayout {
        let designspace_dir = self
            .output
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();
        MasterLayout {
            master_dir: self.master_dir.clone(),
            output_dir: self.output_dir.clone(),
            designspace_dir,
            family_fallback: self.family_fallback.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn defaults_match_source_tree() {
        let config = MergeConfig::default();
        assert_eq!(config.csv, Path::new("sources/mapping.csv"));
        assert_eq!(config.output, Path::new("master_ufo/Crispy-updated.designspace"));
        assert_eq!(config.marker, "-e");
        assert_eq!(config.master_layout().designspace_dir, Path::new("master_ufo"));
    }

    #[test]
    fn rooting_keeps_absolute_paths() {
        let mut config = MergeConfig::default();
        config.output = PathBuf::from("/tmp/out.designspace");
        let config = config.rooted_at("/work");
        assert_eq!(config.csv, Path::new("/work/sources/mapping.csv"));
        assert_eq!(config.output, Path::new("/tmp/out.designspace"));
    }

    #[test]
    fn bare_output_name_has_empty_designspace_dir() {
        let config = MergeConfig { output: "out.designspace".into(), ..MergeConfig::default() };
        assert_eq!(config.master_layout().designspace_dir, Path::new(""));
    }
}
