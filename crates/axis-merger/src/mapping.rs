//! CSV mapping of named instances to axis values.
//!
//! One header row; one column holds the instance style name, every other
//! column is a candidate axis. Columns whose name contains the marker
//! substring are extension axes.

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use crispy_core::config::{EXTENSION_AXIS_MARKER, INSTANCE_COLUMN};
use indexmap::IndexMap;
use log::{debug, info};

use crate::error::{Error, Result};

/// How to interpret the mapping's columns.
#[derive(Debug, Clone)]
pub struct MappingOptions {
    /// Substring selecting extension axis columns
    pub marker: String,
    /// Column holding the instance style name
    pub instance_column: String,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            marker: EXTENSION_AXIS_MARKER.to_string(),
            instance_column: INSTANCE_COLUMN.to_string(),
        }
    }
}

/// Observed bounds of an extension axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionAxis {
    pub name: String,
    pub minimum: f64,
    pub maximum: f64,
}

impl ExtensionAxis {
    /// Arithmetic midpoint of the observed bounds.
    pub fn midpoint(&self) -> f64 {
        (self.minimum + self.maximum) / 2.0
    }
}

/// One instance's axis values. Columns left blank on the row are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRow {
    pub instance: String,
    pub values: IndexMap<String, f64>,
}

impl MappingRow {
    /// Value of `axis` on this row, if the row specifies one.
    pub fn value(&self, axis: &str) -> Option<f64> {
        self.values.get(axis).copied()
    }
}

/// Parsed mapping: extension axes in header order plus per-instance rows.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    axes: Vec<ExtensionAxis>,
    rows: Vec<MappingRow>,
    by_instance: HashMap<String, usize>,
}

impl Mapping {
    /// Read a mapping file.
    pub fn from_path(path: impl AsRef<Path>, options: &MappingOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Parsing CSV for extension axes and instance lookup: {}", path.display());
        let file = File::open(path)
            .map_err(|source| Error::OpenMapping { path: path.to_path_buf(), source })?;
        Self::from_reader(file, options)
    }

    /// Read a mapping from any CSV source.
    pub fn from_reader(reader: impl Read, options: &MappingOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(Error::MissingHeader);
        }

        let instance_index = headers
            .iter()
            .position(|h| *h == options.instance_column)
            .ok_or_else(|| Error::MissingInstanceColumn(options.instance_column.clone()))?;

        let mut axis_names: Vec<&str> = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            if index != instance_index
                && header.contains(options.marker.as_str())
                && !axis_names.contains(&header.as_str())
            {
                axis_names.push(header);
            }
        }

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            // Header is row 1.
            let row_number = line + 2;

            let instance = record.get(instance_index).unwrap_or_default().trim().to_string();
            let mut values = IndexMap::new();
            for (index, header) in headers.iter().enumerate() {
                if index == instance_index {
                    continue;
                }
                let raw = record.get(index).unwrap_or_default().trim();
                if raw.is_empty() {
                    continue;
                }
                let value = raw.parse::<f64>().map_err(|_| Error::InvalidValue {
                    row: row_number,
                    column: header.clone(),
                    value: raw.to_string(),
                })?;
                values.insert(header.clone(), value);
            }
            rows.push(MappingRow { instance, values });
        }

        let axes = axis_names
            .iter()
            .map(|name| -> Result<ExtensionAxis> {
                let observed = rows.iter().filter_map(|row| row.value(name));
                let (minimum, maximum) = observed
                    .fold(None, |bounds, v| match bounds {
                        None => Some((v, v)),
                        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
                    })
                    .ok_or_else(|| Error::EmptyAxis(name.to_string()))?;
                Ok(ExtensionAxis { name: name.to_string(), minimum, maximum })
            })
            .collect::<Result<Vec<_>>>()?;

        // Later rows win when a style name repeats.
        let by_instance =
            rows.iter().enumerate().map(|(i, row)| (row.instance.clone(), i)).collect();

        let mapping = Self { axes, rows, by_instance };
        info!("Extension axes: {:?}", mapping.axis_names());
        for axis in &mapping.axes {
            debug!("  {}: {} .. {}", axis.name, axis.minimum, axis.maximum);
        }
        Ok(mapping)
    }

    /// Extension axes, in header order.
    pub fn axes(&self) -> &[ExtensionAxis] {
        &self.axes
    }

    /// Names of the extension axes, in header order.
    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|axis| axis.name.as_str()).collect()
    }

    /// Row for an exact style name.
    pub fn row(&self, instance: &str) -> Option<&MappingRow> {
        self.by_instance.get(instance).map(|&index| &self.rows[index])
    }

    /// Value of `axis` for `instance`, when both are present.
    pub fn value(&self, instance: &str, axis: &str) -> Option<f64> {
        self.row(instance).and_then(|row| row.value(axis))
    }
}
