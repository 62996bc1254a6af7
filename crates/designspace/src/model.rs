//! Designspace data model.
//!
//! Mirrors the concepts from fontTools designspaceLib: axes, sources
//! (masters) and instances, each located by a map from axis name to a
//! design-space coordinate.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A location in the designspace as (axis name, value) pairs, in insertion order.
pub type Location = IndexMap<String, f64>;

/// Format version written by [`DesignSpace::to_xml`] for new documents.
pub const DEFAULT_FORMAT: &str = "5.0";

/// One user-to-design mapping point of an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    /// User-space value
    pub input: f64,
    /// Design-space value
    pub output: f64,
}

/// A variation axis in the designspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Four-character axis tag (e.g., "wght", "ital")
    pub tag: String,
    /// Axis name, used as the key of every location
    pub name: String,
    /// Minimum value on this axis
    pub minimum: f64,
    /// Default value on this axis
    pub default: f64,
    /// Maximum value on this axis
    pub maximum: f64,
    /// Allowed values of a discrete axis; `minimum` and `maximum` are their bounds
    pub values: Option<Vec<f64>>,
    /// Hidden from user interfaces
    pub hidden: bool,
    /// User-to-design mapping, sorted by input
    pub map: Vec<AxisMap>,
    /// Child elements other than `<map>`, kept verbatim
    pub extra: Vec<String>,
}

impl Axis {
    /// Create a new axis.
    pub fn new(tag: &str, name: &str, minimum: f64, default: f64, maximum: f64) -> Self {
        Self {
            tag: tag.to_string(),
            name: name.to_string(),
            minimum,
            default,
            maximum,
            values: None,
            hidden: false,
            map: Vec::new(),
            extra: Vec::new(),
        }
    }

    /// Create an axis whose tag is the first four characters of its name.
    ///
    /// The default starts at the minimum.
    pub fn from_name(name: &str, minimum: f64, maximum: f64) -> Self {
        let tag: String = name.chars().take(4).collect();
        Self::new(&tag, name, minimum, minimum, maximum)
    }

    /// Create a discrete axis that only takes the listed values.
    pub fn discrete(tag: &str, name: &str, values: Vec<f64>, default: f64) -> Self {
        let minimum = values.iter().copied().fold(f64::INFINITY, f64::min).min(default);
        let maximum = values.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(default);
        Self { values: Some(values), ..Self::new(tag, name, minimum, default, maximum) }
    }

    pub fn is_discrete(&self) -> bool {
        self.values.is_some()
    }

    /// Set the user-to-design mapping.
    pub fn with_map(mut self, map: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.map = map.into_iter().map(|(input, output)| AxisMap { input, output }).collect();
        self.map.sort_by(|a, b| a.input.total_cmp(&b.input));
        self
    }

    /// Arithmetic midpoint of minimum and maximum.
    pub fn midpoint(&self) -> f64 {
        (self.minimum + self.maximum) / 2.0
    }

    /// Map a user-space value to design space.
    ///
    /// Piecewise linear over [`Axis::map`]; values outside the mapped range
    /// are clamped to the first or last output. Identity without a map.
    pub fn map_forward(&self, value: f64) -> f64 {
        let (Some(first), Some(last)) = (self.map.first(), self.map.last()) else {
            return value;
        };
        if value <= first.input {
            return first.output;
        }
        if value >= last.input {
            return last.output;
        }
        for pair in self.map.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if value <= hi.input {
                if hi.input == lo.input {
                    return hi.output;
                }
                let t = (value - lo.input) / (hi.input - lo.input);
                return lo.output + t * (hi.output - lo.output);
            }
        }
        last.output
    }
}

/// A source (master) font in the designspace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    /// Path to the master, relative to the designspace document
    pub filename: String,
    /// Unique source name
    pub name: Option<String>,
    /// Optional family name
    pub family_name: Option<String>,
    /// Optional style name
    pub style_name: Option<String>,
    /// Optional layer inside the master
    pub layer: Option<String>,
    /// Location in the designspace
    pub location: Location,
    /// Second coordinate of anisotropic dimensions (`yvalue`)
    pub yvalues: Location,
    /// Child elements other than `<location>`, kept verbatim
    pub extra: Vec<String>,
}

impl Source {
    /// Create a new source with the given file name and location.
    pub fn new<'a>(filename: &str, location: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            filename: filename.to_string(),
            location: location.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            ..Self::default()
        }
    }

    /// Set the source name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the family name.
    pub fn with_family_name(mut self, name: &str) -> Self {
        self.family_name = Some(name.to_string());
        self
    }

    /// Set the style name.
    pub fn with_style_name(mut self, name: &str) -> Self {
        self.style_name = Some(name.to_string());
        self
    }

    /// Get the value for an axis, or the axis default if not specified.
    pub fn axis_value(&self, axis: &Axis) -> f64 {
        self.location.get(&axis.name).copied().unwrap_or(axis.default)
    }
}

/// A named instance in the designspace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    /// Instance name
    pub name: Option<String>,
    /// Family name
    pub family_name: Option<String>,
    /// Style name (e.g., "Bold", "Light Italic")
    pub style_name: Option<String>,
    /// Output path for the generated instance
    pub filename: Option<String>,
    /// Optional PostScript name
    pub postscript_name: Option<String>,
    /// Style-map family name
    pub style_map_family_name: Option<String>,
    /// Style-map style name
    pub style_map_style_name: Option<String>,
    /// Location in the designspace
    pub location: Location,
    /// Second coordinate of anisotropic dimensions (`yvalue`)
    pub yvalues: Location,
    /// Child elements other than `<location>`, kept verbatim
    pub extra: Vec<String>,
}

impl Instance {
    /// Create a new instance with the given style name and location.
    pub fn new<'a>(style_name: &str, location: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            style_name: Some(style_name.to_string()),
            location: location.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            ..Self::default()
        }
    }

    /// Set the family name.
    pub fn with_family_name(mut self, name: &str) -> Self {
        self.family_name = Some(name.to_string());
        self
    }

    /// Set the PostScript name.
    pub fn with_postscript_name(mut self, name: &str) -> Self {
        self.postscript_name = Some(name.to_string());
        self
    }
}

/// A complete designspace document.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignSpace {
    /// Format version attribute of the root element
    pub format: String,
    /// Attributes of the `<axes>` element, such as `elidedfallbackname`
    pub axes_attributes: Vec<(String, String)>,
    /// Variation axes
    pub axes: Vec<Axis>,
    /// Source (master) fonts
    pub sources: Vec<Source>,
    /// Named instances
    pub instances: Vec<Instance>,
    /// Top-level elements the model does not describe, kept verbatim
    pub extra: Vec<String>,
}

impl Default for DesignSpace {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            axes_attributes: Vec::new(),
            axes: Vec::new(),
            sources: Vec::new(),
            instances: Vec::new(),
            extra: Vec::new(),
        }
    }
}

impl DesignSpace {
    /// Create a new designspace with the given axes and sources.
    pub fn new(axes: Vec<Axis>, sources: Vec<Source>) -> Self {
        Self { axes, sources, ..Self::default() }
    }

    /// Add named instances to the designspace.
    pub fn with_instances(mut self, instances: Vec<Instance>) -> Self {
        self.instances = instances;
        self
    }

    /// Find an axis by name.
    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.name == name)
    }

    /// Whether an axis with this name is declared.
    pub fn has_axis(&self, name: &str) -> bool {
        self.axis(name).is_some()
    }

    /// Find the default source (the one at the default location for all axes).
    pub fn default_source(&self) -> Option<&Source> {
        self.sources.iter().find(|source| {
            self.axes
                .iter()
                .all(|axis| (source.axis_value(axis) - axis.default).abs() < 0.001)
        })
    }

    /// Minimum explicit coordinate among all sources, per axis name.
    ///
    /// Axes that no source places explicitly are absent from the result.
    pub fn source_minimums(&self) -> IndexMap<String, f64> {
        let mut minimums = IndexMap::new();
        for axis in &self.axes {
            let min = self
                .sources
                .iter()
                .filter_map(|source| source.location.get(&axis.name).copied())
                .reduce(f64::min);
            if let Some(min) = min {
                minimums.insert(axis.name.clone(), min);
            }
        }
        minimums
    }

    /// Validate the designspace.
    pub fn validate(&self) -> Result<()> {
        if self.axes.is_empty() {
            return Err(Error::InvalidDesignspace("must have at least one axis".into()));
        }

        for (index, axis) in self.axes.iter().enumerate() {
            if self.axes[..index].iter().any(|other| other.name == axis.name) {
                return Err(Error::InvalidDesignspace(format!(
                    "axis name '{}' is declared more than once",
                    axis.name
                )));
            }
            if axis.tag.len() > 4 {
                return Err(Error::InvalidDesignspace(format!(
                    "axis tag '{}' must be 4 characters or less",
                    axis.tag
                )));
            }
            if axis.minimum > axis.maximum {
                return Err(Error::InvalidDesignspace(format!(
                    "axis '{}' has minimum {} above maximum {}",
                    axis.name, axis.minimum, axis.maximum
                )));
            }
        }

        let locations = self
            .sources
            .iter()
            .map(|s| &s.location)
            .chain(self.instances.iter().map(|i| &i.location));
        for location in locations {
            if let Some(name) = location.keys().find(|name| !self.has_axis(name)) {
                return Err(Error::UnknownAxis(name.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_from_name_truncates_tag() {
        let axis = Axis::from_name("Weight-e", 100.0, 300.0);
        assert_eq!(axis.tag, "Weig");
        assert_eq!(axis.default, 100.0);
        assert_eq!(axis.midpoint(), 200.0);
    }

    #[test]
    fn axis_from_short_name() {
        assert_eq!(Axis::from_name("X-e", 0.0, 1.0).tag, "X-e");
    }

    #[test]
    fn discrete_axis_bounds_cover_values() {
        let axis = Axis::discrete("ital", "Italic", vec![0.0, 1.0], 0.0);
        assert!(axis.is_discrete());
        assert_eq!((axis.minimum, axis.default, axis.maximum), (0.0, 0.0, 1.0));
        assert!(!Axis::new("wght", "Weight", 100.0, 400.0, 900.0).is_discrete());
    }

    #[test]
    fn map_forward_interpolates() {
        let axis = Axis::new("wght", "Weight", 100.0, 400.0, 900.0)
            .with_map([(100.0, 20.0), (400.0, 80.0), (900.0, 200.0)]);

        assert_eq!(axis.map_forward(100.0), 20.0);
        assert_eq!(axis.map_forward(250.0), 50.0);
        assert_eq!(axis.map_forward(650.0), 140.0);
        assert_eq!(axis.map_forward(50.0), 20.0);
        assert_eq!(axis.map_forward(1000.0), 200.0);
    }

    #[test]
    fn map_forward_identity_without_map() {
        let axis = Axis::new("wdth", "Width", 50.0, 100.0, 200.0);
        assert_eq!(axis.map_forward(75.0), 75.0);
    }

    #[test]
    fn source_axis_value_falls_back_to_default() {
        let axis = Axis::new("wght", "Weight", 100.0, 400.0, 900.0);
        let source = Source::new("Regular.ufo", []);
        assert_eq!(source.axis_value(&axis), 400.0);
    }

    #[test]
    fn instance_builders() {
        let instance = Instance::new("Bold", [("Weight", 700.0)])
            .with_family_name("Crispy")
            .with_postscript_name("Crispy-Bold");
        assert_eq!(instance.style_name.as_deref(), Some("Bold"));
        assert_eq!(instance.family_name.as_deref(), Some("Crispy"));
        assert_eq!(instance.postscript_name.as_deref(), Some("Crispy-Bold"));
        assert!(instance.yvalues.is_empty());
    }

    #[test]
    fn designspace_default_source() {
        let axes = vec![
            Axis::new("wght", "Weight", 300.0, 400.0, 900.0),
            Axis::new("ital", "Italic", 0.0, 0.0, 1.0),
        ];

        let sources = vec![
            Source::new("Bold.ufo", [("Weight", 700.0), ("Italic", 0.0)]),
            Source::new("Regular.ufo", [("Weight", 400.0)]),
        ];

        let ds = DesignSpace::new(axes, sources);
        assert_eq!(ds.default_source().unwrap().filename, "Regular.ufo");
    }

    #[test]
    fn source_minimums_ignore_implicit_coordinates() {
        let axes = vec![
            Axis::new("wght", "Weight", 100.0, 400.0, 900.0),
            Axis::new("wdth", "Width", 50.0, 100.0, 100.0),
        ];
        let sources = vec![
            Source::new("A.ufo", [("Weight", 300.0)]),
            Source::new("B.ufo", [("Weight", 900.0)]),
        ];

        let minimums = DesignSpace::new(axes, sources).source_minimums();
        assert_eq!(minimums.get("Weight"), Some(&300.0));
        assert_eq!(minimums.get("Width"), None);
    }

    #[test]
    fn validate_rejects_duplicate_axis_names() {
        let ds = DesignSpace::new(
            vec![Axis::from_name("Weight", 0.0, 1.0), Axis::from_name("Weight", 0.0, 1.0)],
            vec![],
        );
        assert!(matches!(ds.validate(), Err(Error::InvalidDesignspace(_))));
    }

    #[test]
    fn validate_rejects_unknown_location_axis() {
        let ds = DesignSpace::new(
            vec![Axis::from_name("Weight", 0.0, 1.0)],
            vec![Source::new("A.ufo", [("Slant", 1.0)])],
        );
        assert!(matches!(ds.validate(), Err(Error::UnknownAxis(name)) if name == "Slant"));
    }
}
