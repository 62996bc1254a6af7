//! Axis tags and named-instance coordinates read from `fvar`.

use indexmap::IndexMap;
use read_fonts::{FontRef, TableProvider};
use skrifa::{MetadataProvider, string::StringId};

use crate::error::Result;

/// User-space coordinates keyed by axis tag.
pub type Coordinates = IndexMap<String, f64>;

/// Variation data of one font binary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontAxes {
    /// Axis tags in `fvar` order
    pub tags: Vec<String>,
    /// Named-instance coordinates, keyed by subfamily name and by PostScript name
    pub instances: IndexMap<String, Coordinates>,
}

impl FontAxes {
    /// Read axes from a font. Static fonts yield no axes.
    pub fn read(data: &[u8]) -> Result<Self> {
        let font = FontRef::new(data)?;
        if font.fvar().is_err() {
            return Ok(Self::default());
        }

        let tags: Vec<String> = font.axes().iter().map(|axis| axis.tag().to_string()).collect();
        let mut instances = IndexMap::new();
        for named in font.named_instances().iter() {
            let coordinates: Coordinates = tags
                .iter()
                .cloned()
                .zip(named.user_coords().map(f64::from))
                .collect();

            let names = [Some(named.subfamily_name_id()), named.postscript_name_id()];
            for name in names.into_iter().flatten().filter_map(|id| english_string(&font, id)) {
                instances.insert(name, coordinates.clone());
            }
        }
        Ok(Self { tags, instances })
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Coordinates of the named instance a compiled binary was built from.
    ///
    /// `stem` is the binary's file stem, e.g. `Crispy-SemiBold`. It matches
    /// a subfamily or PostScript name exactly, or ends with `-` followed by
    /// the subfamily name without spaces.
    pub fn instance_for(&self, stem: &str) -> Option<&Coordinates> {
        if let Some(coordinates) = self.instances.get(stem) {
            return Some(coordinates);
        }
        self.instances
            .iter()
            .find(|(name, _)| {
                let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
                !compact.is_empty() && stem.ends_with(&format!("-{compact}"))
            })
            .map(|(_, coordinates)| coordinates)
    }
}

fn english_string(font: &FontRef, id: StringId) -> Option<String> {
    font.localized_strings(id)
        .english_or_first()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}
