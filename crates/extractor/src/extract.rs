//! fvar/avar/name to designspace conversion.

use std::path::Path;

use designspace::{Axis, DesignSpace, Instance, Source};
use log::{debug, info};
use read_fonts::{FontRef, TableProvider, tables::avar::Avar};
use skrifa::{MetadataProvider, string::StringId};

use crate::error::{Error, Result};

/// Build a designspace describing the variable font in `data`.
///
/// `font_path` becomes the file name of the single source, which sits at
/// the default location.
pub fn extract_designspace(data: &[u8], font_path: &Path) -> Result<DesignSpace> {
    let font = FontRef::new(data)?;
    if font.fvar().is_err() {
        return Err(Error::NotVariableFont);
    }

    let avar = font.avar().ok();
    let axes: Vec<Axis> = font
        .axes()
        .iter()
        .map(|axis| {
            let tag = axis.tag().to_string();
            let name = english_string(&font, axis.name_id()).unwrap_or_else(|| tag.clone());
            let (min, default, max) =
                (axis.min_value() as f64, axis.default_value() as f64, axis.max_value() as f64);

            let mut descriptor = Axis::new(&tag, &name, min, default, max);
            descriptor.hidden = axis.is_hidden();
            if let Some(avar) = &avar {
                let map = segment_map(avar, axis.index(), min, default, max);
                if !map.is_empty() {
                    debug!("{tag}: {} avar points", map.len());
                    descriptor = descriptor.with_map(map);
                }
            }
            descriptor
        })
        .collect();

    let family = english_string(&font, StringId::TYPOGRAPHIC_FAMILY_NAME)
        .or_else(|| english_string(&font, StringId::FAMILY_NAME));
    let default_style = english_string(&font, StringId::TYPOGRAPHIC_SUBFAMILY_NAME)
        .or_else(|| english_string(&font, StringId::SUBFAMILY_NAME));

    let mut source = Source::new(
        &font_path.to_string_lossy(),
        axes.iter().map(|axis| (axis.name.as_str(), axis.map_forward(axis.default))),
    );
    source.family_name = family.clone();
    source.style_name = default_style;

    let instances: Vec<Instance> = font
        .named_instances()
        .iter()
        .map(|named| {
            let style = english_string(&font, named.subfamily_name_id()).unwrap_or_default();
            let location = axes
                .iter()
                .zip(named.user_coords())
                .map(|(axis, user)| (axis.name.as_str(), axis.map_forward(user as f64)));

            let mut instance = Instance::new(&style, location);
            if let Some(family) = &family {
                instance = instance.with_family_name(family);
            }
            match named.postscript_name_id().and_then(|id| english_string(&font, id)) {
                Some(postscript) => instance.with_postscript_name(&postscript),
                None => instance,
            }
        })
        .collect();

    info!(
        "Extracted {} axes and {} named instances from {}",
        axes.len(),
        instances.len(),
        font_path.display()
    );
    Ok(DesignSpace::new(axes, vec![source]).with_instances(instances))
}

fn english_string(font: &FontRef, id: StringId) -> Option<String> {
    font.localized_strings(id)
        .english_or_first()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

/// User-space `(input, output)` points of one axis' avar segment map.
///
/// Identity maps produce no points.
fn segment_map(avar: &Avar, index: usize, min: f64, default: f64, max: f64) -> Vec<(f64, f64)> {
    let Some(Ok(segments)) = avar.axis_segment_maps().get(index) else {
        return Vec::new();
    };

    let points: Vec<(f64, f64)> = segments
        .axis_value_maps()
        .iter()
        .map(|map| {
            let from = map.from_coordinate().to_f32() as f64;
            let to = map.to_coordinate().to_f32() as f64;
            (
                denormalize(from, min, default, max),
                denormalize(to, min, default, max),
            )
        })
        .collect();

    if points.iter().all(|(input, output)| input == output) {
        return Vec::new();
    }
    points
}

/// Normalized (-1..1) coordinate back to the axis' user range, rounded to
/// three decimals.
pub(crate) fn denormalize(value: f64, min: f64, default: f64, max: f64) -> f64 {
    let user = if value < 0.0 {
        default + value * (default - min)
    } else {
        default + value * (max - default)
    };
    (user * 1000.0).round() / 1000.0
}
