//! Axis merge and instance coordinate assignment.

use designspace::{Axis, DesignSpace};
use log::{debug, info};

use crate::mapping::{ExtensionAxis, Mapping};

/// Append a descriptor for every extension axis the document lacks.
///
/// New axes take their bounds from the mapping, a tag made of the first four
/// characters of the name and a default equal to the minimum. Axes already
/// declared are left as they are. Returns the names of the added axes.
pub fn ensure_extension_axes(doc: &mut DesignSpace, axes: &[ExtensionAxis]) -> Vec<String> {
    let mut added = Vec::new();
    for axis in axes {
        if doc.has_axis(&axis.name) {
            info!("Axis '{}' already exists in designspace", axis.name);
            continue;
        }
        doc.axes.push(Axis::from_name(&axis.name, axis.minimum, axis.maximum));
        info!("Added new axis: {} ({} .. {})", axis.name, axis.minimum, axis.maximum);
        added.push(axis.name.clone());
    }
    added
}

/// Count of instances resolved from the mapping versus placed at the midpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstanceAssignment {
    pub matched: usize,
    pub midpoint: usize,
}

/// Give every instance a coordinate on every extension axis.
///
/// An instance whose style name exactly matches a mapping row takes that
/// row's value; otherwise, or when the row leaves the axis blank, it sits at
/// the axis midpoint.
pub fn assign_instance_coordinates(doc: &mut DesignSpace, mapping: &Mapping) -> InstanceAssignment {
    let mut assignment = InstanceAssignment::default();

    for instance in &mut doc.instances {
        let row = instance.style_name.as_deref().and_then(|style| mapping.row(style));
        let label = instance.style_name.as_deref().unwrap_or("<unnamed>");

        for axis in mapping.axes() {
            let value = match row.and_then(|row| row.value(&axis.name)) {
                Some(value) => {
                    debug!("Instance '{label}': matched CSV, setting {}={value}", axis.name);
                    value
                }
                None => {
                    let value = axis.midpoint();
                    debug!("Instance '{label}': no CSV value, setting {} to {value}", axis.name);
                    value
                }
            };
            instance.location.insert(axis.name.clone(), value);
        }

        if row.is_some() {
            assignment.matched += 1;
        } else {
            assignment.midpoint += 1;
        }
    }

    info!(
        "Updated {} instances: {} matched CSV, {} at midpoint",
        doc.instances.len(),
        assignment.matched,
        assignment.midpoint
    );
    assignment
}

#[cfg(test)]
mod tests {
    use designspace::{Instance, Source};

    use super::*;
    use crate::mapping::MappingOptions;

    fn mapping(csv: &str) -> Mapping {
        Mapping::from_reader(csv.as_bytes(), &MappingOptions::default()).unwrap()
    }

    fn doc() -> DesignSpace {
        DesignSpace::new(
            vec![Axis::new("wght", "Weight", 300.0, 300.0, 800.0)],
            vec![Source::new("Light.ufo", [("Weight", 300.0)])],
        )
        .with_instances(vec![
            Instance::new("Bold", [("Weight", 700.0)]),
            Instance::new("Regular", [("Weight", 400.0)]),
        ])
    }

    #[test]
    fn adds_missing_axes_with_min_default() {
        let mut doc = doc();
        let map = mapping("Instance,Contrast-e\nBold,80\nRegular,20\n");

        let added = ensure_extension_axes(&mut doc, map.axes());
        assert_eq!(added, ["Contrast-e"]);

        let axis = doc.axis("Contrast-e").unwrap();
        assert_eq!(axis.tag, "Cont");
        assert_eq!((axis.minimum, axis.default, axis.maximum), (20.0, 20.0, 80.0));
        assert_eq!(doc.axes[0], Axis::new("wght", "Weight", 300.0, 300.0, 800.0));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut doc = doc();
        let map = mapping("Instance,Contrast-e\nBold,80\n");

        ensure_extension_axes(&mut doc, map.axes());
        let before = doc.axes.clone();
        assert!(ensure_extension_axes(&mut doc, map.axes()).is_empty());
        assert_eq!(doc.axes, before);
    }

    #[test]
    fn existing_axis_is_not_widened() {
        let mut doc = doc();
        doc.axes.push(Axis::new("Cont", "Contrast-e", 40.0, 40.0, 60.0));
        let map = mapping("Instance,Contrast-e\nBold,0\nLight,100\n");

        assert!(ensure_extension_axes(&mut doc, map.axes()).is_empty());
        let axis = doc.axis("Contrast-e").unwrap();
        assert_eq!((axis.minimum, axis.maximum), (40.0, 60.0));
    }

    #[test]
    fn instances_take_csv_value_or_midpoint() {
        let mut doc = doc();
        let map = mapping("Instance,Contrast-e,Serif-e\nBold,80,\nLight,20,4\n");

        let assignment = assign_instance_coordinates(&mut doc, &map);
        assert_eq!(assignment, InstanceAssignment { matched: 1, midpoint: 1 });

        let bold = &doc.instances[0].location;
        assert_eq!(bold.get("Contrast-e"), Some(&80.0));
        // Bold leaves Serif-e blank, so it gets the midpoint of 4..4.
        assert_eq!(bold.get("Serif-e"), Some(&4.0));
        assert_eq!(bold.get("Weight"), Some(&700.0));

        let regular = &doc.instances[1].location;
        assert_eq!(regular.get("Contrast-e"), Some(&50.0));
        assert_eq!(regular.get("Serif-e"), Some(&4.0));
    }

    #[test]
    fn unnamed_instance_gets_midpoint() {
        let mut doc = doc();
        doc.instances.push(Instance::default());
        let map = mapping("Instance,Contrast-e\nBold,80\nLight,20\n");

        assign_instance_coordinates(&mut doc, &map);
        assert_eq!(doc.instances[2].location.get("Contrast-e"), Some(&50.0));
    }
}
