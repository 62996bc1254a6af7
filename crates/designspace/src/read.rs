//! Designspace XML reader.

use std::{fs::read_to_string, path::Path};

use log::debug;
use roxmltree::{Document, Node};

use crate::{
    error::{Error, Result},
    model::{Axis, AxisMap, DEFAULT_FORMAT, DesignSpace, Instance, Location, Source},
};

impl DesignSpace {
    /// Load a designspace document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|e| Error::io(path, e))?;
        let designspace = Self::parse(&text)?;
        debug!(
            "Loaded {}: {} axes, {} sources, {} instances",
            path.display(),
            designspace.axes.len(),
            designspace.sources.len(),
            designspace.instances.len()
        );
        Ok(designspace)
    }

    /// Parse a designspace document from XML text.
    pub fn parse(text: &str) -> Result<Self> {
        let doc = Document::parse(text)?;
        let root = doc.root_element();
        if root.tag_name().name() != "designspace" {
            return Err(Error::NotDesignspace(root.tag_name().name().to_string()));
        }

        let mut designspace = DesignSpace {
            format: root.attribute("format").unwrap_or(DEFAULT_FORMAT).to_string(),
            ..DesignSpace::default()
        };

        for child in root.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "axes" => {
                    designspace.axes_attributes = child
                        .attributes()
                        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
                        .collect();
                    for node in elements(child, "axis") {
                        designspace.axes.push(parse_axis(node, text)?);
                    }
                }
                "sources" => {
                    for node in elements(child, "source") {
                        designspace.sources.push(parse_source(node, text, &designspace.axes)?);
                    }
                }
                "instances" => {
                    for node in elements(child, "instance") {
                        designspace.instances.push(parse_instance(
                            node,
                            text,
                            &designspace.axes,
                        )?);
                    }
                }
                _ => designspace.extra.push(raw(child, text)),
            }
        }

        Ok(designspace)
    }
}

fn elements<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    parent
        .children()
        .filter(move |node| node.is_element() && node.tag_name().name() == name)
}

fn raw(node: Node, text: &str) -> String {
    text[node.range()].to_string()
}

fn string_attr(node: Node, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

fn number_attr(node: Node, element: &'static str, attribute: &'static str) -> Result<Option<f64>> {
    node.attribute(attribute)
        .map(|value| {
            value.trim().parse::<f64>().map_err(|_| Error::InvalidNumber {
                element,
                attribute,
                value: value.to_string(),
            })
        })
        .transpose()
}

fn required_number(node: Node, element: &'static str, attribute: &'static str) -> Result<f64> {
    number_attr(node, element, attribute)?.ok_or(Error::MissingAttribute { element, attribute })
}

fn parse_axis(node: Node, text: &str) -> Result<Axis> {
    let name = node
        .attribute("name")
        .ok_or(Error::MissingAttribute { element: "axis", attribute: "name" })?;
    let tag = node.attribute("tag").unwrap_or_default();

    // Discrete axes list their values instead of a range.
    let discrete = node
        .attribute("values")
        .map(|values| {
            values
                .split_whitespace()
                .map(|v| {
                    v.parse::<f64>().map_err(|_| Error::InvalidNumber {
                        element: "axis",
                        attribute: "values",
                        value: v.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>>>()
        })
        .transpose()?;

    let default = required_number(node, "axis", "default")?;
    let mut axis = match discrete {
        Some(values) if !values.is_empty() => Axis::discrete(tag, name, values, default),
        _ => Axis::new(
            tag,
            name,
            required_number(node, "axis", "minimum")?,
            default,
            required_number(node, "axis", "maximum")?,
        ),
    };
    axis.hidden = matches!(node.attribute("hidden"), Some("1" | "true"));

    let mut map = Vec::new();
    for child in node.children().filter(Node::is_element) {
        if child.tag_name().name() == "map" {
            map.push(AxisMap {
                input: required_number(child, "map", "input")?,
                output: required_number(child, "map", "output")?,
            });
        } else {
            axis.extra.push(raw(child, text));
        }
    }
    axis.map = map;
    axis.map.sort_by(|a, b| a.input.total_cmp(&b.input));

    Ok(axis)
}

/// Design-space coordinates plus the `yvalue`s of anisotropic dimensions.
fn parse_location(node: Node, axes: &[Axis]) -> Result<(Location, Location)> {
    let mut location = Location::new();
    let mut yvalues = Location::new();
    for dimension in elements(node, "dimension") {
        let name = dimension
            .attribute("name")
            .ok_or(Error::MissingAttribute { element: "dimension", attribute: "name" })?;

        let value = match number_attr(dimension, "dimension", "xvalue")? {
            Some(value) => value,
            None => {
                let user = required_number(dimension, "dimension", "uservalue")?;
                axes.iter()
                    .find(|axis| axis.name == name)
                    .map_or(user, |axis| axis.map_forward(user))
            }
        };
        location.insert(name.to_string(), value);
        if let Some(y) = number_attr(dimension, "dimension", "yvalue")? {
            yvalues.insert(name.to_string(), y);
        }
    }
    Ok((location, yvalues))
}

fn parse_source(node: Node, text: &str, axes: &[Axis]) -> Result<Source> {
    let filename = node
        .attribute("filename")
        .ok_or(Error::MissingAttribute { element: "source", attribute: "filename" })?;

    let mut source = Source {
        filename: filename.to_string(),
        name: string_attr(node, "name"),
        family_name: string_attr(node, "familyname"),
        style_name: string_attr(node, "stylename"),
        layer: string_attr(node, "layer"),
        ..Source::default()
    };

    for child in node.children().filter(Node::is_element) {
        if child.tag_name().name() == "location" {
            (source.location, source.yvalues) = parse_location(child, axes)?;
        } else {
            source.extra.push(raw(child, text));
        }
    }
    Ok(source)
}

fn parse_instance(node: Node, text: &str, axes: &[Axis]) -> Result<Instance> {
    let mut instance = Instance {
        name: string_attr(node, "name"),
        family_name: string_attr(node, "familyname"),
        style_name: string_attr(node, "stylename"),
        filename: string_attr(node, "filename"),
        postscript_name: string_attr(node, "postscriptfontname"),
        style_map_family_name: string_attr(node, "stylemapfamilyname"),
        style_map_style_name: string_attr(node, "stylemapstylename"),
        ..Instance::default()
    };

    for child in node.children().filter(Node::is_element) {
        if child.tag_name().name() == "location" {
            (instance.location, instance.yvalues) = parse_location(child, axes)?;
        } else {
            instance.extra.push(raw(child, text));
        }
    }
    Ok(instance)
}
