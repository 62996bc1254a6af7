//! Designspace XML writer.

use std::{fs::write, io::Write as _, path::Path};

use log::debug;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};

use crate::{
    error::{Error, Result},
    model::{Axis, DesignSpace, Instance, Location, Source},
};

/// Top-level elements that belong between `<axes>` and `<sources>`.
const LEADING_EXTRAS: &[&str] = &["<axis-mappings", "<labels", "<rules"];

type XmlWriter = Writer<Vec<u8>>;

/// Format a coordinate in its shortest form (`100`, `0.5`).
pub(crate) fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl DesignSpace {
    /// Serialize the document to XML text.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("designspace");
        root.push_attribute(("format", self.format.as_str()));
        writer.write_event(Event::Start(root))?;

        if !self.axes.is_empty() {
            let mut axes = BytesStart::new("axes");
            for (name, value) in &self.axes_attributes {
                axes.push_attribute((name.as_str(), value.as_str()));
            }
            writer.write_event(Event::Start(axes))?;
            for axis in &self.axes {
                write_axis(&mut writer, axis)?;
            }
            writer.write_event(Event::End(BytesEnd::new("axes")))?;
        }

        let (leading, trailing): (Vec<&String>, Vec<&String>) = self
            .extra
            .iter()
            .partition(|xml| LEADING_EXTRAS.iter().any(|tag| xml.starts_with(tag)));
        write_raw(&mut writer, leading)?;

        if !self.sources.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("sources")))?;
            for source in &self.sources {
                write_source(&mut writer, source)?;
            }
            writer.write_event(Event::End(BytesEnd::new("sources")))?;
        }

        if !self.instances.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("instances")))?;
            for instance in &self.instances {
                write_instance(&mut writer, instance)?;
            }
            writer.write_event(Event::End(BytesEnd::new("instances")))?;
        }

        write_raw(&mut writer, trailing)?;
        writer.write_event(Event::End(BytesEnd::new("designspace")))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(String::from_utf8(bytes)?)
    }

    /// Write the document to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let xml = self.to_xml()?;
        write(path, xml).map_err(|e| Error::io(path, e))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn write_raw<'a>(
    writer: &mut XmlWriter,
    snippets: impl IntoIterator<Item = &'a String>,
) -> Result<()> {
    for snippet in snippets {
        writer.write_indent()?;
        writer.get_mut().write_all(snippet.as_bytes())?;
    }
    Ok(())
}

fn optional_attr<'a>(element: &mut BytesStart<'a>, name: &'a str, value: &'a Option<String>) {
    if let Some(value) = value {
        element.push_attribute((name, value.as_str()));
    }
}

fn write_axis(writer: &mut XmlWriter, axis: &Axis) -> Result<()> {
    let minimum = format_number(axis.minimum);
    let maximum = format_number(axis.maximum);
    let default = format_number(axis.default);
    let values = axis.values.as_ref().map(|values| {
        values.iter().map(|&v| format_number(v)).collect::<Vec<_>>().join(" ")
    });

    let mut element = BytesStart::new("axis");
    element.push_attribute(("tag", axis.tag.as_str()));
    element.push_attribute(("name", axis.name.as_str()));
    match &values {
        Some(values) => element.push_attribute(("values", values.as_str())),
        None => {
            element.push_attribute(("minimum", minimum.as_str()));
            element.push_attribute(("maximum", maximum.as_str()));
        }
    }
    element.push_attribute(("default", default.as_str()));
    if axis.hidden {
        element.push_attribute(("hidden", "1"));
    }

    if axis.map.is_empty() && axis.extra.is_empty() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    for point in &axis.map {
        let input = format_number(point.input);
        let output = format_number(point.output);
        let mut map = BytesStart::new("map");
        map.push_attribute(("input", input.as_str()));
        map.push_attribute(("output", output.as_str()));
        writer.write_event(Event::Empty(map))?;
    }
    write_raw(writer, &axis.extra)?;
    writer.write_event(Event::End(BytesEnd::new("axis")))?;
    Ok(())
}

fn write_location(writer: &mut XmlWriter, location: &Location, yvalues: &Location) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("location")))?;
    for (name, value) in location {
        let value = format_number(*value);
        let yvalue = yvalues.get(name).map(|&y| format_number(y));
        let mut dimension = BytesStart::new("dimension");
        dimension.push_attribute(("name", name.as_str()));
        dimension.push_attribute(("xvalue", value.as_str()));
        if let Some(yvalue) = &yvalue {
            dimension.push_attribute(("yvalue", yvalue.as_str()));
        }
        writer.write_event(Event::Empty(dimension))?;
    }
    writer.write_event(Event::End(BytesEnd::new("location")))?;
    Ok(())
}

fn write_source(writer: &mut XmlWriter, source: &Source) -> Result<()> {
    let mut element = BytesStart::new("source");
    element.push_attribute(("filename", source.filename.as_str()));
    optional_attr(&mut element, "name", &source.name);
    optional_attr(&mut element, "familyname", &source.family_name);
    optional_attr(&mut element, "stylename", &source.style_name);
    optional_attr(&mut element, "layer", &source.layer);

    writer.write_event(Event::Start(element))?;
    write_raw(writer, &source.extra)?;
    write_location(writer, &source.location, &source.yvalues)?;
    writer.write_event(Event::End(BytesEnd::new("source")))?;
    Ok(())
}

fn write_instance(writer: &mut XmlWriter, instance: &Instance) -> Result<()> {
    let mut element = BytesStart::new("instance");
    optional_attr(&mut element, "name", &instance.name);
    optional_attr(&mut element, "familyname", &instance.family_name);
    optional_attr(&mut element, "stylename", &instance.style_name);
    optional_attr(&mut element, "filename", &instance.filename);
    optional_attr(&mut element, "postscriptfontname", &instance.postscript_name);
    optional_attr(&mut element, "stylemapfamilyname", &instance.style_map_family_name);
    optional_attr(&mut element, "stylemapstylename", &instance.style_map_style_name);

    writer.write_event(Event::Start(element))?;
    write_location(writer, &instance.location, &instance.yvalues)?;
    write_raw(writer, &instance.extra)?;
    writer.write_event(Event::End(BytesEnd::new("instance")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(150.25), "150.25");
    }

    #[test]
    fn writes_declaration_and_axes() {
        let ds = DesignSpace::new(
            vec![Axis::new("wght", "Weight", 100.0, 400.0, 900.0)],
            vec![Source::new("Regular.ufo", [("Weight", 400.0)]).with_style_name("Regular")],
        );
        let xml = ds.to_xml().unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<designspace format="5.0">"#));
        assert!(xml.contains(
            r#"<axis tag="wght" name="Weight" minimum="100" maximum="900" default="400"/>"#
        ));
        assert!(xml.contains(r#"<dimension name="Weight" xvalue="400"/>"#));
    }

    #[test]
    fn writes_discrete_axis_values() {
        let italic = Axis::discrete("ital", "Italic", vec![0.0, 1.0], 0.0);
        let xml = DesignSpace::new(vec![italic], vec![]).to_xml().unwrap();
        assert!(xml.contains(r#"<axis tag="ital" name="Italic" values="0 1" default="0"/>"#));
    }

    #[test]
    fn escapes_attribute_values() {
        let ds = DesignSpace::new(
            vec![Axis::new("wght", "Weight", 100.0, 400.0, 900.0)],
            vec![Source::new("A&B.ufo", [])],
        );
        let xml = ds.to_xml().unwrap();
        assert!(xml.contains(r#"filename="A&amp;B.ufo""#));
        assert_eq!(DesignSpace::parse(&xml).unwrap().sources[0].filename, "A&B.ufo");
    }
}
