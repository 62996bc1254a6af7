//! Axis default rewrite on a serialized designspace.
//!
//! Runs over the written file rather than the in-memory model, so the
//! on-disk `default` of each axis ends up equal to the minimum source
//! coordinate even when later edits moved sources after the axis was built.

use std::{
    fs::{read_to_string, write},
    path::Path,
};

use indexmap::IndexMap;
use log::{debug, info};
use quick_xml::{
    Reader, Writer,
    events::{BytesStart, Event},
};

use crate::{
    error::{Error, Result},
    model::DesignSpace,
    write::format_number,
};

/// Replace the `default` attribute of every `axes/axis` named in `defaults`.
///
/// Everything else in the document, whitespace included, is copied through
/// unchanged. Returns the number of axes rewritten.
pub fn rewrite_axis_defaults(
    path: impl AsRef<Path>,
    defaults: &IndexMap<String, f64>,
) -> Result<usize> {
    let path = path.as_ref();
    let text = read_to_string(path).map_err(|e| Error::io(path, e))?;
    let (rewritten, count) = rewrite_axis_defaults_in(&text, defaults)?;
    write(path, rewritten).map_err(|e| Error::io(path, e))?;
    debug!("Rewrote {count} axis defaults in {}", path.display());
    Ok(count)
}

/// Set each axis default in the written document at `path` to the minimum
/// coordinate among `designspace`'s sources.
pub fn normalize_axis_defaults(
    path: impl AsRef<Path>,
    designspace: &DesignSpace,
) -> Result<IndexMap<String, f64>> {
    let minimums = designspace.source_minimums();
    info!("Axis minimums over sources: {minimums:?}");
    rewrite_axis_defaults(path, &minimums)?;
    Ok(minimums)
}

/// String-to-string form of [`rewrite_axis_defaults`].
pub fn rewrite_axis_defaults_in(
    text: &str,
    defaults: &IndexMap<String, f64>,
) -> Result<(String, usize)> {
    let mut reader = Reader::from_str(text);
    let mut writer = Writer::new(Vec::new());
    let mut stack: Vec<String> = Vec::new();
    let mut count = 0;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(element) => {
                let name = element_name(&element);
                let element = rewrite_if_axis(element, &stack, defaults, &mut count)?;
                writer.write_event(Event::Start(element))?;
                stack.push(name);
            }
            Event::Empty(element) => {
                let element = rewrite_if_axis(element, &stack, defaults, &mut count)?;
                writer.write_event(Event::Empty(element))?;
            }
            Event::End(element) => {
                stack.pop();
                writer.write_event(Event::End(element))?;
            }
            event => writer.write_event(event)?,
        }
    }

    Ok((String::from_utf8(writer.into_inner())?, count))
}

fn element_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn rewrite_if_axis<'a>(
    element: BytesStart<'a>,
    stack: &[String],
    defaults: &IndexMap<String, f64>,
    count: &mut usize,
) -> Result<BytesStart<'a>> {
    let in_axes = matches!(stack, [.., parent] if parent == "axes");
    if !in_axes || element.name().as_ref() != b"axis" {
        return Ok(element);
    }

    let mut axis_name = None;
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            let value = attr.unescape_value().map_err(|e| Error::XmlValue(e.to_string()))?;
            axis_name = Some(value.into_owned());
        }
    }
    let Some(default) = axis_name.as_ref().and_then(|name| defaults.get(name)) else {
        return Ok(element);
    };
    let default = format_number(*default);

    let mut rewritten = BytesStart::new("axis");
    let mut replaced = false;
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"default" {
            rewritten.push_attribute(("default", default.as_str()));
            replaced = true;
        } else {
            rewritten.push_attribute(attr);
        }
    }
    if !replaced {
        rewritten.push_attribute(("default", default.as_str()));
    }
    *count += 1;
    Ok(rewritten)
}
