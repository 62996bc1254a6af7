//! Shaped advance width of a text run.

use rustybuzz::{Face, Feature, UnicodeBuffer, ttf_parser::Tag};

use crate::error::{Error, Result};

/// Features applied when shaping. Both are on by default in HarfBuzz;
/// they are listed so the measurement does not depend on that default.
const FEATURES: [&[u8; 4]; 2] = [b"kern", b"liga"];

/// Sum of the horizontal advances of `text` shaped with `data`, in font units.
pub fn measure_text_width(data: &[u8], text: &str) -> Result<i32> {
    let face = Face::from_slice(data, 0).ok_or(Error::Shaping)?;

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.guess_segment_properties();

    let features: Vec<Feature> =
        FEATURES.iter().map(|tag| Feature::new(Tag::from_bytes(tag), 1, ..)).collect();
    let glyphs = rustybuzz::shape(&face, &features, buffer);

    Ok(glyphs.glyph_positions().iter().map(|position| position.x_advance).sum())
}

#[cfg(test)]
mod tests {
    use read_fonts::FontRef;
    use skrifa::{GlyphId, MetadataProvider, instance::{LocationRef, Size}};

    use super::*;

    fn advance(data: &[u8], gid: u32) -> i32 {
        let font = FontRef::new(data).unwrap();
        let metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
        metrics.advance_width(GlyphId::new(gid)).unwrap() as i32
    }

    #[test]
    fn single_glyph_matches_hmtx_advance() {
        let data = font_test_data::VAZIRMATN_VAR;
        // 'A' is glyph 1.
        assert_eq!(measure_text_width(data, "A").unwrap(), advance(data, 1));
    }

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(measure_text_width(font_test_data::VAZIRMATN_VAR, "").unwrap(), 0);
    }

    #[test]
    fn unreadable_font() {
        assert!(matches!(measure_text_width(b"not a font", "H"), Err(Error::Shaping)));
    }
}
