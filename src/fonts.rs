//! Font metrics and text measurement using `ttf-parser`.
//!
//! The rendering backend uses the builtin Helvetica pair, so by default the
//! manager measures with an average-advance heuristic. Real TTF faces can be
//! loaded for accurate wrapping and right-alignment.

use crate::document::FontId;
use crate::error::{Error, Result};

/// Ellipsis used as the truncation indicator.
pub const ELLIPSIS: char = '\u{2026}';

struct FontData {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API).
    bytes: Vec<u8>,
    units_per_em: f32,
}

/// Measures text for the base and bold faces.
#[derive(Default)]
pub struct FontManager {
    base: Option<FontData>,
    bold: Option<FontData>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TTF/OTF face for one of the two font slots.
    pub fn load_font(&mut self, font: FontId, bytes: Vec<u8>) -> Result<()> {
        let face = ttf_parser::Face::parse(&bytes, 0)
            .map_err(|e| Error::Config(format!("failed to parse font: {e}")))?;
        let data = FontData {
            units_per_em: face.units_per_em() as f32,
            bytes,
        };
        match font {
            FontId::Base => self.base = Some(data),
            FontId::Bold => self.bold = Some(data),
        }
        Ok(())
    }

    fn slot(&self, font: FontId) -> Option<&FontData> {
        match font {
            FontId::Base => self.base.as_ref(),
            // bold falls back to the base face's advances
            FontId::Bold => self.bold.as_ref().or(self.base.as_ref()),
        }
    }

    /// Measure the width of a string at a given size in points.
    ///
    /// With a loaded face, glyph advances are summed; otherwise an average
    /// character width heuristic is used (0.5 × size, bold ~10 % wider).
    pub fn measure(&self, text: &str, size: f32, font: FontId) -> f32 {
        let Some(data) = self.slot(font) else {
            let avg = if font == FontId::Bold { 0.55 } else { 0.5 };
            return text.chars().count() as f32 * size * avg;
        };

        if let Ok(face) = ttf_parser::Face::parse(&data.bytes, 0) {
            let scale = size / data.units_per_em;
            let mut width = 0.0f32;
            for ch in text.chars() {
                match face.glyph_index(ch) {
                    Some(gid) => {
                        width += face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
                    }
                    None => width += size * 0.5,
                }
            }
            width
        } else {
            text.chars().count() as f32 * size * 0.5
        }
    }

    /// Word-wrap text to fit within `max_width` points.
    pub fn wrap(&self, text: &str, size: f32, font: FontId, max_width: f32) -> Vec<String> {
        if max_width <= 0.0 || text.is_empty() {
            return vec![text.to_string()];
        }

        let mut lines: Vec<String> = Vec::new();
        for paragraph in text.split('\n') {
            let words: Vec<&str> = paragraph.split_whitespace().collect();
            if words.is_empty() {
                lines.push(String::new());
                continue;
            }

            let mut current = String::new();
            for word in &words {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{current} {word}")
                };
                if self.measure(&candidate, size, font) > max_width && !current.is_empty() {
                    lines.push(current);
                    current = word.to_string();
                } else {
                    current = candidate;
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }

        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    /// Fit text on a single line, replacing overflow with an ellipsis.
    pub fn truncate(&self, text: &str, size: f32, font: FontId, max_width: f32) -> String {
        if max_width <= 0.0 || self.measure(text, size, font) <= max_width {
            return text.to_string();
        }
        let mut kept: Vec<char> = text.chars().collect();
        while kept.pop().is_some() {
            let mut candidate: String = kept.iter().collect();
            candidate.push(ELLIPSIS);
            if self.measure(&candidate, size, font) <= max_width {
                return candidate;
            }
        }
        ELLIPSIS.to_string()
    }
}
