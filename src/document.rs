//! Document model – the intermediate representation between layout
//! computation and PDF rendering. This is the "frozen" structure that encodes
//! exactly what goes on each page: an ordered list of absolute draw
//! instructions per page. Order within a page is z-order (backgrounds first).

use serde::{Deserialize, Serialize};

/// An RGB colour with components in `0.0..=1.0`.
pub type Rgb = [f32; 3];

/// Build an [`Rgb`] from 8-bit components.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Primary text colour (`#111827`).
pub const DARK: Rgb = rgb(0x11, 0x18, 0x27);
/// Secondary text colour for labels and details (`#6b7280`).
pub const GRAY: Rgb = rgb(0x6b, 0x72, 0x80);
/// Row divider stroke (`#e5e7eb`).
pub const DIVIDER: Rgb = rgb(0xe5, 0xe7, 0xeb);
/// Negative amounts in the totals block (`#DC2626`).
pub const DISCOUNT_RED: Rgb = rgb(0xdc, 0x26, 0x26);
/// Page-number stamp colour (`#555555`).
pub const PAGE_NUMBER_GRAY: Rgb = rgb(0x55, 0x55, 0x55);

/// Font selector understood by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontId {
    Base,
    Bold,
}

/// Horizontal alignment of text inside its width constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Resolved text styling carried by every text instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontId,
    pub size: f32,
    pub color: Rgb,
    pub align: Align,
    /// Render on a single line, replacing overflow with an ellipsis, instead
    /// of wrapping.
    #[serde(default)]
    pub truncate: bool,
}

impl TextStyle {
    pub fn new(font: FontId, size: f32, color: Rgb) -> Self {
        Self {
            font,
            size,
            color,
            align: Align::Left,
            truncate: false,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.truncate = true;
        self
    }
}

/// A single primitive draw operation with absolute position and style.
/// Positions are in points from the page's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderInstruction {
    Text {
        x: f32,
        y: f32,
        /// Width constraint for wrapping, truncation, and right alignment.
        width: f32,
        text: String,
        style: TextStyle,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke_width: f32,
        color: Rgb,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Base64 data URI; the backend skips sources it cannot decode.
        src: String,
    },
}

/// One page of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub instructions: Vec<RenderInstruction>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            instructions: Vec::new(),
        }
    }
}

/// A complete multi-page document ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Title embedded in the PDF metadata.
    pub title: String,
    /// Width of each page in PDF points.
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Ordered list of pages.
    pub pages: Vec<Page>,
    /// Set once the page-number annotator has run; stamping twice is an
    /// error.
    #[serde(default)]
    pub page_numbers_stamped: bool,
}

impl Document {
    pub fn new(title: impl Into<String>, page_width_pt: f32, page_height_pt: f32) -> Self {
        Self {
            title: title.into(),
            page_width_pt,
            page_height_pt,
            pages: Vec::new(),
            page_numbers_stamped: false,
        }
    }

    /// Number of pages produced by pagination.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}
