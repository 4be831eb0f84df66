//! Page geometry – physical page sizes, orientation, and the responsive
//! design metrics derived from them (margins, font sizes, row heights).
//!
//! Everything here is pure: a page width maps to one constant set, and
//! unknown width classes fall back to the desktop-class (A4) constants.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{rgb, Rgb};
use crate::error::{Error, Result};

/// Width of an A3 page in points; formats at or above this are "large" and
/// trade margin for content area.
pub const A3_WIDTH_PT: f32 = 841.89;

/// Width of an A6 page in points; formats at or below this drop to the
/// smallest font sizes.
pub const A6_WIDTH_PT: f32 = 297.64;

/// Formats at or below this width (A5/A6 portrait) get the tightest margins.
pub const COMPACT_WIDTH_PT: f32 = 420.0;

/// Vertical start of content on every page.
pub const TOP_MARGIN_PT: f32 = 40.0;

/// Physical page sizes supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A2,
    A3,
    A4,
    A5,
    A6,
    Letter,
}

impl PageSize {
    /// Portrait dimensions in PDF points (1 pt = 1/72 inch).
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PageSize::A2 => (1190.55, 1683.78),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (419.53, 595.28),
            PageSize::A6 => (297.64, 419.53),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    /// Dimensions after applying the orientation.
    pub fn oriented(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_pt();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A2" => Ok(PageSize::A2),
            "A3" => Ok(PageSize::A3),
            "A4" => Ok(PageSize::A4),
            "A5" => Ok(PageSize::A5),
            "A6" => Ok(PageSize::A6),
            "LETTER" => Ok(PageSize::Letter),
            other => Err(Error::Config(format!("unknown page size '{other}'"))),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(Error::Config(format!("unknown orientation '{other}'"))),
        }
    }
}

/// Immutable page frame for one document render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    /// Space reserved above the physical bottom edge while placing rows
    /// (keeps room for totals/footer content).
    pub margin_bottom: f32,
    pub orientation: Orientation,
}

impl PageGeometry {
    /// Build the frame for a page size and orientation. The horizontal
    /// margin and bottom reserve come from the design's [`Metrics`].
    pub fn new(size: PageSize, orientation: Orientation, metrics: &Metrics) -> Result<Self> {
        let (width, height) = size.oriented(orientation);
        let geom = Self {
            width,
            height,
            margin_left: metrics.margin,
            margin_right: metrics.margin,
            margin_top: TOP_MARGIN_PT,
            margin_bottom: metrics.row_reserve,
            orientation,
        };
        geom.check()?;
        Ok(geom)
    }

    fn check(&self) -> Result<()> {
        if self.margin_left + self.margin_right >= self.width
            || self.margin_top + self.margin_bottom >= self.height
        {
            return Err(Error::Config(format!(
                "margins exceed page dimensions ({} x {})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Usable horizontal span between the side margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }
}

/// Style constants derived from the page width for one design.
///
/// Breakpoints follow the page-width classes: at or above A3 width the
/// margin shrinks and rows tighten to fit more content, at or below the
/// compact/A6 widths margins and fonts shrink instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Horizontal margin on both sides.
    pub margin: f32,
    pub small_font: f32,
    pub normal_font: f32,
    /// Vertical extent of one data row.
    pub row_height: f32,
    /// Height of the table-header background band.
    pub header_band: f32,
    /// Vertical advance after placing the table header.
    pub header_extent: f32,
    /// Offset of the header text below the band's top edge.
    pub band_text_dy: f32,
    /// Bottom reserve while placing data rows.
    pub row_reserve: f32,
    /// Bottom reserve for the totals block (checked against its full height).
    pub totals_reserve: f32,
    /// Distance of the divider line above a row's bottom edge.
    pub divider_rise: f32,
    /// Fill colour of the table-header band.
    pub band_color: Rgb,
}

impl Metrics {
    /// Constants for the invoice design.
    pub fn invoice(page_width: f32) -> Self {
        let large = page_width >= A3_WIDTH_PT;
        Self {
            margin: if large { 30.0 } else { 15.0 },
            small_font: 10.0,
            normal_font: 11.0,
            // large formats pack more rows per page
            row_height: if large { 28.0 } else { 32.0 },
            header_band: if large { 28.0 } else { 32.0 },
            header_extent: if large { 28.0 } else { 32.0 },
            band_text_dy: 8.0,
            row_reserve: 100.0,
            totals_reserve: 50.0,
            divider_rise: 4.0,
            band_color: rgb(0xf3, 0xf4, 0xf6),
        }
    }

    /// Constants for the user-list design.
    pub fn user_list(page_width: f32) -> Self {
        let margin = if page_width >= A3_WIDTH_PT {
            30.0
        } else if page_width <= COMPACT_WIDTH_PT {
            10.0
        } else {
            40.0
        };
        let tiny = page_width <= A6_WIDTH_PT;
        Self {
            margin,
            small_font: if tiny { 7.0 } else { 10.0 },
            normal_font: if tiny { 8.0 } else { 11.0 },
            row_height: 20.0,
            header_band: 25.0,
            header_extent: 30.0,
            band_text_dy: 7.0,
            row_reserve: 80.0,
            totals_reserve: 50.0,
            divider_rise: 2.0,
            band_color: rgb(0xf0, 0xf2, 0xf5),
        }
    }
}
