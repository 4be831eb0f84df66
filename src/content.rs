//! Content model – the caller payloads and the logical content blocks the
//! paginator places.
//!
//! A [`ContentBlock`] is one self-contained unit of document content. Blocks
//! carry resolved display text only; optional-field fallbacks are applied by
//! the design before any block is built.

use serde::{Deserialize, Serialize};

use crate::document::Align;
use crate::geometry::Metrics;

// ---------------------------------------------------------------------------
// Caller payloads
// ---------------------------------------------------------------------------

/// Invoice metadata. Every field is optional; fallback rules are applied
/// once during document assembly (absent strings render as "-", absent
/// amounts fall back to values computed from the line items).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceMeta {
    pub number: Option<String>,
    pub from_name: Option<String>,
    pub from_address: Option<String>,
    pub to_name: Option<String>,
    pub to_address: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub po_number: Option<String>,
    pub subtotal: Option<f64>,
    pub total: Option<f64>,
    pub shipping: Option<f64>,
    pub discount: Option<f64>,
    pub tax: Option<f64>,
}

/// One invoice line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u32,
    pub price: f64,
}

/// One entry of the user roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Content payload; its shape must match the selected design.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    UserList {
        users: Vec<User>,
    },
    Invoice {
        #[serde(default)]
        invoice: InvoiceMeta,
        #[serde(default)]
        items: Vec<LineItem>,
    },
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Invoice {
            invoice: InvoiceMeta::default(),
            items: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

/// Document header: an optional logo on the left and a right-aligned title.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBlock {
    pub title: String,
    /// Base64 data URI of the logo, already resolved by the assembler.
    pub logo: Option<String>,
    pub extent: f32,
}

/// One label/value entry inside a [`LabelValueBlock`] column.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelValueEntry {
    pub label: String,
    pub value: String,
    /// Secondary line below the value (e.g. an address), wrapped to the
    /// column width.
    pub detail: Option<String>,
}

/// A row of label/value entries laid out in equal-width columns across the
/// content width.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelValueBlock {
    pub entries: Vec<LabelValueEntry>,
    pub extent: f32,
    /// Offset of the value line below the label.
    pub value_dy: f32,
    /// Offset of the detail line below the label.
    pub detail_dy: f32,
}

/// One cell of the table header row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub text: String,
    pub align: Align,
    pub truncate: bool,
}

impl HeaderCell {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        Self {
            text: text.into(),
            align,
            truncate: false,
        }
    }
}

/// The table header row: background band plus one cell per column.
/// Re-emitted at the top of every page started mid-table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHeaderBlock {
    pub cells: Vec<HeaderCell>,
}

/// Font-size class of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Normal,
}

impl TextSize {
    pub fn points(self, metrics: &Metrics) -> f32 {
        match self {
            TextSize::Small => metrics.small_font,
            TextSize::Normal => metrics.normal_font,
        }
    }
}

/// One cell of a data row, positionally matched to the design's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub size: TextSize,
    pub bold: bool,
    /// Render in the secondary (gray) colour.
    pub muted: bool,
    pub align: Align,
    pub truncate: bool,
    /// Secondary wrapped line below the cell text (e.g. item description).
    pub detail: Option<String>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: TextSize::Small,
            bold: false,
            muted: false,
            align: Align::Left,
            truncate: false,
            detail: None,
        }
    }

    pub fn size(mut self, size: TextSize) -> Self {
        self.size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.truncate = true;
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// One data row of the table, followed by a divider line.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowBlock {
    pub cells: Vec<Cell>,
}

/// Style variants of a totals row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsEmphasis {
    Normal,
    /// Negative amount, rendered in red.
    Discount,
    /// The final total, rendered larger and bold.
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    pub label: String,
    pub value: String,
    pub emphasis: TotalsEmphasis,
}

impl TotalsRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            emphasis: TotalsEmphasis::Normal,
        }
    }

    pub fn emphasis(mut self, emphasis: TotalsEmphasis) -> Self {
        self.emphasis = emphasis;
        self
    }
}

/// Summary block anchored to the right edge. Never split across pages: if it
/// does not fit, the paginator breaks before it.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsBlock {
    pub rows: Vec<TotalsRow>,
}

/// Vertical spacing between totals rows.
pub const TOTALS_ROW_SPACING: f32 = 20.0;
/// Fixed padding above the first totals row.
pub const TOTALS_PADDING: f32 = 20.0;

/// One logical, self-contained unit of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Header(HeaderBlock),
    LabelValue(LabelValueBlock),
    TableHeader(TableHeaderBlock),
    TableRow(TableRowBlock),
    Totals(TotalsBlock),
}

impl ContentBlock {
    /// Vertical extent this block advances the cursor by.
    pub fn extent(&self, metrics: &Metrics) -> f32 {
        match self {
            ContentBlock::Header(h) => h.extent,
            ContentBlock::LabelValue(lv) => lv.extent,
            ContentBlock::TableHeader(_) => metrics.header_extent,
            ContentBlock::TableRow(_) => metrics.row_height,
            ContentBlock::Totals(t) => t.rows.len() as f32 * TOTALS_ROW_SPACING + TOTALS_PADDING,
        }
    }
}
