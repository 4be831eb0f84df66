//! Block renderer – turns one [`ContentBlock`] at a resolved vertical
//! position into the ordered draw instructions representing it.
//!
//! Backgrounds are emitted before text so the per-page instruction order is
//! also the z-order. Wrapping happens in the backend; blocks only supply the
//! width constraint and alignment for each piece of text.

use crate::columns::ColumnLayout;
use crate::content::{
    Cell, ContentBlock, HeaderBlock, LabelValueBlock, TableHeaderBlock, TableRowBlock,
    TotalsBlock, TotalsEmphasis, TOTALS_PADDING, TOTALS_ROW_SPACING,
};
use crate::document::{
    Align, FontId, RenderInstruction, TextStyle, DARK, DISCOUNT_RED, DIVIDER, GRAY,
};
use crate::geometry::{Metrics, PageGeometry};

/// Edge length of the square logo box.
const LOGO_SIZE: f32 = 45.0;
/// Font size of the header title.
const TITLE_SIZE: f32 = 18.0;
/// Offset of a cell's detail line below the cell text.
const DETAIL_DY: f32 = 14.0;
/// Width of the totals value column, anchored to the right margin.
const TOTALS_BOX_WIDTH: f32 = 90.0;
/// Width of the totals label column, left of the value column.
const TOTALS_LABEL_WIDTH: f32 = 100.0;
/// Divider stroke width under data rows.
const DIVIDER_STROKE: f32 = 0.5;

/// Emit the instructions for `block` with its top edge at `y`.
pub fn render_block(
    block: &ContentBlock,
    geom: &PageGeometry,
    metrics: &Metrics,
    cols: &ColumnLayout,
    y: f32,
) -> Vec<RenderInstruction> {
    match block {
        ContentBlock::Header(h) => header(h, geom, y),
        ContentBlock::LabelValue(lv) => label_value(lv, geom, metrics, y),
        ContentBlock::TableHeader(th) => table_header(th, geom, metrics, cols, y),
        ContentBlock::TableRow(row) => table_row(row, geom, metrics, cols, y),
        ContentBlock::Totals(t) => totals(t, geom, y),
    }
}

fn header(block: &HeaderBlock, geom: &PageGeometry, y: f32) -> Vec<RenderInstruction> {
    let mut out = Vec::new();
    if let Some(src) = &block.logo {
        out.push(RenderInstruction::Image {
            x: geom.margin_left,
            y,
            width: LOGO_SIZE,
            height: LOGO_SIZE,
            src: src.clone(),
        });
    }
    out.push(RenderInstruction::Text {
        x: geom.margin_left,
        y,
        width: geom.content_width(),
        text: block.title.clone(),
        style: TextStyle::new(FontId::Bold, TITLE_SIZE, DARK).align(Align::Right),
    });
    out
}

fn label_value(
    block: &LabelValueBlock,
    geom: &PageGeometry,
    metrics: &Metrics,
    y: f32,
) -> Vec<RenderInstruction> {
    let mut out = Vec::new();
    if block.entries.is_empty() {
        return out;
    }
    let col_width = geom.content_width() / block.entries.len() as f32;

    for (i, entry) in block.entries.iter().enumerate() {
        let x = geom.margin_left + i as f32 * col_width;
        out.push(RenderInstruction::Text {
            x,
            y,
            width: col_width,
            text: entry.label.clone(),
            style: TextStyle::new(FontId::Base, metrics.small_font, GRAY),
        });
        out.push(RenderInstruction::Text {
            x,
            y: y + block.value_dy,
            width: col_width,
            text: entry.value.clone(),
            style: TextStyle::new(FontId::Bold, metrics.normal_font, DARK),
        });
        if let Some(detail) = &entry.detail {
            out.push(RenderInstruction::Text {
                x,
                y: y + block.detail_dy,
                width: col_width - 10.0,
                text: detail.clone(),
                style: TextStyle::new(FontId::Base, metrics.small_font, GRAY),
            });
        }
    }
    out
}

fn table_header(
    block: &TableHeaderBlock,
    geom: &PageGeometry,
    metrics: &Metrics,
    cols: &ColumnLayout,
    y: f32,
) -> Vec<RenderInstruction> {
    let mut out = vec![RenderInstruction::Rect {
        x: geom.margin_left,
        y,
        width: geom.content_width(),
        height: metrics.header_band,
        color: metrics.band_color,
    }];

    for (cell, col) in block.cells.iter().zip(&cols.columns) {
        let mut style =
            TextStyle::new(FontId::Bold, metrics.normal_font, DARK).align(cell.align);
        if cell.truncate {
            style = style.truncated();
        }
        out.push(RenderInstruction::Text {
            x: col.x,
            y: y + metrics.band_text_dy,
            width: col.width,
            text: cell.text.clone(),
            style,
        });
    }
    out
}

fn cell_style(cell: &Cell, metrics: &Metrics) -> TextStyle {
    let font = if cell.bold { FontId::Bold } else { FontId::Base };
    let color = if cell.muted { GRAY } else { DARK };
    let mut style = TextStyle::new(font, cell.size.points(metrics), color).align(cell.align);
    if cell.truncate {
        style = style.truncated();
    }
    style
}

fn table_row(
    block: &TableRowBlock,
    geom: &PageGeometry,
    metrics: &Metrics,
    cols: &ColumnLayout,
    y: f32,
) -> Vec<RenderInstruction> {
    let mut out = Vec::new();

    for (cell, col) in block.cells.iter().zip(&cols.columns) {
        out.push(RenderInstruction::Text {
            x: col.x,
            y,
            width: col.width,
            text: cell.text.clone(),
            style: cell_style(cell, metrics),
        });
        if let Some(detail) = &cell.detail {
            out.push(RenderInstruction::Text {
                x: col.x,
                y: y + DETAIL_DY,
                width: col.width,
                text: detail.clone(),
                style: TextStyle::new(FontId::Base, metrics.small_font, GRAY),
            });
        }
    }

    let divider_y = y + metrics.row_height - metrics.divider_rise;
    out.push(RenderInstruction::Line {
        x1: geom.margin_left,
        y1: divider_y,
        x2: geom.width - geom.margin_right,
        y2: divider_y,
        stroke_width: DIVIDER_STROKE,
        color: DIVIDER,
    });
    out
}

fn totals(block: &TotalsBlock, geom: &PageGeometry, y: f32) -> Vec<RenderInstruction> {
    let mut out = Vec::new();
    let box_x = geom.width - geom.margin_right - TOTALS_BOX_WIDTH;
    let mut ty = y + TOTALS_PADDING;

    for row in &block.rows {
        let is_total = row.emphasis == TotalsEmphasis::Total;
        let size = if is_total { 13.0 } else { 11.0 };

        out.push(RenderInstruction::Text {
            x: box_x - TOTALS_LABEL_WIDTH,
            y: ty,
            width: TOTALS_LABEL_WIDTH,
            text: row.label.clone(),
            style: TextStyle::new(
                if is_total { FontId::Bold } else { FontId::Base },
                size,
                if is_total { DARK } else { GRAY },
            ),
        });
        out.push(RenderInstruction::Text {
            x: box_x,
            y: ty,
            width: TOTALS_BOX_WIDTH,
            text: row.value.clone(),
            style: TextStyle::new(
                FontId::Bold,
                size,
                if row.emphasis == TotalsEmphasis::Discount {
                    DISCOUNT_RED
                } else {
                    DARK
                },
            )
            .align(Align::Right),
        });
        ty += TOTALS_ROW_SPACING;
    }
    out
}
