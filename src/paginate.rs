//! Row paginator – walks an ordered sequence of content blocks, tracks the
//! vertical cursor, and decides when to flush a page and start a new one.
//!
//! Handles:
//! - bottom-reserve overflow checks per block
//! - repeating the table header at the top of every page started mid-table
//! - break-before placement of the totals block (never split mid-summary)
//! - oversized single blocks (placed at the top of a fresh page, allowed to
//!   overflow, never split further)

use crate::blocks::render_block;
use crate::columns::ColumnPlanner;
use crate::content::{ContentBlock, TableHeaderBlock};
use crate::document::{Document, Page};
use crate::geometry::{Metrics, PageGeometry};

/// Vertical start of content when the totals block opens a fresh page.
const TOTALS_RESUME_Y: f32 = 60.0;

/// Mutable placement state, owned by the paginator for one document render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

/// Drives placement of content blocks into a [`Document`].
pub struct Paginator<'a> {
    geom: &'a PageGeometry,
    metrics: &'a Metrics,
    planner: &'a mut ColumnPlanner,
    doc: Document,
    cursor: Cursor,
    /// Table header to re-emit after a mid-table page break.
    repeat_header: Option<TableHeaderBlock>,
}

impl<'a> Paginator<'a> {
    pub fn new(
        title: impl Into<String>,
        geom: &'a PageGeometry,
        metrics: &'a Metrics,
        planner: &'a mut ColumnPlanner,
    ) -> Self {
        let mut doc = Document::new(title, geom.width, geom.height);
        doc.pages.push(Page::new(0));
        Self {
            geom,
            metrics,
            planner,
            doc,
            cursor: Cursor {
                page: 0,
                y: geom.margin_top,
            },
            repeat_header: None,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn page_is_empty(&self) -> bool {
        self.doc.pages[self.cursor.page].instructions.is_empty()
    }

    fn start_page(&mut self, resume_y: f32) {
        let index = self.doc.pages.len();
        self.doc.pages.push(Page::new(index));
        self.cursor = Cursor {
            page: index,
            y: resume_y,
        };
    }

    fn emit(&mut self, block: &ContentBlock) {
        let cols = self
            .planner
            .layout(self.geom.margin_left, self.geom.content_width());
        let instructions = render_block(block, self.geom, self.metrics, cols, self.cursor.y);
        self.doc.pages[self.cursor.page]
            .instructions
            .extend(instructions);
    }

    /// Place one block, breaking the page first when it would cross the
    /// bottom reserve.
    pub fn place(&mut self, block: &ContentBlock) {
        let extent = block.extent(self.metrics);

        match block {
            // the summary is checked against its full height and never
            // started mid-page when it would not fit whole
            ContentBlock::Totals(_) => {
                let limit = self.geom.height - self.metrics.totals_reserve;
                if self.cursor.y + extent > limit && !self.page_is_empty() {
                    self.start_page(TOTALS_RESUME_Y);
                }
            }
            _ => {
                let limit = self.geom.height - self.geom.margin_bottom;
                if self.cursor.y + extent > limit && !self.page_is_empty() {
                    self.start_page(self.geom.margin_top);
                    if matches!(block, ContentBlock::TableRow(_)) {
                        if let Some(header) = self.repeat_header.clone() {
                            let header = ContentBlock::TableHeader(header);
                            self.emit(&header);
                            self.cursor.y += header.extent(self.metrics);
                        }
                    }
                }
            }
        }

        self.emit(block);
        self.cursor.y += extent;

        if let ContentBlock::TableHeader(th) = block {
            self.repeat_header = Some(th.clone());
        }
    }

    /// Consume the paginator and return the finished document.
    pub fn finish(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnSpec;
    use crate::content::{Cell, HeaderCell, TableRowBlock, TotalsBlock, TotalsRow};
    use crate::document::{Align, RenderInstruction};
    use crate::geometry::Orientation;

    fn user_columns() -> ColumnSpec {
        ColumnSpec::new(&[
            ("sn", 0.05),
            ("name", 0.25),
            ("email", 0.4),
            ("gender", 0.15),
            ("role", 0.15),
        ])
    }

    fn header() -> ContentBlock {
        ContentBlock::TableHeader(TableHeaderBlock {
            cells: vec![
                HeaderCell::new("SN", Align::Left),
                HeaderCell::new("Name", Align::Left),
                HeaderCell::new("Email", Align::Left),
                HeaderCell::new("Gender", Align::Left),
                HeaderCell::new("Role", Align::Left),
            ],
        })
    }

    fn row(i: usize) -> ContentBlock {
        ContentBlock::TableRow(TableRowBlock {
            cells: vec![
                Cell::new((i + 1).to_string()),
                Cell::new(format!("Test{}", i + 1)),
                Cell::new(format!("Test{}@example.com", i + 1)),
                Cell::new("-"),
                Cell::new("-"),
            ],
        })
    }

    /// Page height chosen so rows start at y = 70 (top margin 40 + header
    /// extent 30) and exactly 20 rows of height 20 fit above the 80 pt
    /// bottom reserve.
    fn twenty_row_geometry() -> (PageGeometry, Metrics) {
        let metrics = Metrics::user_list(595.28);
        let geom = PageGeometry {
            width: 595.28,
            height: 550.0,
            margin_left: metrics.margin,
            margin_right: metrics.margin,
            margin_top: 40.0,
            margin_bottom: metrics.row_reserve,
            orientation: Orientation::Portrait,
        };
        (geom, metrics)
    }

    fn header_band_count(doc: &Document) -> Vec<usize> {
        doc.pages
            .iter()
            .map(|p| {
                p.instructions
                    .iter()
                    .filter(|i| matches!(i, RenderInstruction::Rect { .. }))
                    .count()
            })
            .collect()
    }

    fn divider_count(doc: &Document) -> usize {
        doc.pages
            .iter()
            .flat_map(|p| &p.instructions)
            .filter(|i| matches!(i, RenderInstruction::Line { .. }))
            .count()
    }

    #[test]
    fn fifty_rows_at_twenty_per_page_make_three_pages() {
        let (geom, metrics) = twenty_row_geometry();
        let mut planner = ColumnPlanner::new(user_columns());
        let mut paginator = Paginator::new("users", &geom, &metrics, &mut planner);

        paginator.place(&header());
        for i in 0..50 {
            paginator.place(&row(i));
        }
        let doc = paginator.finish();

        assert_eq!(doc.page_count(), 3);
        // every page (including pages 2 and 3) begins with the header band
        assert_eq!(header_band_count(&doc), vec![1, 1, 1]);
        for page in &doc.pages {
            assert!(matches!(page.instructions[0], RenderInstruction::Rect { .. }));
        }
        // no row lost or duplicated across the breaks
        assert_eq!(divider_count(&doc), 50);
    }

    #[test]
    fn rows_never_cross_the_bottom_reserve() {
        let (geom, metrics) = twenty_row_geometry();
        let mut planner = ColumnPlanner::new(user_columns());
        let mut paginator = Paginator::new("users", &geom, &metrics, &mut planner);

        paginator.place(&header());
        for i in 0..50 {
            paginator.place(&row(i));
            let cursor = paginator.cursor();
            assert!(
                cursor.y <= geom.height - geom.margin_bottom,
                "row {} ended at y={} past the reserve",
                i,
                cursor.y
            );
        }
    }

    #[test]
    fn empty_row_sequence_still_renders_header() {
        let (geom, metrics) = twenty_row_geometry();
        let mut planner = ColumnPlanner::new(user_columns());
        let mut paginator = Paginator::new("users", &geom, &metrics, &mut planner);
        paginator.place(&header());
        let doc = paginator.finish();

        assert_eq!(doc.page_count(), 1);
        assert!(!doc.pages[0].instructions.is_empty());
    }

    #[test]
    fn oversized_block_is_placed_without_splitting() {
        let (geom, metrics) = twenty_row_geometry();
        let mut planner = ColumnPlanner::new(user_columns());
        let mut paginator = Paginator::new("tall", &geom, &metrics, &mut planner);

        // taller than the whole usable page
        let tall = ContentBlock::Header(crate::content::HeaderBlock {
            title: "oversized".into(),
            logo: None,
            extent: geom.height * 2.0,
        });
        paginator.place(&tall);
        let doc = paginator.finish();
        // placed at the top of the first page and allowed to overflow
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn totals_break_happens_before_the_summary() {
        let (geom, metrics) = twenty_row_geometry();
        let mut planner = ColumnPlanner::new(user_columns());
        let mut paginator = Paginator::new("invoice", &geom, &metrics, &mut planner);

        paginator.place(&header());
        // fill page one almost to the reserve
        for i in 0..19 {
            paginator.place(&row(i));
        }
        let totals = ContentBlock::Totals(TotalsBlock {
            rows: vec![
                TotalsRow::new("Total Qty", "57"),
                TotalsRow::new("Subtotal", "Rs. 750"),
                TotalsRow::new("Shipping", "Rs. 0"),
                TotalsRow::new("Discount", "-Rs. 0"),
                TotalsRow::new("Total", "Rs. 750"),
            ],
        });
        paginator.place(&totals);
        let doc = paginator.finish();

        assert_eq!(doc.page_count(), 2);
        // the whole summary landed on page 2; page 1 holds only the rows
        assert_eq!(divider_count(&doc), 19);
        let page2_texts: Vec<&RenderInstruction> = doc.pages[1]
            .instructions
            .iter()
            .filter(|i| matches!(i, RenderInstruction::Text { .. }))
            .collect();
        // 5 labels + 5 values
        assert_eq!(page2_texts.len(), 10);
    }
}
