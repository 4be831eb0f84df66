//! Page number annotator – stamps "Page i of N" on every page of a finished
//! document.
//!
//! Runs strictly after pagination: the total page count is not known until
//! the paginator has flushed its last page, so this pass cannot be
//! interleaved with block rendering. Stamping the same document twice is an
//! error.

use crate::document::{Document, FontId, RenderInstruction, TextStyle, PAGE_NUMBER_GRAY};
use crate::error::{Error, Result};

const PAGE_NUMBER_SIZE: f32 = 10.0;
/// Offset of the stamp above the physical bottom edge.
const PAGE_NUMBER_RISE: f32 = 84.0;

/// Append one page-number instruction to every page.
pub fn annotate(doc: &mut Document) -> Result<()> {
    if doc.page_numbers_stamped {
        return Err(Error::Config(
            "page numbers already stamped on this document".to_string(),
        ));
    }

    let total = doc.page_count();
    let x = doc.page_width_pt / 2.0;
    let y = doc.page_height_pt - PAGE_NUMBER_RISE;
    let width = doc.page_width_pt / 2.0;

    for (i, page) in doc.pages.iter_mut().enumerate() {
        page.instructions.push(RenderInstruction::Text {
            x,
            y,
            width,
            text: format!("Page {} of {}", i + 1, total),
            style: TextStyle::new(FontId::Base, PAGE_NUMBER_SIZE, PAGE_NUMBER_GRAY),
        });
    }

    doc.page_numbers_stamped = true;
    Ok(())
}
