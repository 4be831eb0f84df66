//! Pipeline – ties together validation, design planning, column layout,
//! pagination, page numbering, and rendering into a single function call.

use crate::columns::ColumnPlanner;
use crate::content::Payload;
use crate::designs::DesignKind;
use crate::document::Document;
use crate::error::Result;
use crate::fetch;
use crate::fonts::FontManager;
use crate::geometry::{Orientation, PageGeometry, PageSize};
use crate::page_numbers;
use crate::paginate::Paginator;
use crate::render::render_pdf;
use crate::validate;

/// Content-type marker for the serialized output.
pub const CONTENT_TYPE_PDF: &str = "application/pdf";

/// One document render request.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub design: DesignKind,
    pub size: PageSize,
    pub orientation: Orientation,
    /// Stamp "Page i of N" on every page.
    pub page_numbers: bool,
    /// Output name without extension (default: "document").
    pub filename: String,
    pub payload: Payload,
    /// Logo reference: a data URI or an http/https URL. Unreachable or
    /// undecodable references are dropped with a warning; the document is
    /// still produced.
    pub logo_url: Option<String>,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            design: DesignKind::Invoice,
            size: PageSize::A4,
            orientation: Orientation::Portrait,
            page_numbers: true,
            filename: "document".to_string(),
            payload: Payload::default(),
            logo_url: None,
        }
    }
}

/// Finished render output.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// Suggested download filename, e.g. `invoice.pdf`.
    pub filename: String,
    pub content_type: &'static str,
}

/// Assemble the document for a request: validate, resolve the logo, plan the
/// design, paginate, and optionally stamp page numbers.
///
/// The page count is final on the returned document.
pub fn assemble(request: &RenderRequest) -> Result<Document> {
    validate::validate(request)?;

    let (page_width, _) = request.size.oriented(request.orientation);

    let logo = request.logo_url.as_deref().and_then(|src| {
        match fetch::resolve_image(src) {
            Ok(uri) => Some(uri),
            Err(e) => {
                log::warn!("skipping logo — {e}");
                None
            }
        }
    });

    let plan = request.design.plan(&request.payload, page_width, logo)?;
    let geometry = PageGeometry::new(request.size, request.orientation, &plan.metrics)?;

    let mut planner = ColumnPlanner::new(plan.columns.clone());
    let mut paginator = Paginator::new(request.filename.as_str(), &geometry, &plan.metrics, &mut planner);
    for block in &plan.blocks {
        paginator.place(block);
    }
    let mut document = paginator.finish();

    if request.page_numbers {
        page_numbers::annotate(&mut document)?;
    }

    Ok(document)
}

/// Full pipeline: request → PDF bytes plus the assembled document.
pub fn generate_pdf(request: &RenderRequest) -> Result<(RenderedPdf, Document)> {
    generate_pdf_with_fonts(request, &FontManager::new())
}

/// Like [`generate_pdf`], measuring text with the supplied font metrics
/// (loaded TTF faces give accurate wrapping and right-alignment).
pub fn generate_pdf_with_fonts(
    request: &RenderRequest,
    fonts: &FontManager,
) -> Result<(RenderedPdf, Document)> {
    let document = assemble(request)?;
    let bytes = render_pdf(&document, fonts)?;
    let rendered = RenderedPdf {
        bytes,
        filename: format!("{}.pdf", request.filename),
        content_type: CONTENT_TYPE_PDF,
    };
    Ok((rendered, document))
}
