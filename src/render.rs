//! PDF renderer – takes a [`Document`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).
//!
//! This backend owns text shaping: each text instruction carries a width
//! constraint and alignment, and is wrapped (or truncated to one line with an
//! ellipsis) here. Image instructions whose `src` is not a decodable base64
//! data URI are silently skipped (a `log::warn` is emitted).

use std::collections::{HashMap, HashSet};

use printpdf::*;

use crate::document::{Align, Document, FontId, RenderInstruction, Rgb as DocRgb};
use crate::error::{Error, Result};
use crate::fetch::parse_data_uri;
use crate::fonts::FontManager;

/// Line advance as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Baseline offset from the top of a line, as a multiple of the font size.
const ASCENDER_FACTOR: f32 = 0.75;

/// A printpdf XObject together with the pixel dimensions of the source image.
struct ImageResource {
    xobj_id: XObjectId,
    px_width: u32,
    px_height: u32,
}

/// Render a document into PDF bytes.
pub fn render_pdf(document: &Document, fonts: &FontManager) -> Result<Vec<u8>> {
    let page_w = Mm(document.page_width_pt * 0.352778); // pt → mm
    let page_h = Mm(document.page_height_pt * 0.352778);

    let mut doc = PdfDocument::new(&document.title);

    // ── Pre-register all images ────────────────────────────────────────────
    let mut all_srcs: HashSet<&str> = HashSet::new();
    for page in &document.pages {
        for instruction in &page.instructions {
            if let RenderInstruction::Image { src, .. } = instruction {
                all_srcs.insert(src.as_str());
            }
        }
    }

    let mut image_resources: HashMap<String, ImageResource> = HashMap::new();
    let mut img_warnings: Vec<PdfWarnMsg> = Vec::new();

    for src in &all_srcs {
        let bytes = match parse_data_uri(src) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("skipping image — {e}");
                continue;
            }
        };

        // Decode with the `image` crate to obtain pixel dimensions.
        let dyn_img = match ::image::load_from_memory(&bytes) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("skipping image — decode error: {e}");
                continue;
            }
        };
        let (px_width, px_height) = (dyn_img.width(), dyn_img.height());

        // Register with printpdf as a reusable XObject.
        let raw = match RawImage::decode_from_bytes(&bytes, &mut img_warnings) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping image — PDF encode error: {e}");
                continue;
            }
        };
        let xobj_id = doc.add_image(&raw);

        image_resources.insert(
            src.to_string(),
            ImageResource {
                xobj_id,
                px_width,
                px_height,
            },
        );
    }

    // ── Render pages ──────────────────────────────────────────────────────
    let mut pages = Vec::new();

    for page in &document.pages {
        let mut ops = Vec::new();
        for instruction in &page.instructions {
            render_instruction(
                &mut ops,
                instruction,
                document.page_height_pt,
                fonts,
                &image_resources,
            );
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());
    if bytes.is_empty() {
        return Err(Error::Render("backend produced no output".to_string()));
    }

    Ok(bytes)
}

fn builtin_font(font: FontId) -> BuiltinFont {
    match font {
        FontId::Base => BuiltinFont::Helvetica,
        FontId::Bold => BuiltinFont::HelveticaBold,
    }
}

fn pdf_color(c: DocRgb) -> Color {
    Color::Rgb(Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
        icc_profile: None,
    })
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{201A}' => 0x82, // single low-9 quote
            '\u{201E}' => 0x84, // double low-9 quote
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{2122}' => 0x99, // trademark
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for 0x80-0x9F range; printpdf passes
    // these bytes straight to the PDF stream, decoded by WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

fn render_instruction(
    ops: &mut Vec<Op>,
    instruction: &RenderInstruction,
    page_height: f32,
    fonts: &FontManager,
    images: &HashMap<String, ImageResource>,
) {
    match instruction {
        RenderInstruction::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            // PDF coordinate system: origin at bottom-left; ours is top-left.
            let pdf_y = page_height - y;
            let (x1, y1, x2, y2) = (*x, pdf_y - height, x + width, pdf_y);

            ops.push(Op::SetFillColor {
                col: pdf_color(*color),
            });
            ops.push(Op::DrawPolygon {
                polygon: Polygon {
                    rings: vec![PolygonRing {
                        points: vec![
                            LinePoint {
                                p: Point {
                                    x: Pt(x1),
                                    y: Pt(y1),
                                },
                                bezier: false,
                            },
                            LinePoint {
                                p: Point {
                                    x: Pt(x2),
                                    y: Pt(y1),
                                },
                                bezier: false,
                            },
                            LinePoint {
                                p: Point {
                                    x: Pt(x2),
                                    y: Pt(y2),
                                },
                                bezier: false,
                            },
                            LinePoint {
                                p: Point {
                                    x: Pt(x1),
                                    y: Pt(y2),
                                },
                                bezier: false,
                            },
                        ],
                    }],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                },
            });
        }

        RenderInstruction::Line {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        } => {
            ops.push(Op::SetOutlineColor {
                col: pdf_color(*color),
            });
            ops.push(Op::SetOutlineThickness {
                pt: Pt(*stroke_width),
            });
            ops.push(Op::DrawLine {
                line: Line {
                    points: vec![
                        LinePoint {
                            p: Point {
                                x: Pt(*x1),
                                y: Pt(page_height - y1),
                            },
                            bezier: false,
                        },
                        LinePoint {
                            p: Point {
                                x: Pt(*x2),
                                y: Pt(page_height - y2),
                            },
                            bezier: false,
                        },
                    ],
                    is_closed: false,
                },
            });
        }

        RenderInstruction::Text {
            x,
            y,
            width,
            text,
            style,
        } => {
            if text.is_empty() {
                return;
            }
            let font = builtin_font(style.font);
            let lines = if style.truncate {
                vec![fonts.truncate(text, style.size, style.font, *width)]
            } else {
                fonts.wrap(text, style.size, style.font, *width)
            };
            let line_height = style.size * LINE_HEIGHT_FACTOR;
            let pdf_y = page_height - y;

            for (i, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let line_x = match style.align {
                    Align::Left => *x,
                    Align::Right => x + width - fonts.measure(line, style.size, style.font),
                };
                // Baseline ≈ top of line + ascender
                let line_y =
                    pdf_y - i as f32 * line_height - style.size * ASCENDER_FACTOR;

                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(line_x),
                        y: Pt(line_y),
                    },
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(style.size),
                    font,
                });
                ops.push(Op::SetLineHeight {
                    lh: Pt(line_height),
                });
                ops.push(Op::SetFillColor {
                    col: pdf_color(style.color),
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(to_winlatin(line))],
                    font,
                });
                ops.push(Op::EndTextSection);
            }
        }

        RenderInstruction::Image {
            x,
            y,
            width,
            height,
            src,
        } => {
            if let Some(res) = images.get(src) {
                // Fit inside the box preserving the aspect ratio.
                let (scale_x, scale_y) = if res.px_width > 0 && res.px_height > 0 {
                    let s = (width / res.px_width as f32).min(height / res.px_height as f32);
                    (s, s)
                } else {
                    (1.0, 1.0)
                };

                // translate_y = bottom edge of the image in PDF coordinates
                let img_bottom_y = page_height - y - height;

                ops.push(Op::UseXobject {
                    id: res.xobj_id.clone(),
                    transform: XObjectTransform {
                        translate_x: Some(Pt(*x)),
                        translate_y: Some(Pt(img_bottom_y)),
                        // at dpi=72 printpdf renders 1 px = 1 pt
                        dpi: Some(72.0),
                        scale_x: Some(scale_x),
                        scale_y: Some(scale_y),
                        rotate: None,
                    },
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Page, TextStyle, DARK};

    #[test]
    fn render_empty_document() {
        let doc = Document::new("empty", 595.28, 841.89);
        let bytes = render_pdf(&doc, &FontManager::new()).unwrap();
        assert!(bytes.len() > 100, "PDF should have content");
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn render_text_and_shapes() {
        let mut doc = Document::new("test", 595.28, 841.89);
        let mut page = Page::new(0);
        page.instructions.push(RenderInstruction::Rect {
            x: 15.0,
            y: 170.0,
            width: 565.28,
            height: 32.0,
            color: [0.95, 0.95, 0.96],
        });
        page.instructions.push(RenderInstruction::Text {
            x: 15.0,
            y: 178.0,
            width: 100.0,
            text: "Description".to_string(),
            style: TextStyle::new(FontId::Bold, 11.0, DARK),
        });
        page.instructions.push(RenderInstruction::Line {
            x1: 15.0,
            y1: 230.0,
            x2: 580.28,
            y2: 230.0,
            stroke_width: 0.5,
            color: [0.9, 0.9, 0.92],
        });
        doc.pages.push(page);

        let bytes = render_pdf(&doc, &FontManager::new()).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn undecodable_image_is_skipped() {
        let mut doc = Document::new("test", 595.28, 841.89);
        let mut page = Page::new(0);
        page.instructions.push(RenderInstruction::Image {
            x: 15.0,
            y: 40.0,
            width: 45.0,
            height: 45.0,
            src: "https://example.com/logo.png".to_string(),
        });
        doc.pages.push(page);

        // not a data URI: warn and render without it
        let bytes = render_pdf(&doc, &FontManager::new()).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn winlatin_maps_ellipsis() {
        let s = to_winlatin("a\u{2026}");
        assert_eq!(s.as_bytes(), &[b'a', 0x85]);
    }
}
