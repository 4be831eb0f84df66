//! loom – command-line renderer for structured PDF documents.
//!
//! Usage:
//!   loom <payload.json> [output.pdf] [--design invoice|user-list] [--size A4]
//!        [--landscape] [--no-page-numbers] [--logo <url>] [--font <path.ttf>]
//!   loom --sample-invoice 30 [output.pdf]
//!   loom --sample-users 50 --design user-list [output.pdf]
//!
//! If `output.pdf` is omitted the PDF is written next to the payload file
//! with the same stem (samples default to `document.pdf`).

use std::{env, fs, path::PathBuf, process};

use pdf_loom::content::Payload;
use pdf_loom::document::FontId;
use pdf_loom::fonts::FontManager;
use pdf_loom::pipeline::{generate_pdf_with_fonts, RenderRequest};
use pdf_loom::samples;
use pdf_loom::{DesignKind, Orientation, PageSize};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut payload_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut design: Option<DesignKind> = None;
    let mut size = PageSize::A4;
    let mut orientation = Orientation::Portrait;
    let mut page_numbers = true;
    let mut logo: Option<String> = None;
    let mut font_path: Option<PathBuf> = None;
    let mut sample: Option<Payload> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--design" | "-d" => match iter.next().map(|v| v.parse::<DesignKind>()) {
                Some(Ok(d)) => design = Some(d),
                Some(Err(e)) => fail(&args[0], &e.to_string()),
                None => fail(&args[0], "--design requires a value"),
            },
            "--size" | "-s" => match iter.next().map(|v| v.parse::<PageSize>()) {
                Some(Ok(s)) => size = s,
                Some(Err(e)) => fail(&args[0], &e.to_string()),
                None => fail(&args[0], "--size requires a value"),
            },
            "--landscape" | "-l" => orientation = Orientation::Landscape,
            "--no-page-numbers" => page_numbers = false,
            "--logo" => match iter.next() {
                Some(v) => logo = Some(v.clone()),
                None => fail(&args[0], "--logo requires a URL"),
            },
            "--font" => match iter.next() {
                Some(v) => font_path = Some(PathBuf::from(v)),
                None => fail(&args[0], "--font requires a path"),
            },
            "--sample-invoice" => match iter.next().and_then(|v| v.parse::<usize>().ok()) {
                Some(n) => sample = Some(samples::sample_invoice(n)),
                None => fail(&args[0], "--sample-invoice requires a count"),
            },
            "--sample-users" => match iter.next().and_then(|v| v.parse::<usize>().ok()) {
                Some(n) => {
                    sample = Some(samples::sample_users(n));
                    design.get_or_insert(DesignKind::UserList);
                }
                None => fail(&args[0], "--sample-users requires a count"),
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    payload_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    // With a sample, the first positional becomes the output path.
    if sample.is_some() && output_path.is_none() {
        output_path = payload_path.take();
    }

    let (payload, stem) = match (&sample, &payload_path) {
        (Some(p), _) => (p.clone(), "document".to_string()),
        (None, Some(path)) => {
            let json = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading '{}': {e}", path.display());
                    process::exit(1);
                }
            };
            let payload: Payload = match serde_json::from_str(&json) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error parsing '{}': {e}", path.display());
                    process::exit(1);
                }
            };
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document")
                .to_string();
            (payload, stem)
        }
        (None, None) => {
            eprintln!("Error: no payload file or sample specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    // Infer the design from the payload shape unless given explicitly.
    let design = design.unwrap_or(match &payload {
        Payload::Invoice { .. } => DesignKind::Invoice,
        Payload::UserList { .. } => DesignKind::UserList,
    });

    let mut fonts = FontManager::new();
    if let Some(path) = font_path {
        match fs::read(&path) {
            Ok(bytes) => {
                if let Err(e) = fonts.load_font(FontId::Base, bytes) {
                    eprintln!("Error loading font '{}': {e}", path.display());
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error reading font '{}': {e}", path.display());
                process::exit(1);
            }
        }
    }

    let request = RenderRequest {
        design,
        size,
        orientation,
        page_numbers,
        filename: stem,
        payload,
        logo_url: logo,
    };

    let output = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.pdf", request.filename)));

    match generate_pdf_with_fonts(&request, &fonts) {
        Ok((rendered, document)) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &rendered.bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            let pages = document.page_count();
            eprintln!(
                "Wrote '{}' ({} bytes, {} page{})",
                output.display(),
                rendered.bytes.len(),
                pages,
                if pages == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error generating PDF: {e}");
            process::exit(1);
        }
    }
}

fn fail(prog: &str, message: &str) -> ! {
    eprintln!("{message}");
    print_usage(prog);
    process::exit(1);
}

fn print_usage(prog: &str) {
    eprintln!("loom – structured data to PDF renderer (pdf-loom)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <payload.json> [output.pdf] [flags]");
    eprintln!("  {prog} --sample-invoice <count> [output.pdf] [flags]");
    eprintln!("  {prog} --sample-users <count> [output.pdf] [flags]");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --design, -d     invoice | user-list  (default: inferred from payload)");
    eprintln!("  --size, -s       A2 | A3 | A4 | A5 | A6 | Letter  (default: A4)");
    eprintln!("  --landscape, -l  Landscape orientation");
    eprintln!("  --no-page-numbers  Skip the \"Page i of N\" stamp");
    eprintln!("  --logo <url>     Logo image (data URI or http/https URL)");
    eprintln!("  --font <path>    TTF used for text measurement");
    eprintln!("  --help           Print this message");
}
