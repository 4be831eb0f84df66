//! Logo retrieval – resolves an image reference into a base64 data URI the
//! rendering backend can embed.
//!
//! Data URIs pass through after a decode check. Remote URLs are fetched with
//! a short bounded timeout; on any failure the caller drops the asset and
//! rendering proceeds without it.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64_STD;
use base64::Engine as _;

use crate::error::{Error, Result};

/// Bounded wait for remote image retrieval.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Resolve an image reference (data URI or http/https URL) to a data URI.
pub fn resolve_image(src: &str) -> Result<String> {
    if src.starts_with("data:") {
        // decode check only; the URI is embedded as-is
        parse_data_uri(src)?;
        return Ok(src.to_string());
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        let bytes = fetch_remote(src)?;
        return Ok(to_data_uri(&bytes));
    }
    Err(Error::AssetFetch(format!(
        "unsupported image reference (expected data URI or http/https URL): {src:?}"
    )))
}

/// Parse a `data:<mime>;base64,<data>` URI and return the raw decoded bytes.
///
/// Returns `Err` if `src` is not a data URI or does not use base64 encoding.
pub fn parse_data_uri(src: &str) -> Result<Vec<u8>> {
    if !src.starts_with("data:") {
        let preview = if src.len() > 80 { &src[..80] } else { src };
        return Err(Error::AssetFetch(format!(
            "image src must be a base64 data URI \
             (e.g. `data:image/png;base64,...`). Got: {preview:?}"
        )));
    }
    let rest = &src["data:".len()..];
    let comma_pos = rest.find(',').ok_or_else(|| {
        Error::AssetFetch(
            "invalid data URI: missing `,` separator between header and data".to_string(),
        )
    })?;
    let header = &rest[..comma_pos];
    if !header.contains(";base64") {
        return Err(Error::AssetFetch(
            "only base64-encoded data URIs are supported. \
             The header must contain `;base64` (e.g. `data:image/png;base64,...`)."
                .to_string(),
        ));
    }
    let b64_data = rest[comma_pos + 1..].trim();
    BASE64_STD
        .decode(b64_data)
        .map_err(|e| Error::AssetFetch(format!("base64 decode error: {e}")))
}

fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| Error::AssetFetch(format!("failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::AssetFetch(format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::AssetFetch(format!(
            "request to {url} returned status {status}"
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| Error::AssetFetch(format!("failed to read body from {url}: {e}")))?;
    Ok(bytes.to_vec())
}

/// Wrap raw image bytes in a data URI, sniffing the format for the mime type.
fn to_data_uri(bytes: &[u8]) -> String {
    let mime = match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => "image/png",
        Ok(image::ImageFormat::Jpeg) => "image/jpeg",
        _ => "application/octet-stream",
    };
    format!("data:{mime};base64,{}", BASE64_STD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1×1 transparent PNG
    const PNG_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[test]
    fn data_uri_passes_through() {
        let out = resolve_image(PNG_URI).unwrap();
        assert_eq!(out, PNG_URI);
    }

    #[test]
    fn rejects_non_base64_data_uri() {
        let err = resolve_image("data:image/png,rawdata");
        assert!(matches!(err, Err(Error::AssetFetch(_))));
    }

    #[test]
    fn rejects_unsupported_scheme() {
        let err = resolve_image("file:///tmp/logo.png");
        assert!(matches!(err, Err(Error::AssetFetch(_))));
    }

    #[test]
    fn parse_data_uri_roundtrip() {
        let bytes = parse_data_uri(PNG_URI).unwrap();
        // PNG magic bytes
        assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);
        let uri = to_data_uri(&bytes);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(parse_data_uri(&uri).unwrap(), bytes);
    }

    #[test]
    #[ignore] // requires network access
    fn unreachable_host_times_out() {
        let err = resolve_image("http://192.0.2.1/logo.png");
        assert!(matches!(err, Err(Error::AssetFetch(_))));
    }
}
