//! Image embedding
//!
//! Turns raw image bytes into a string that can live inside a record's
//! `image` field or a gallery item's `url`: a base64 `data:` URL with the
//! mime type sniffed from magic bytes. Downscaling and recompression are an
//! external concern; the bytes are embedded as-is.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode image bytes as an embeddable `data:` URL
pub fn encode_data_url(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", sniff_mime(bytes), STANDARD.encode(bytes))
}

/// Guess the mime type from magic bytes
///
/// Unknown formats fall back to `application/octet-stream`, which still
/// embeds fine - the browser just won't render it inline.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        "image/png"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}
