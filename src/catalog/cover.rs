//! # Cover Payload Decoder
//!
//! Covers arrive as a JSON structure carrying a declared MIME type and
//! base64-encoded bytes. A payload that does not parse, or declares a type
//! outside the allowed image set, decodes to `None` rather than an error:
//! callers treat a decode miss as "no cover supplied", never as fatal.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

/// Image MIME types a cover may declare.
///
/// The legacy catalog shipped with a malformed third entry ("images/gif");
/// it is corrected to "image/gif" here. See DESIGN.md.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Externally supplied cover structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverPayload {
    /// Declared MIME type
    #[serde(rename = "type")]
    pub mime_type: String,

    /// Base64-encoded image bytes
    pub data: String,
}

/// A decoded cover: raw bytes paired with their declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Decode a cover payload, or `None` on any miss.
///
/// Misses are silent by contract: an unknown MIME type or undecodable
/// base64 both yield `None`.
pub fn decode(payload: &CoverPayload) -> Option<CoverImage> {
    if !ALLOWED_IMAGE_TYPES.contains(&payload.mime_type.as_str()) {
        return None;
    }
    let bytes = BASE64.decode(payload.data.as_bytes()).ok()?;
    Some(CoverImage {
        bytes,
        mime_type: payload.mime_type.clone(),
    })
}

/// Render stored cover fields as a `data:` URI.
pub fn data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(mime_type: &str, data: &str) -> CoverPayload {
        CoverPayload {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn test_png_payload_decodes() {
        let encoded = BASE64.encode(b"not-really-a-png");
        let cover = decode(&payload("image/png", &encoded)).unwrap();
        assert_eq!(cover.mime_type, "image/png");
        assert_eq!(cover.bytes, b"not-really-a-png");
    }

    #[test]
    fn test_gif_is_an_allowed_type() {
        let encoded = BASE64.encode(b"gif-bytes");
        assert!(decode(&payload("image/gif", &encoded)).is_some());
    }

    #[test]
    fn test_non_image_type_is_silently_ignored() {
        let encoded = BASE64.encode(b"%PDF-1.4");
        assert!(decode(&payload("application/pdf", &encoded)).is_none());
    }

    #[test]
    fn test_undecodable_base64_is_silently_ignored() {
        assert!(decode(&payload("image/png", "!!! not base64 !!!")).is_none());
    }

    #[test]
    fn test_data_uri_round_trip() {
        let uri = data_uri(b"abc", "image/jpeg");
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let encoded = uri.strip_prefix("data:image/jpeg;base64,").unwrap();
        assert_eq!(BASE64.decode(encoded).unwrap(), b"abc");
    }
}
