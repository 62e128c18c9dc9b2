//! Helpers for `data:` URIs holding base64-encoded images.

use base64::{Engine as _, engine::general_purpose};

/// Encode raw bytes as a base64 data URI with the given MIME type.
pub fn encode(mime_type: &str, data: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(data)
    )
}

/// MIME type of a base64 data URI, if the string is one.
pub fn mime_type(uri: &str) -> Option<&str> {
    let rest = uri.strip_prefix("data:")?;
    let (mime_type, _) = rest.split_once(";base64,")?;
    Some(mime_type)
}

/// Size in bytes of the payload carried by a base64 data URI.
pub fn decoded_len(uri: &str) -> Option<usize> {
    let (_, payload) = uri.split_once(";base64,")?;
    general_purpose::STANDARD
        .decode(payload)
        .ok()
        .map(|bytes| bytes.len())
}

pub fn is_image(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let uri = encode("image/png", b"hello");
        assert_eq!(uri, "data:image/png;base64,aGVsbG8=");
        assert_eq!(mime_type(&uri), Some("image/png"));
        assert_eq!(decoded_len(&uri), Some(5));
    }

    #[test]
    fn test_encode_without_mime_type() {
        let uri = encode("", &[0xff, 0xd8]);
        assert_eq!(mime_type(&uri), Some("application/octet-stream"));
    }

    #[test]
    fn test_not_a_data_uri() {
        assert_eq!(mime_type("https://example.com/a.png"), None);
        assert_eq!(mime_type("data:text/plain,hello"), None);
        assert_eq!(decoded_len("data:image/png;base64,***"), None);
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("image/jpeg"));
        assert!(is_image("image/webp"));
        assert!(!is_image("application/pdf"));
        assert!(!is_image(""));
    }
}
