//! JSON pretty-printing and best-effort text decoding.

use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Re-indent a raw JSON document with two spaces.
///
/// Key order, non-ASCII characters and the exact digits of every number are
/// preserved. No partial recovery is attempted: the whole body must be one
/// valid JSON value.
pub fn format_json(raw: &[u8]) -> AppResult<String> {
    if raw.is_empty() {
        return Err(AppError::bad_request("Empty body"));
    }

    let parsed: Value =
        serde_json::from_slice(raw).map_err(|_| AppError::bad_request("Invalid JSON payload"))?;

    serde_json::to_string_pretty(&parsed)
        .map_err(|e| AppError::Internal(format!("failed to render JSON: {e}")))
}

/// Decode bytes as UTF-8, dropping any invalid sequences.
///
/// Never fails: binary input yields whatever valid text it contains.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple_object() {
        let formatted = format_json(br#"{"a":1}"#).unwrap();

        assert_eq!(formatted, "{\n  \"a\": 1\n}");
        let reparsed: Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(reparsed, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_format_preserves_key_order() {
        let formatted = format_json(br#"{"z":1,"a":2,"m":3}"#).unwrap();

        let z = formatted.find("\"z\"").unwrap();
        let a = formatted.find("\"a\"").unwrap();
        let m = formatted.find("\"m\"").unwrap();
        assert!(z < a && a < m);
    }

    #[test]
    fn test_format_keeps_non_ascii() {
        let formatted = format_json("{\"name\":\"Zoë 日本\"}".as_bytes()).unwrap();

        assert!(formatted.contains("Zoë 日本"));
        assert!(!formatted.contains("\\u"));
    }

    #[test]
    fn test_format_keeps_big_integers_exact() {
        let formatted = format_json(br#"{"id":123456789012345678901234567890}"#).unwrap();

        assert_eq!(formatted, "{\n  \"id\": 123456789012345678901234567890\n}");
    }

    #[test]
    fn test_format_keeps_numbers_past_u64() {
        let formatted = format_json(br#"[0.1, 18446744073709551616]"#).unwrap();

        assert_eq!(formatted, "[\n  0.1,\n  18446744073709551616\n]");
    }

    #[test]
    fn test_format_scalar_document() {
        assert_eq!(format_json(b"42").unwrap(), "42");
    }

    #[test]
    fn test_format_empty_body() {
        let err = format_json(b"").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Empty body"));
    }

    #[test]
    fn test_format_invalid_json() {
        let err = format_json(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid JSON payload"));
    }

    #[test]
    fn test_format_rejects_trailing_garbage() {
        assert!(format_json(br#"{"a":1} trailing"#).is_err());
    }

    #[test]
    fn test_decode_lossy_valid_utf8() {
        assert_eq!(decode_lossy("héllo".as_bytes()), "héllo");
    }

    #[test]
    fn test_decode_lossy_drops_invalid_bytes() {
        assert_eq!(decode_lossy(b"he\xffll\xc3o"), "hello");
    }

    #[test]
    fn test_decode_lossy_binary_does_not_panic() {
        let bytes: Vec<u8> = (0..=255).collect();
        let decoded = decode_lossy(&bytes);

        assert!(decoded.starts_with('\0'));
        assert_eq!(decoded.len(), 128);
    }
}
