//! Conversion between the persisted `content` string and structured values.
//!
//! Decoding never fails loudly: a missing, blank or malformed string yields
//! `None` and the caller seeds from a template instead.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

/// Parses `raw` as JSON. Blank input and malformed JSON both come back as `None`.
pub fn decode(raw: Option<&str>) -> Option<Value> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding malformed section content: {}", e);
            None
        }
    }
}

/// Like [`decode`], then maps the JSON onto `T`. A shape mismatch is treated
/// the same as malformed JSON.
pub fn decode_as<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    let value = decode(raw)?;
    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(e) => {
            warn!("Section content does not match the expected shape: {}", e);
            None
        }
    }
}

/// Pretty JSON with two-space indentation, the form shown in raw-text editing.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        error!("Failed to serialize section content: {}", e);
        String::new()
    })
}

pub fn encode_compact<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        error!("Failed to serialize section content: {}", e);
        String::new()
    })
}

pub fn encode_with<T: Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    if pretty {
        encode(value)
    } else {
        encode_compact(value)
    }
}

pub fn is_well_formed(raw: &str) -> bool {
    serde_json::from_str::<Value>(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_missing_and_blank() {
        assert_eq!(decode(None), None);
        assert_eq!(decode(Some("")), None);
        assert_eq!(decode(Some("  \n")), None);
    }

    #[test]
    fn test_decode_malformed_is_none() {
        assert_eq!(decode(Some("{not json")), None);
        assert_eq!(decode_as::<Vec<String>>(Some("[1,")), None);
    }

    #[test]
    fn test_decode_as_shape_mismatch_is_none() {
        assert_eq!(decode_as::<Vec<String>>(Some(r#"{"a":1}"#)), None);
    }

    #[test]
    fn test_encode_round_trips_structurally() {
        let value = json!([{"type": "email", "icon": "MailOutlined"}, {"type": "github"}]);
        let text = encode(&value);
        assert!(text.starts_with("[\n  {"));
        assert_eq!(decode(Some(&text)), Some(value.clone()));
        assert_eq!(decode(Some(&encode_compact(&value))), Some(value));
    }

    #[test]
    fn test_well_formed() {
        assert!(is_well_formed("[]"));
        assert!(is_well_formed("\"text\""));
        assert!(!is_well_formed("{not json"));
    }
}
