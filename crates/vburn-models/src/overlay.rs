//! Overlay descriptors submitted with an upload.

use serde::{Deserialize, Serialize};

/// Kind of overlay content.
///
/// Only text overlays have any effect on processing; image and unrecognized
/// kinds are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Text,
    Image,
    #[serde(other)]
    Unknown,
}

/// A descriptor of content to be composited onto the video.
///
/// Clients may send extra fields (position, styling hints); they are
/// tolerated and dropped. The `type` field is required: a descriptor
/// without one is a malformed payload, not an implicit text overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overlay {
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    #[serde(default)]
    pub content: String,
}

impl Overlay {
    /// Create a text overlay.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: OverlayKind::Text,
            content: content.into(),
        }
    }

    /// Whether this overlay is a text overlay.
    pub fn is_text(&self) -> bool {
        self.kind == OverlayKind::Text
    }
}

/// Parse a raw overlays payload into a list of descriptors.
pub fn parse_overlays(raw: &str) -> Result<Vec<Overlay>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_overlay() {
        let overlays = parse_overlays(r#"[{"type":"text","content":"Hello"}]"#).unwrap();
        assert_eq!(overlays.len(), 1);
        assert!(overlays[0].is_text());
        assert_eq!(overlays[0].content, "Hello");
    }

    #[test]
    fn test_parse_empty_list() {
        let overlays = parse_overlays("[]").unwrap();
        assert!(overlays.is_empty());
    }

    #[test]
    fn test_parse_tolerates_extra_fields() {
        let overlays =
            parse_overlays(r#"[{"type":"text","content":"Hi","x":10,"y":20,"font":"Arial"}]"#)
                .unwrap();
        assert_eq!(overlays[0].content, "Hi");
    }

    #[test]
    fn test_parse_unknown_kind() {
        let overlays = parse_overlays(r#"[{"type":"sticker","content":"star"}]"#).unwrap();
        assert_eq!(overlays[0].kind, OverlayKind::Unknown);
        assert!(!overlays[0].is_text());
    }

    #[test]
    fn test_parse_rejects_missing_kind() {
        assert!(parse_overlays(r#"[{"content":"Hello"}]"#).is_err());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_overlays("not json").is_err());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_overlays(r#"{"type":"text"}"#).is_err());
    }
}
