//! Presentation style parsing
//!
//! draw.io encodes presentation as `shape;key=value;key=value;` strings.
//! Bare tokens name a shape, keyed tokens carry properties. The pipeline only
//! asks a handful of questions of a style, all answered here.

use std::collections::HashMap;

/// Bit of the `fontStyle` mask that marks italic text
const FONT_STYLE_ITALIC: u32 = 2;

/// Parsed view of a cell style string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStyle {
    flags: Vec<String>,
    properties: HashMap<String, String>,
}

impl CellStyle {
    /// Parse a raw `key=value;flag;` style string
    pub fn parse(raw: &str) -> Self {
        let mut style = Self::default();

        for token in raw.split(';').map(str::trim).filter(|t| !t.is_empty()) {
            match token.split_once('=') {
                Some((key, value)) => {
                    style
                        .properties
                        .insert(key.trim().to_string(), value.trim().to_string());
                }
                None => style.flags.push(token.to_string()),
            }
        }

        style
    }

    /// Look up a keyed property
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns true if a bare shape token is present
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    fn is_shape(&self, shape: &str) -> bool {
        self.has_flag(shape) || self.get("shape") == Some(shape)
    }

    /// Bordered, titled container (a class box)
    pub fn is_container(&self) -> bool {
        self.is_shape("swimlane")
    }

    /// Horizontal rule between member groups
    pub fn is_separator(&self) -> bool {
        self.is_shape("line")
    }

    /// Dashed stroke (realization arrows)
    pub fn is_dashed(&self) -> bool {
        self.get("dashed") == Some("1")
    }

    /// An arrowhead marker is drawn at the target end
    pub fn has_arrowhead(&self) -> bool {
        matches!(self.get("endArrow"), Some(marker) if marker != "none" && !marker.is_empty())
    }

    /// Italic bit of the `fontStyle` mask
    pub fn is_italic(&self) -> bool {
        self.get("fontStyle")
            .and_then(|v| v.parse::<u32>().ok())
            .is_some_and(|mask| mask & FONT_STYLE_ITALIC != 0)
    }
}
