use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A structured record extracted from one member page
///
/// `title` and `content` are always present, possibly empty on degraded
/// extraction; `infobox` may be empty but is never null. The infobox map
/// preserves the document order of first appearance per key, with later
/// duplicate keys overwriting earlier values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Page title, trimmed
    pub title: String,

    /// Main content text, trimmed
    pub content: String,

    /// Attribute table rows as key/value pairs
    #[serde(default)]
    pub infobox: IndexMap<String, String>,
}

impl Record {
    /// Creates a record with an empty infobox
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            infobox: IndexMap::new(),
        }
    }
}
