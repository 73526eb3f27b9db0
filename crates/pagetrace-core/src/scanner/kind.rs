//! Resource classification tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a reference was discovered. Serialized as its tag string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceKind {
    Stylesheet,
    Script,
    Image,
    Video,
    VideoPoster,
    Audio,
    CssBackgroundImage,
    EmbeddedContent,
    ObjectData,
    Font,
    /// Non-stylesheet `<link>`, tagged with its raw `rel` value (e.g. `shortcut icon`).
    LinkRelation(String),
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::Stylesheet => "stylesheet",
            ResourceKind::Script => "script",
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::VideoPoster => "video-poster",
            ResourceKind::Audio => "audio",
            ResourceKind::CssBackgroundImage => "css-background-image",
            ResourceKind::EmbeddedContent => "embedded-content",
            ResourceKind::ObjectData => "object-data",
            ResourceKind::Font => "font",
            ResourceKind::LinkRelation(rel) => rel,
        }
    }
}

impl From<String> for ResourceKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "stylesheet" => ResourceKind::Stylesheet,
            "script" => ResourceKind::Script,
            "image" => ResourceKind::Image,
            "video" => ResourceKind::Video,
            "video-poster" => ResourceKind::VideoPoster,
            "audio" => ResourceKind::Audio,
            "css-background-image" => ResourceKind::CssBackgroundImage,
            "embedded-content" => ResourceKind::EmbeddedContent,
            "object-data" => ResourceKind::ObjectData,
            "font" => ResourceKind::Font,
            _ => ResourceKind::LinkRelation(tag),
        }
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::LinkRelation(rel) => rel,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
