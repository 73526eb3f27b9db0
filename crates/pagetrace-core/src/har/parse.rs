//! The subset of HAR 1.2 needed to rebuild resource timing.
//!
//! Underscore fields are Chrome DevTools extensions; other exporters omit them.

use serde::Deserialize;

/// Root HAR log (top-level wrapper).
#[derive(Debug, Deserialize)]
pub struct HarLog {
    pub log: HarRoot,
}

#[derive(Debug, Deserialize)]
pub struct HarRoot {
    #[serde(default)]
    pub pages: Vec<HarPage>,
    pub entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPage {
    pub started_date_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarEntry {
    pub started_date_time: String,
    /// Total elapsed milliseconds; -1 or absent when unknown.
    #[serde(default)]
    pub time: f64,
    #[serde(default, rename = "_resourceType")]
    pub resource_type: Option<String>,
    pub request: HarRequest,
    pub response: HarResponse,
}

#[derive(Debug, Deserialize)]
pub struct HarRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarResponse {
    #[serde(default)]
    pub status: u16,
    #[serde(default = "unknown_size")]
    pub headers_size: i64,
    #[serde(default = "unknown_size")]
    pub body_size: i64,
    #[serde(default, rename = "_transferSize")]
    pub transfer_size: Option<i64>,
    #[serde(default)]
    pub content: Option<HarContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarContent {
    #[serde(default)]
    pub mime_type: Option<String>,
}

fn unknown_size() -> i64 {
    -1
}
