//! Loading pages and style sheet bodies from disk.

use anyhow::{Context, Result};
use pagetrace_core::Document;
use std::path::PathBuf;

/// `URL=PATH`: a style sheet's address and the file holding its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetArg {
    pub href: String,
    pub path: PathBuf,
}

impl SheetArg {
    /// Splits on the last `=` so query strings in the url survive.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        match raw.rsplit_once('=') {
            Some((href, path)) if !href.trim().is_empty() && !path.trim().is_empty() => Ok(Self {
                href: href.trim().to_string(),
                path: PathBuf::from(path.trim()),
            }),
            _ => Err(format!("expected URL=PATH, got {raw:?}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageInput {
    pub html: PathBuf,
    pub url: String,
    pub sheets: Vec<SheetArg>,
    pub cors_sheets: Vec<SheetArg>,
}

impl PageInput {
    pub fn load(&self) -> Result<Document> {
        let html = std::fs::read_to_string(&self.html)
            .with_context(|| format!("read HTML document: {}", self.html.display()))?;

        let mut builder = Document::builder(self.url.clone());
        for sheet in &self.sheets {
            builder = builder.stylesheet(sheet.href.clone(), read_sheet(sheet)?);
        }
        for sheet in &self.cors_sheets {
            builder = builder.cors_stylesheet(sheet.href.clone(), read_sheet(sheet)?);
        }

        let document = builder
            .parse(&html)
            .with_context(|| format!("load document {}", self.url))?;
        tracing::debug!(
            url = %document.url(),
            sheets = document.style_sheets().len(),
            "document loaded"
        );
        Ok(document)
    }
}

fn read_sheet(sheet: &SheetArg) -> Result<String> {
    std::fs::read_to_string(&sheet.path)
        .with_context(|| format!("read style sheet {} from {}", sheet.href, sheet.path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_arg_splits_on_last_equals() {
        let arg = SheetArg::parse("https://example.com/a.css?v=2=/tmp/a.css").unwrap();
        assert_eq!(arg.href, "https://example.com/a.css?v=2");
        assert_eq!(arg.path, PathBuf::from("/tmp/a.css"));
    }

    #[test]
    fn sheet_arg_requires_both_halves() {
        assert!(SheetArg::parse("https://example.com/a.css").is_err());
        assert!(SheetArg::parse("=/tmp/a.css").is_err());
        assert!(SheetArg::parse("https://example.com/a.css=").is_err());
    }
}
