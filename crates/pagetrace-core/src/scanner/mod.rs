//! Resource scanner: one synchronous sweep over a [`Document`] producing a
//! deduplicated, ordered inventory of the resources it references.
//!
//! Probes run in a fixed order (links, scripts, images, video sources, video
//! posters, audio, computed backgrounds, embedded content, object data,
//! fonts). The first probe to report a url decides its kind; later reports of
//! the same url are dropped. Cross-origin style sheets that refuse rule
//! enumeration simply contribute no fonts.

mod inventory;
mod kind;
mod probe;

use serde::{Deserialize, Serialize};

use crate::config::ScannerConfig;
use crate::document::Document;

pub use inventory::Inventory;
pub use kind::ResourceKind;

/// One inventoried resource: an absolute url and how it was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    pub url: String,
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceScanner {
    config: ScannerConfig,
}

impl ResourceScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Scans `document`. Never fails; inaccessible sources yield nothing.
    pub fn scan(&self, document: &Document) -> Vec<ResourceReference> {
        let mut inventory = Inventory::new();
        let cx = probe::ProbeContext {
            document,
            config: &self.config,
        };
        for probe in probe::PROBES.iter() {
            let mut added = 0usize;
            for found in (probe.extract)(&cx) {
                if self.config.ignores(&found.url) {
                    tracing::trace!(url = %found.url, "ignored scheme");
                    continue;
                }
                let kind = probe.kind.classify(&found);
                if inventory.insert(found.url.into(), kind) {
                    added += 1;
                }
            }
            tracing::trace!(probe = probe.name, added, "probe finished");
        }
        tracing::debug!(
            document = %document.url(),
            references = inventory.len(),
            "resource scan complete"
        );
        inventory.into_references()
    }
}

/// Scans `document` with the default scanner configuration.
pub fn scan(document: &Document) -> Vec<ResourceReference> {
    ResourceScanner::default().scan(document)
}
