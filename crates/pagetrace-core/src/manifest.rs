//! Merged view of a page's network footprint: what the markup references plus
//! what the platform reported fetching.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::scanner::ResourceReference;
use crate::timing::TimingRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkResource {
    pub url: String,
    /// Scanner kind for references, initiator type for timing records.
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Scanned references first, then timing records, each in their own order.
/// Nothing is merged; a url fetched and referenced appears twice.
pub fn build_manifest(
    references: &[ResourceReference],
    records: &[TimingRecord],
) -> Vec<NetworkResource> {
    let scanned = references.iter().map(|r| NetworkResource {
        url: r.url.clone(),
        resource_type: r.kind.to_string(),
    });
    let loaded = records.iter().map(|r| NetworkResource {
        url: r.name.clone(),
        resource_type: r.initiator_type.clone(),
    });
    scanned.chain(loaded).collect()
}

/// Distinct urls of `manifest` in first-appearance order.
pub fn unique_urls(manifest: &[NetworkResource]) -> Vec<String> {
    manifest
        .iter()
        .map(|r| r.url.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ResourceKind;

    #[test]
    fn references_precede_timing_records() {
        let refs = vec![
            ResourceReference {
                url: "https://example.com/a.css".into(),
                kind: ResourceKind::Stylesheet,
            },
            ResourceReference {
                url: "https://example.com/icon.png".into(),
                kind: ResourceKind::LinkRelation("icon".into()),
            },
        ];
        let records = vec![
            TimingRecord::new("https://example.com/a.css", "link"),
            TimingRecord::new("https://example.com/api", "fetch"),
        ];

        let manifest = build_manifest(&refs, &records);
        let pairs: Vec<_> = manifest
            .iter()
            .map(|r| (r.url.as_str(), r.resource_type.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("https://example.com/a.css", "stylesheet"),
                ("https://example.com/icon.png", "icon"),
                ("https://example.com/a.css", "link"),
                ("https://example.com/api", "fetch"),
            ]
        );
        assert_eq!(
            unique_urls(&manifest),
            vec![
                "https://example.com/a.css",
                "https://example.com/icon.png",
                "https://example.com/api",
            ]
        );
    }

    #[test]
    fn serializes_type_field() {
        let json = serde_json::to_string(&NetworkResource {
            url: "https://example.com/x.js".into(),
            resource_type: "script".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"url":"https://example.com/x.js","type":"script"}"#);
    }

    #[test]
    fn empty_inputs_give_empty_manifest() {
        assert!(build_manifest(&[], &[]).is_empty());
        assert!(unique_urls(&[]).is_empty());
    }
}
