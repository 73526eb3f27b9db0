pub mod config;
pub mod logging;

pub mod css;
pub mod document;
pub mod har;
pub mod manifest;
pub mod scanner;
pub mod style;
pub mod timing;

pub use document::{Document, DocumentBuilder, DocumentError, SecurityError, StyleSheet};
pub use scanner::{scan, ResourceKind, ResourceReference, ResourceScanner};
pub use timing::{IdleOutcome, ResourceTimeline, TimingCollector, TimingRecord};
