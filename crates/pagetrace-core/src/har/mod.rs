//! HAR (HTTP Archive) import: rebuild a page's resource timing from a
//! captured network log.

mod convert;
mod parse;

pub use convert::{load_timing_records, parse_timing_records};
