//! CLI command handlers. Each command is in its own file.

mod completions;
mod input;
mod manifest;
mod scan;
mod timings;

pub use completions::{run_completions, run_manpage};
pub use input::{PageInput, SheetArg};
pub use manifest::run_manifest;
pub use scan::run_scan;
pub use timings::run_timings;
