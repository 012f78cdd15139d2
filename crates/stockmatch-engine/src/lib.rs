//! Cross-store matching of dead stock against usage.
//!
//! Everything here is synchronous and pure: callers pass the registry's
//! entries in registry order and get freshly computed results back.

pub mod matching;
pub mod report;
pub mod summary;

pub use matching::match_stores;
pub use report::{build_report, ReportCell, ReportTable};
pub use summary::{summarize, StoreSummary};
