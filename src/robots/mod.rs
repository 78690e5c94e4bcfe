//! Robots.txt exclusion handling
//!
//! This module parses robots.txt content into an immutable rule set and
//! classifies URLs as allowed or blocked. Parsing never fails: absent or
//! unparsable robots.txt means every URL is allowed (fail-open), because the
//! absence of a crawl policy must not be confused with a fetch failure.

mod parser;

pub use parser::{ExclusionRule, ExclusionRules};
