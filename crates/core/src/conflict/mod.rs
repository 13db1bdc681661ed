//! Conflict-marker scanning, resolution, and outcome reporting.
//!
//! The conflict subsystem is responsible for:
//! 1. **Parsing** -- splitting file content into literal text and well-formed
//!    conflict regions.
//! 2. **Resolution** -- rewriting the regions that carry the expected incoming
//!    label according to a [`ResolutionPolicy`].
//! 3. **Reporting** -- one [`FileOutcome`] per processed file.

pub mod outcome;
pub mod parser;
pub mod resolver;

pub use outcome::{BatchReport, FileOutcome};
pub use parser::{ConflictRegion, Segment};
pub use resolver::{ConflictResolver, Resolution, ResolutionPolicy};
