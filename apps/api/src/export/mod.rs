// Resume exports that do not go through a LaTeX template:
// plain text for ATS paste-in and a section completeness report.

pub mod completeness;
pub mod handlers;
pub mod plain_text;

pub use completeness::{compute_completeness, CompletenessReport};
pub use plain_text::to_plain_text;
