//! Markdown issue documents: parsing into marked lines, title derivation,
//! template adaptation and the generic fallback skeleton.

pub mod adapter;
pub mod document;
pub mod fallback;
pub mod title;

/// Marker of the document title line
pub const HEADING_MARKER: &str = "##";
/// Marker of a section header
pub const SECTION_MARKER: &str = "###";

/// Section headers an issue document is expected to carry
pub const EXPECTED_SECTIONS: [&str; 6] = [
    "Description",
    "Environment",
    "Steps to Reproduce",
    "Expected Behavior",
    "Actual Behavior",
    "Proposed Tasks",
];

/// Prefix of an open checklist item
pub const TASK_MARKER: &str = "- [ ]";

pub use adapter::adapt;
pub use document::{Document, Line, LineKind};
pub use fallback::generate_fallback;
pub use title::{derive_title, title_case};
