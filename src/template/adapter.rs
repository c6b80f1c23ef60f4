use tracing::trace;

use crate::classifier::classify;
use crate::template::{derive_title, Document, HEADING_MARKER};

/// Section whose first content line receives the raw input
pub const DESCRIPTION_SECTION: &str = "Description";

/// Reshape a template document around new raw input.
///
/// Only two lines change:
/// - the title line (first line, when it starts with `##`) becomes
///   `## <Category>: <Title>` for the new input
/// - the first content line of `### Description` becomes the raw input
///
/// Everything else, checklists and code blocks included, is copied as is.
/// A description section with no content line before the next section
/// header is left alone.
pub fn adapt(raw_input: &str, template_output: &str) -> String {
    let mut doc = Document::parse(template_output);

    if let Some(idx) = doc.title_line() {
        let heading = format!(
            "{HEADING_MARKER} {}: {}",
            classify(raw_input),
            derive_title(raw_input)
        );
        doc.replace_line(idx, heading);
    }

    match doc.section_content_line(DESCRIPTION_SECTION) {
        Some(idx) => doc.replace_line(idx, raw_input),
        None => trace!("template has no description line to replace"),
    }

    doc.render()
}
