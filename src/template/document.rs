use std::fmt::Display;

use crate::template::{HEADING_MARKER, SECTION_MARKER};

/// What a template line is, as far as adaptation is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// whitespace only
    Blank,
    /// starts with `###`; ends a section
    SectionHeader,
    /// starts with `#` but not `###`
    Heading,
    /// anything else, including list items and code fences
    Content,
}

impl LineKind {
    pub fn of(text: &str) -> Self {
        if text.starts_with(SECTION_MARKER) {
            LineKind::SectionHeader
        } else if text.starts_with('#') {
            LineKind::Heading
        } else if text.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Content
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    kind: LineKind,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = LineKind::of(&text);
        Self { text, kind }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// `### <name>`, ignoring surrounding whitespace
    pub fn is_section(&self, name: &str) -> bool {
        self.text
            .trim()
            .strip_prefix(SECTION_MARKER)
            .and_then(|rest| rest.strip_prefix(' '))
            .is_some_and(|rest| rest == name)
    }
}

/// A Markdown document as a list of marked lines.
///
/// Lines are split on `\n` only and rendered back with `\n`, so a parse then
/// render with no edits returns the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(Line::new).collect(),
        }
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Index of the title line: the first line, if it starts with `##`.
    pub fn title_line(&self) -> Option<usize> {
        self.lines
            .first()
            .filter(|line| line.text.starts_with(HEADING_MARKER))
            .map(|_| 0)
    }

    /// Index of the first `### <name>` line
    pub fn section_header(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.is_section(name))
    }

    /// First content line between the header at `header` and the next section header.
    pub fn first_content_line(&self, header: usize) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(header + 1)
            .take_while(|(_, line)| line.kind != LineKind::SectionHeader)
            .find(|(_, line)| line.kind == LineKind::Content)
            .map(|(idx, _)| idx)
    }

    /// First content line of section `name`, if both exist
    pub fn section_content_line(&self, name: &str) -> Option<usize> {
        self.section_header(name)
            .and_then(|header| self.first_content_line(header))
    }

    /// Replace the line at `idx` verbatim. Out of range is ignored.
    pub fn replace_line(&mut self, idx: usize, text: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(idx) {
            *line = Line::new(text);
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "## Bug Report: Old\n\n### Description\n\n#### note\nfirst line\nsecond line\n### Environment\n- a\n";

    #[test]
    fn parse_render_is_identity() {
        assert_eq!(Document::parse(DOC).render(), DOC);
        assert_eq!(Document::parse("").render(), "");
        assert_eq!(Document::parse("\n\n").lines().len(), 3);
    }

    #[test]
    fn line_kinds() {
        assert_eq!(LineKind::of("### Steps"), LineKind::SectionHeader);
        assert_eq!(LineKind::of("#### deeper"), LineKind::SectionHeader);
        assert_eq!(LineKind::of("## Title"), LineKind::Heading);
        assert_eq!(LineKind::of("   "), LineKind::Blank);
        assert_eq!(LineKind::of("- [ ] task"), LineKind::Content);
        assert_eq!(LineKind::of("  # indented"), LineKind::Content);
    }

    #[test]
    fn finds_title_and_first_description_line() {
        let doc = Document::parse(DOC);
        assert_eq!(doc.title_line(), Some(0));
        assert_eq!(doc.section_header("Description"), Some(2));
        // "#### note" is a section header, so the span ends there
        assert_eq!(doc.section_content_line("Description"), None);
        assert_eq!(doc.section_content_line("Environment"), Some(8));
    }

    #[test]
    fn heading_lines_inside_section_are_skipped() {
        let doc = Document::parse("### Description\n## aside\n# top\n\nbody\n### Next");
        assert_eq!(doc.section_content_line("Description"), Some(4));
    }

    #[test]
    fn section_match_is_exact() {
        let doc = Document::parse("### Descriptions\nx\n  ### Description  \ny");
        assert_eq!(doc.section_header("Description"), Some(2));
    }

    #[test]
    fn no_title_without_heading_marker() {
        assert_eq!(Document::parse("# Top\n### Description").title_line(), None);
    }

    #[test]
    fn replace_line_reclassifies() {
        let mut doc = Document::parse("a\nb");
        doc.replace_line(1, "### New");
        assert_eq!(doc.lines()[1].kind(), LineKind::SectionHeader);
        doc.replace_line(9, "ignored");
        assert_eq!(doc.render(), "a\n### New");
    }
}
