//! Keyword heuristic that labels raw issue text with a category.
//!
//! Rules are checked in [`RULES`] order and the first rule with a keyword
//! contained in the lowercased text wins. Text matching no rule is a bug report.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    BugReport,
    FeatureRequest,
    PerformanceIssue,
    Documentation,
}

impl IssueCategory {
    /// Heading label, e.g. `Bug Report`
    pub fn label(self) -> &'static str {
        match self {
            IssueCategory::BugReport => "Bug Report",
            IssueCategory::FeatureRequest => "Feature Request",
            IssueCategory::PerformanceIssue => "Performance Issue",
            IssueCategory::Documentation => "Documentation",
        }
    }
}

impl Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One classification rule: a category and the keywords that select it
pub struct KeywordRule {
    pub category: IssueCategory,
    pub keywords: &'static [&'static str],
}

/// Rules in priority order. Keywords match as substrings, so phrases such as
/// `not working` are allowed.
pub const RULES: &[KeywordRule] = &[
    KeywordRule {
        category: IssueCategory::BugReport,
        keywords: &["crash", "error", "fail", "broken", "not working", "bug"],
    },
    KeywordRule {
        category: IssueCategory::FeatureRequest,
        keywords: &["add", "new", "implement", "create", "feature"],
    },
    KeywordRule {
        category: IssueCategory::PerformanceIssue,
        keywords: &["slow", "performance", "memory", "cpu", "lag"],
    },
    KeywordRule {
        category: IssueCategory::Documentation,
        keywords: &["docs", "document", "readme", "help"],
    },
];

pub const DEFAULT_CATEGORY: IssueCategory = IssueCategory::BugReport;

/// Classify raw text. Pure and stateless.
pub fn classify(text: &str) -> IssueCategory {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .map_or(DEFAULT_CATEGORY, |rule| rule.category)
}
