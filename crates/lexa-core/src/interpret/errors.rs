//! Error partitioning.

use serde::Serialize;

use crate::analysis::model::RawAnalysis;
use crate::profile::Profile;

/// The three error tiers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Semantic,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 3] = [Self::Lexical, Self::Syntax, Self::Semantic];
}

/// Messages of one category, in the order the service reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSection {
    pub category: ErrorCategory,
    pub label: String,
    pub messages: Vec<String>,
}

/// Either the success state or the non-empty error sections. Never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorView {
    Clean,
    Errors { sections: Vec<ErrorSection> },
}

impl ErrorView {
    pub fn has_errors(&self) -> bool {
        matches!(self, Self::Errors { .. })
    }

    pub fn sections(&self) -> &[ErrorSection] {
        match self {
            Self::Clean => &[],
            Self::Errors { sections } => sections,
        }
    }
}

/// Partition a payload's errors by the categories the service assigned.
pub fn partition_errors(raw: &RawAnalysis, profile: &Profile) -> ErrorView {
    let sections: Vec<ErrorSection> = ErrorCategory::ALL
        .iter()
        .filter_map(|&category| {
            let (messages, label) = match category {
                ErrorCategory::Lexical => (&raw.lexical_errors, &profile.error_labels.lexical),
                ErrorCategory::Syntax => (&raw.syntax_errors, &profile.error_labels.syntax),
                ErrorCategory::Semantic => (&raw.semantic_errors, &profile.error_labels.semantic),
            };

            (!messages.is_empty()).then(|| ErrorSection {
                category,
                label: label.clone(),
                messages: messages.clone(),
            })
        })
        .collect();

    if sections.is_empty() {
        ErrorView::Clean
    } else {
        ErrorView::Errors { sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(lexical: &[&str], syntax: &[&str], semantic: &[&str]) -> RawAnalysis {
        let own = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        RawAnalysis {
            lexical_errors: own(lexical),
            syntax_errors: own(syntax),
            semantic_errors: own(semantic),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_errors_is_clean() {
        let view = partition_errors(&RawAnalysis::default(), &Profile::java());
        assert_eq!(view, ErrorView::Clean);
        assert!(!view.has_errors());
        assert!(view.sections().is_empty());
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let view = partition_errors(
            &raw(&["'@' invalid"], &[], &["'ed' undeclared"]),
            &Profile::java(),
        );

        assert!(view.has_errors());
        let categories: Vec<ErrorCategory> = view.sections().iter().map(|s| s.category).collect();
        assert_eq!(categories, vec![ErrorCategory::Lexical, ErrorCategory::Semantic]);
        assert_eq!(view.sections()[0].label, "Lexical errors");
        assert_eq!(view.sections()[1].messages, vec!["'ed' undeclared"]);
    }

    #[test]
    fn test_order_within_category_preserved() {
        let syntax = ["line 9: missing ';'", "line 2: unexpected '}'", "line 5: expected ')'"];
        let view = partition_errors(&raw(&[], &syntax, &[]), &Profile::java());

        assert_eq!(view.sections().len(), 1);
        assert_eq!(view.sections()[0].messages, syntax.to_vec());
    }

    #[test]
    fn test_same_message_stays_in_assigned_categories() {
        let view = partition_errors(&raw(&["x"], &["x"], &["x"]), &Profile::java());
        assert_eq!(view.sections().len(), 3);
        assert!(view.sections().iter().all(|s| s.messages == vec!["x"]));
    }
}
