//! Built-in rules for JavaScript linting

use unchain_core::Severity;

use crate::rules::{Rule, RuleCategory, RuleMetadata};

pub mod chained_assignments;
pub mod parse_errors;

/// Collection of built-in rules
pub struct BuiltinRules;

impl BuiltinRules {
    /// Every builtin rule, correctness first
    pub fn all_rules() -> Vec<Rule> {
        let mut rules = Self::correctness_rules();
        rules.extend(Self::style_rules());
        rules
    }

    /// Get all built-in correctness rules
    pub fn correctness_rules() -> Vec<Rule> {
        vec![Self::parse_error_rule()]
    }

    /// Get all built-in style rules
    pub fn style_rules() -> Vec<Rule> {
        vec![Self::no_chained_assignments_rule()]
    }

    /// Look up a builtin rule by ID
    pub fn find(id: &str) -> Option<Rule> {
        Self::all_rules().into_iter().find(|rule| rule.id == id)
    }

    /// Rule surfacing syntax errors from the parser
    fn parse_error_rule() -> Rule {
        Rule {
            id: parse_errors::PARSE_ERROR.to_string(),
            severity: Severity::Error,
            description: "Reports syntax errors found while parsing".to_string(),
            fixable: false,
            metadata: RuleMetadata {
                id: parse_errors::PARSE_ERROR.to_string(),
                name: "Parse Error".to_string(),
                description: "Reports syntax errors found while parsing. The rest of the file \
                              is still linted, but no fixes are offered for a file that does \
                              not parse cleanly."
                    .to_string(),
                severity: Severity::Error,
                category: RuleCategory::Correctness,
                tags: vec!["correctness".to_string(), "syntax".to_string()],
                version: Some("1.0.0".to_string()),
                docs_url: None,
            },
        }
    }

    /// Rule for chained assignments like `a = b = c`
    fn no_chained_assignments_rule() -> Rule {
        Rule {
            id: chained_assignments::NO_CHAINED_ASSIGNMENTS.to_string(),
            severity: Severity::Warning,
            description: "Disallows chained assignments such as `a = b = c`".to_string(),
            fixable: true,
            metadata: RuleMetadata {
                id: chained_assignments::NO_CHAINED_ASSIGNMENTS.to_string(),
                name: "No Chained Assignments".to_string(),
                description: "Reports every assignment used as the value of another \
                              assignment or of a declaration, as in `var a = b = c;`. The fix \
                              splits one link per pass into its own statement \
                              (`var a = c;` then `b = c;`), keeping the original spacing, \
                              comments and parentheses. Links with compound operators, \
                              parenthesized links, and chains that do not end their \
                              statement are reported without a fix."
                    .to_string(),
                severity: Severity::Warning,
                category: RuleCategory::Style,
                tags: vec![
                    "style".to_string(),
                    "assignment".to_string(),
                    "readability".to_string(),
                ],
                version: Some("1.0.0".to_string()),
                docs_url: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_have_unique_ids() {
        let rules = BuiltinRules::all_rules();
        let mut ids: Vec<_> = rules.iter().map(|rule| rule.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn test_ids_match_metadata_and_category() {
        for rule in BuiltinRules::all_rules() {
            assert_eq!(rule.id, rule.metadata.id);
            assert_eq!(rule.severity, rule.metadata.severity);
            let prefix = format!("{}/", rule.metadata.category.slug());
            assert!(rule.id.starts_with(&prefix), "{}", rule.id);
        }
    }

    #[test]
    fn test_find() {
        let rule = BuiltinRules::find("style/no-chained-assignments").unwrap();
        assert!(rule.fixable);
        assert_eq!(rule.severity, Severity::Warning);
        assert!(BuiltinRules::find("style/unknown").is_none());
    }
}
