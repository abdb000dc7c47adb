use regex::Regex;
use std::fmt;

use crate::error::{Result, ScanError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Exact,
    Contains,
    Pattern,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Exact => write!(f, "exact"),
            RuleKind::Contains => write!(f, "contains"),
            RuleKind::Pattern => write!(f, "pattern"),
        }
    }
}

/// A predicate classifying one line as matched or not.
///
/// Lines are compared without their terminator; every variant is
/// case-sensitive.
#[derive(Debug, Clone)]
pub enum MatchRule {
    ExactEquals(String),
    ContainsSubstring(String),
    PatternMatch(Regex),
}

impl MatchRule {
    pub fn exact(target: &str) -> Result<Self> {
        non_empty(RuleKind::Exact, target)?;
        Ok(MatchRule::ExactEquals(target.to_string()))
    }

    pub fn contains(target: &str) -> Result<Self> {
        non_empty(RuleKind::Contains, target)?;
        Ok(MatchRule::ContainsSubstring(target.to_string()))
    }

    /// Compile `pattern` as written. `$` anchors at the end of the line.
    pub fn pattern(pattern: &str) -> Result<Self> {
        non_empty(RuleKind::Pattern, pattern)?;
        let regex = Regex::new(pattern).map_err(|source| ScanError::PatternInvalid {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(MatchRule::PatternMatch(regex))
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            MatchRule::ExactEquals(_) => RuleKind::Exact,
            MatchRule::ContainsSubstring(_) => RuleKind::Contains,
            MatchRule::PatternMatch(_) => RuleKind::Pattern,
        }
    }

    /// The target text or the pattern source.
    pub fn target(&self) -> &str {
        match self {
            MatchRule::ExactEquals(t) | MatchRule::ContainsSubstring(t) => t,
            MatchRule::PatternMatch(re) => re.as_str(),
        }
    }

    pub fn evaluate(&self, line: &str) -> bool {
        match self {
            MatchRule::ExactEquals(target) => line == target.as_str(),
            MatchRule::ContainsSubstring(target) => line.contains(target.as_str()),
            MatchRule::PatternMatch(re) => re.is_match(line),
        }
    }
}

fn non_empty(kind: RuleKind, target: &str) -> Result<()> {
    if target.is_empty() {
        return Err(ScanError::EmptyTarget { kind });
    }
    Ok(())
}

/// A rule as written on the command line, e.g. `exact:Lucy`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    pub kind: RuleKind,
    pub value: String,
}

impl RuleSpec {
    pub fn build(&self) -> Result<MatchRule> {
        match self.kind {
            RuleKind::Exact => MatchRule::exact(&self.value),
            RuleKind::Contains => MatchRule::contains(&self.value),
            RuleKind::Pattern => MatchRule::pattern(&self.value),
        }
    }
}

pub fn parse_rule_spec(input: &str) -> std::result::Result<RuleSpec, String> {
    if input.trim().is_empty() {
        return Err("empty rule".to_string());
    }

    let (kind, value) = input
        .split_once(':')
        .ok_or_else(|| format!("usage: <exact|contains|regex>:<text>, got: {}", input))?;

    let kind = match kind.trim().to_lowercase().as_str() {
        "exact" | "eq" | "equals" => RuleKind::Exact,
        "contains" | "find" | "substring" => RuleKind::Contains,
        "regex" | "re" | "pattern" => RuleKind::Pattern,
        other => return Err(format!("unknown rule kind: {}", other)),
    };

    if value.is_empty() {
        return Err(format!("{} rule needs a non-empty value", kind));
    }

    Ok(RuleSpec {
        kind,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equals() {
        let rule = MatchRule::exact("Lucy").unwrap();
        assert!(rule.evaluate("Lucy"));
        assert!(!rule.evaluate("Lucy Smith"));
        assert!(!rule.evaluate("lucy"));
        assert!(!rule.evaluate(" Lucy"));
    }

    #[test]
    fn test_contains_substring() {
        let rule = MatchRule::contains("Lucy").unwrap();
        assert!(rule.evaluate("Lucy Smith"));
        assert!(rule.evaluate("Lucymore"));
        assert!(rule.evaluate("Dear Lucy"));
        assert!(!rule.evaluate("LUCY"));
        assert!(!rule.evaluate("Tom"));
    }

    #[test]
    fn test_pattern_anchored_at_line_end() {
        let rule = MatchRule::pattern("Lucy$").unwrap();
        assert!(rule.evaluate("Lucy"));
        assert!(rule.evaluate("Hello Lucy"));
        assert!(!rule.evaluate("hello lucy"));
        assert!(!rule.evaluate("Lucy Smith"));
    }

    #[test]
    fn test_pattern_kept_literally() {
        let rule = MatchRule::pattern("LUcy$").unwrap();
        assert!(rule.evaluate("LUcy"));
        assert!(!rule.evaluate("Lucy"));
        assert_eq!(rule.target(), "LUcy$");
    }

    #[test]
    fn test_invalid_pattern() {
        match MatchRule::pattern("Lucy(") {
            Err(ScanError::PatternInvalid { pattern, .. }) => assert_eq!(pattern, "Lucy("),
            other => panic!("expected PatternInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_targets_rejected() {
        assert!(matches!(
            MatchRule::exact(""),
            Err(ScanError::EmptyTarget { kind: RuleKind::Exact })
        ));
        assert!(matches!(
            MatchRule::contains(""),
            Err(ScanError::EmptyTarget { kind: RuleKind::Contains })
        ));
        assert!(matches!(
            MatchRule::pattern(""),
            Err(ScanError::EmptyTarget { kind: RuleKind::Pattern })
        ));
    }

    #[test]
    fn test_parse_kinds_and_aliases() {
        assert_eq!(
            parse_rule_spec("exact:Lucy"),
            Ok(RuleSpec { kind: RuleKind::Exact, value: "Lucy".to_string() })
        );
        assert_eq!(
            parse_rule_spec("EQ:Lucy"),
            Ok(RuleSpec { kind: RuleKind::Exact, value: "Lucy".to_string() })
        );
        assert_eq!(
            parse_rule_spec("find:Lucy"),
            Ok(RuleSpec { kind: RuleKind::Contains, value: "Lucy".to_string() })
        );
        assert_eq!(
            parse_rule_spec("regex:LUcy$"),
            Ok(RuleSpec { kind: RuleKind::Pattern, value: "LUcy$".to_string() })
        );
    }

    #[test]
    fn test_parse_keeps_value_verbatim() {
        assert_eq!(
            parse_rule_spec("contains: Lucy: Smith"),
            Ok(RuleSpec { kind: RuleKind::Contains, value: " Lucy: Smith".to_string() })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_rule_spec("").is_err());
        assert!(parse_rule_spec("   ").is_err());
        assert!(parse_rule_spec("Lucy").is_err());
        assert!(parse_rule_spec("exact:").is_err());
        assert!(parse_rule_spec("fuzzy:Lucy").is_err());
    }

    #[test]
    fn test_spec_build() {
        let spec = parse_rule_spec("regex:Lucy(").unwrap();
        assert!(matches!(spec.build(), Err(ScanError::PatternInvalid { .. })));

        let rule = parse_rule_spec("contains:Lucy").unwrap().build().unwrap();
        assert_eq!(rule.kind(), RuleKind::Contains);
        assert_eq!(rule.target(), "Lucy");
    }
}
