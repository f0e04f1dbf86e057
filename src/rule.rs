//! Classified rule records and their canonical rendering.

use std::fmt;

use crate::RuleType;

/// A single classified rule: matcher type, value, and trailing modifiers.
///
/// The canonical string form (`TYPE,value,modifier,...` with no surrounding
/// whitespace) doubles as the deduplication key and the output line format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Matcher type
    pub rule_type: RuleType,
    /// Matcher value, stripped of any type prefix and delimiter whitespace
    pub value: String,
    /// Trailing qualifiers such as `no-resolve`, order-preserved
    pub modifiers: Vec<String>,
}

impl Rule {
    /// Create a rule without modifiers.
    pub fn new(rule_type: RuleType, value: impl Into<String>) -> Self {
        Self {
            rule_type,
            value: value.into(),
            modifiers: Vec::new(),
        }
    }

    /// Create a rule with modifiers.
    pub fn with_modifiers(
        rule_type: RuleType,
        value: impl Into<String>,
        modifiers: Vec<String>,
    ) -> Self {
        Self {
            rule_type,
            value: value.into(),
            modifiers,
        }
    }

    /// Render the canonical string form.
    ///
    /// `OTHER` rules carry their entire original token in `value` and render
    /// as that token unchanged, so unmodeled rule kinds survive verbatim.
    pub fn canonical(&self) -> String {
        if self.rule_type == RuleType::Other {
            return self.value.clone();
        }
        let mut out = format!("{},{}", self.rule_type.as_str(), self.value);
        for modifier in &self.modifiers {
            out.push(',');
            out.push_str(modifier);
        }
        out
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_without_modifiers() {
        let rule = Rule::new(RuleType::Domain, "example.org");
        assert_eq!(rule.canonical(), "DOMAIN,example.org");
    }

    #[test]
    fn test_canonical_with_modifiers() {
        let rule = Rule::with_modifiers(
            RuleType::IpCidr,
            "1.2.3.4/24",
            vec!["no-resolve".to_string()],
        );
        assert_eq!(rule.canonical(), "IP-CIDR,1.2.3.4/24,no-resolve");
    }

    #[test]
    fn test_canonical_preserves_modifier_order() {
        let rule = Rule::with_modifiers(
            RuleType::IpAsn,
            "140238",
            vec!["no-resolve".to_string(), "extended".to_string()],
        );
        assert_eq!(rule.canonical(), "IP-ASN,140238,no-resolve,extended");
    }

    #[test]
    fn test_other_renders_verbatim() {
        let rule = Rule::new(RuleType::Other, "GEOIP,CN");
        assert_eq!(rule.canonical(), "GEOIP,CN");
    }
}
