//! Rule classification: mapping raw tokens to typed rules.

use ipnet::{Ipv4Net, Ipv6Net};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::{Rule, RuleType};

/// Fully-qualified domain name: one or more label-dot groups and a TLD of
/// at least two letters.
static FQDN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$")
        .expect("FQDN pattern is valid")
});

/// Shape of a rule-type name: `GEOIP`, `IP-ASN`, `AND`, ...
static TYPE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9-]*$").expect("type shape pattern is valid"));

/// Classify a raw token into a typed rule.
///
/// Already-typed tokens pass through unchanged, so classification is
/// idempotent: classifying the canonical rendering of a classified rule
/// yields the same rule. Untyped tokens are probed in order of
/// specificity; anything that matches no pattern becomes a
/// `DOMAIN-KEYWORD` substring matcher.
pub fn classify(token: &str) -> Rule {
    // Typed prefix: "TYPE,value,..." or "TYPE:value,..."
    if let Some(idx) = token.find([',', ':']) {
        let head = &token[..idx];
        let rest = &token[idx + 1..];
        if let Some(rule_type) = RuleType::parse(head) {
            let mut parts = rest.split(',').map(str::trim);
            let value = parts.next().unwrap_or("").to_string();
            let modifiers = parts
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
            return Rule::with_modifiers(rule_type, value, modifiers);
        }
        // Looks typed but the type is not one we model: keep verbatim.
        if TYPE_SHAPE.is_match(head) {
            return Rule::new(RuleType::Other, token);
        }
    }

    if is_ipv4_cidr(token) {
        return Rule::new(RuleType::IpCidr, token);
    }

    if token.contains(':') && is_ipv6_cidr(token) {
        return Rule::new(RuleType::IpCidr6, token);
    }

    // Suffix markers must be probed before the FQDN pattern, which the
    // leading marker would fail.
    if let Some(stripped) = token.strip_prefix("*.") {
        return Rule::new(RuleType::DomainSuffix, stripped);
    }
    if let Some(stripped) = token.strip_prefix('.') {
        return Rule::new(RuleType::DomainSuffix, stripped);
    }

    if FQDN.is_match(token) {
        return Rule::new(RuleType::Domain, token);
    }

    Rule::new(RuleType::DomainKeyword, token)
}

/// IPv4 literal with optional prefix length.
fn is_ipv4_cidr(token: &str) -> bool {
    token.parse::<Ipv4Net>().is_ok() || token.parse::<Ipv4Addr>().is_ok()
}

/// IPv6 literal with optional prefix length.
fn is_ipv6_cidr(token: &str) -> bool {
    token.parse::<Ipv6Net>().is_ok() || token.parse::<Ipv6Addr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_passthrough() {
        let rule = classify("DOMAIN,example.org");
        assert_eq!(rule.rule_type, RuleType::Domain);
        assert_eq!(rule.value, "example.org");
        assert!(rule.modifiers.is_empty());
    }

    #[test]
    fn test_typed_passthrough_with_modifier() {
        let rule = classify("IP-CIDR,10.0.0.0/8,no-resolve");
        assert_eq!(rule.rule_type, RuleType::IpCidr);
        assert_eq!(rule.value, "10.0.0.0/8");
        assert_eq!(rule.modifiers, vec!["no-resolve".to_string()]);
    }

    #[test]
    fn test_typed_colon_separator() {
        let rule = classify("USER-AGENT:MicroMessenger*");
        assert_eq!(rule.rule_type, RuleType::UserAgent);
        assert_eq!(rule.value, "MicroMessenger*");
    }

    #[test]
    fn test_classification_is_idempotent() {
        for token in [
            "DOMAIN,example.org",
            "IP-CIDR,1.2.3.4/24,no-resolve",
            "PROCESS-NAME,app.exe",
            "GEOIP,CN",
            "*.example.com",
            "ads",
        ] {
            let once = classify(token);
            let twice = classify(&once.canonical());
            assert_eq!(once, twice, "token {token:?} not idempotent");
        }
    }

    #[test]
    fn test_ipv4_cidr() {
        let rule = classify("1.2.3.4/24");
        assert_eq!(rule.rule_type, RuleType::IpCidr);
        assert_eq!(rule.value, "1.2.3.4/24");

        let rule = classify("8.8.8.8");
        assert_eq!(rule.rule_type, RuleType::IpCidr);
    }

    #[test]
    fn test_ipv6_cidr() {
        let rule = classify("2001:db8::/32");
        assert_eq!(rule.rule_type, RuleType::IpCidr6);

        let rule = classify("::1");
        assert_eq!(rule.rule_type, RuleType::IpCidr6);
    }

    #[test]
    fn test_domain_suffix_markers() {
        let rule = classify("*.example.com");
        assert_eq!(rule.rule_type, RuleType::DomainSuffix);
        assert_eq!(rule.value, "example.com");

        let rule = classify(".example.com");
        assert_eq!(rule.rule_type, RuleType::DomainSuffix);
        assert_eq!(rule.value, "example.com");
    }

    #[test]
    fn test_plain_domain() {
        let rule = classify("www.example.com");
        assert_eq!(rule.rule_type, RuleType::Domain);
        assert_eq!(rule.value, "www.example.com");
    }

    #[test]
    fn test_keyword_fallback() {
        let rule = classify("ads");
        assert_eq!(rule.rule_type, RuleType::DomainKeyword);
        assert_eq!(rule.value, "ads");
    }

    #[test]
    fn test_unknown_typed_token_is_other() {
        let rule = classify("GEOIP,CN");
        assert_eq!(rule.rule_type, RuleType::Other);
        assert_eq!(rule.canonical(), "GEOIP,CN");
    }

    #[test]
    fn test_bare_ip_does_not_become_keyword() {
        // A bare IP satisfies no domain pattern; it must classify as CIDR
        // before the domain checks run.
        assert_eq!(classify("192.168.0.1").rule_type, RuleType::IpCidr);
    }

    #[test]
    fn test_delimiter_whitespace_is_stripped() {
        let rule = classify("DOMAIN, example.org , no-resolve");
        assert_eq!(rule.value, "example.org");
        assert_eq!(rule.modifiers, vec!["no-resolve".to_string()]);
    }
}
