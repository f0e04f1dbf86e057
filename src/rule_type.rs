//! Rule type definitions.

use std::fmt;

/// RuleType represents the matcher type of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleType {
    /// Exact domain name matching
    Domain,
    /// Domain and all of its subdomains
    DomainSuffix,
    /// Substring matching against the domain (catch-all classification)
    DomainKeyword,
    /// IPv4 CIDR range matching
    IpCidr,
    /// IPv6 CIDR range matching
    IpCidr6,
    /// Autonomous system number matching
    IpAsn,
    /// Process name matching
    ProcessName,
    /// User-agent string matching
    UserAgent,
    /// Typed rule of a kind this pipeline does not model; passed through verbatim
    Other,
}

impl RuleType {
    /// All types in the fixed order used for header count lines.
    pub const ALL: [RuleType; 9] = [
        RuleType::Domain,
        RuleType::DomainSuffix,
        RuleType::DomainKeyword,
        RuleType::IpCidr,
        RuleType::IpCidr6,
        RuleType::IpAsn,
        RuleType::ProcessName,
        RuleType::UserAgent,
        RuleType::Other,
    ];

    /// Parse a rule type from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DOMAIN" => Some(RuleType::Domain),
            "DOMAIN-SUFFIX" => Some(RuleType::DomainSuffix),
            "DOMAIN-KEYWORD" => Some(RuleType::DomainKeyword),
            "IP-CIDR" | "IPCIDR" => Some(RuleType::IpCidr),
            "IP-CIDR6" | "IPCIDR6" => Some(RuleType::IpCidr6),
            "IP-ASN" | "IPASN" => Some(RuleType::IpAsn),
            "PROCESS-NAME" => Some(RuleType::ProcessName),
            "USER-AGENT" => Some(RuleType::UserAgent),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Domain => "DOMAIN",
            RuleType::DomainSuffix => "DOMAIN-SUFFIX",
            RuleType::DomainKeyword => "DOMAIN-KEYWORD",
            RuleType::IpCidr => "IP-CIDR",
            RuleType::IpCidr6 => "IP-CIDR6",
            RuleType::IpAsn => "IP-ASN",
            RuleType::ProcessName => "PROCESS-NAME",
            RuleType::UserAgent => "USER-AGENT",
            RuleType::Other => "OTHER",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
