//! ASN comment-annotated list parser.

use super::plain::is_comment;

/// Modifier telling the downstream engine not to resolve the matcher.
pub const NO_RESOLVE: &str = "no-resolve";

/// Inline comment marker in ASN lists.
const INLINE_COMMENT: &str = "//";

/// Parse an ASN-annotated list.
///
/// Inline `//` comments are stripped, and every surviving rule is
/// guaranteed to carry the `no-resolve` modifier exactly once: rules that
/// already end with it are kept as-is.
pub fn parse_asn(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .filter_map(|line| {
            let rule = match line.find(INLINE_COMMENT) {
                Some(idx) => line[..idx].trim_end(),
                None => line,
            };
            if rule.is_empty() {
                return None;
            }
            if rule.ends_with(NO_RESOLVE) {
                Some(rule.to_string())
            } else {
                Some(format!("{},{}", rule, NO_RESOLVE))
            }
        })
        .collect()
}
