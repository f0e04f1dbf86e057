//! Plain line-list parser.

/// Line prefixes treated as comments or structural noise.
pub const COMMENT_MARKERS: [char; 5] = ['#', '!', '/', ';', '['];

/// Whether a trimmed line is a comment or noise line.
pub(crate) fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKERS)
}

/// Parse a plain rule list: one rule per line, comment lines and empty
/// lines dropped, surviving lines trimmed.
pub fn parse_plain(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .map(String::from)
        .collect()
}
