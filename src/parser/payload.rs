//! Dash-list "payload" document parser.
//!
//! This is not a YAML parser. It recognizes exactly one structural idiom: a
//! top-level `payload:` line introducing a sequence of dash-prefixed scalar
//! items, and degrades to a whole-document dash scan on anything else.

/// The payload-introducer keyword.
pub const PAYLOAD_KEY: &str = "payload:";

/// Upper bound on dash stripping per item, so malformed input cannot loop.
const MAX_DASH_STRIP: usize = 8;

/// Whether the document contains a payload-introducer line.
pub fn has_payload_introducer(content: &str) -> bool {
    content.lines().any(|line| line.trim() == PAYLOAD_KEY)
}

/// Parse a payload document into rule tokens.
///
/// Scans for the introducer line, then consumes dash-prefixed items until
/// the first non-empty, non-comment line that does not start with a dash.
/// If no introducer is found, or the region yields zero tokens, every
/// dash-prefixed line in the document is considered instead; this recovers
/// malformed or non-standard documents.
pub fn parse_payload(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.lines().collect();
    let mut tokens = Vec::new();

    if let Some(start) = lines.iter().position(|line| line.trim() == PAYLOAD_KEY) {
        for line in &lines[start + 1..] {
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with('#') {
                continue;
            }
            if !stripped.starts_with('-') {
                break;
            }
            if let Some(token) = strip_item(stripped) {
                tokens.push(token);
            }
        }
    }

    if tokens.is_empty() {
        // Fallback: scan the entire document for dash-prefixed lines,
        // ignoring section boundaries.
        for line in &lines {
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with('#') || stripped == PAYLOAD_KEY {
                continue;
            }
            if stripped.starts_with('-') {
                if let Some(token) = strip_item(stripped) {
                    tokens.push(token);
                }
            }
        }
    }

    tokens
}

/// Strip leading dashes and surrounding whitespace from a candidate item.
///
/// Repeats for malformed double-dash lines, bounded by `MAX_DASH_STRIP`.
/// Returns `None` for empty items and for a stray introducer keyword.
fn strip_item(line: &str) -> Option<String> {
    let mut item = line;
    let mut rounds = 0;
    while item.starts_with('-') && rounds < MAX_DASH_STRIP {
        item = item[1..].trim();
        rounds += 1;
    }
    if item.is_empty() || item == PAYLOAD_KEY {
        return None;
    }
    Some(item.to_string())
}
