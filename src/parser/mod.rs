//! Format parsers for fetched and local rule content.

mod asn;
mod payload;
mod plain;

pub use asn::{parse_asn, NO_RESOLVE};
pub use payload::{has_payload_introducer, parse_payload, PAYLOAD_KEY};
pub use plain::{parse_plain, COMMENT_MARKERS};

/// Sub-format of a source's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// One rule per line, comment lines dropped
    Plain,
    /// Dash-list document under a `payload:` introducer
    Payload,
    /// Comment-annotated ASN list; `no-resolve` is enforced on every rule
    Asn,
}

/// Select the parse format for one source's content.
///
/// ASN sources are explicitly marked and always win. Otherwise the URL
/// suffix is the hint, with a content sniff as fallback: a document that
/// carries a payload introducer line is parsed as a payload document even
/// without the `.yaml` extension.
pub fn select_format(url: &str, content: &str, asn_source: bool) -> SourceFormat {
    if asn_source {
        return SourceFormat::Asn;
    }
    let lower = url.to_lowercase();
    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        return SourceFormat::Payload;
    }
    if has_payload_introducer(content) {
        return SourceFormat::Payload;
    }
    SourceFormat::Plain
}

/// Parse raw content into rule tokens using the given format.
pub fn parse(content: &str, format: SourceFormat) -> Vec<String> {
    match format {
        SourceFormat::Plain => parse_plain(content),
        SourceFormat::Payload => parse_payload(content),
        SourceFormat::Asn => parse_asn(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_url_suffix() {
        assert_eq!(
            select_format("https://a.example/rules.yaml", "", false),
            SourceFormat::Payload
        );
        assert_eq!(
            select_format("https://a.example/rules.YML", "", false),
            SourceFormat::Payload
        );
        assert_eq!(
            select_format("https://a.example/rules.list", "a.com\nb.com", false),
            SourceFormat::Plain
        );
    }

    #[test]
    fn test_format_sniffs_payload_introducer() {
        let content = "# header\npayload:\n  - DOMAIN,a.com\n";
        assert_eq!(
            select_format("https://a.example/rules.txt", content, false),
            SourceFormat::Payload
        );
    }

    #[test]
    fn test_asn_mark_wins() {
        assert_eq!(
            select_format("https://a.example/asn.yaml", "payload:", true),
            SourceFormat::Asn
        );
    }
}
