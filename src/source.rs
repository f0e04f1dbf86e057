//! Source descriptors: the per-output lists of literal rules and fetch URLs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One entry of a source descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEntry {
    /// A rule given inline, preserved verbatim
    LiteralRule(String),
    /// A URL whose content contributes rules
    FetchTarget(String),
}

/// A parsed source descriptor: identifier plus ordered entries.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    /// Identifier derived from the descriptor's file stem; also names the output
    pub name: String,
    /// Literal rules and fetch targets, in file order
    pub entries: Vec<SourceEntry>,
}

impl SourceDescriptor {
    /// Parse descriptor text. Lines are trimmed; empty lines and `#`
    /// comments are dropped. `http://`/`https://` lines become fetch
    /// targets, every other surviving line a literal rule — no validity
    /// filtering here, so no inline rule is silently lost.
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                if line.starts_with("http://") || line.starts_with("https://") {
                    SourceEntry::FetchTarget(line.to_string())
                } else {
                    SourceEntry::LiteralRule(line.to_string())
                }
            })
            .collect();
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Load a descriptor from a file, naming it after the file stem.
    pub fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "source".to_string());
        let text = fs::read_to_string(path).map_err(|source| Error::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(name, &text))
    }

    /// The fetch targets, in order.
    pub fn urls(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                SourceEntry::FetchTarget(url) => Some(url.as_str()),
                SourceEntry::LiteralRule(_) => None,
            })
            .collect()
    }

    /// The literal rules, in order.
    pub fn literals(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                SourceEntry::LiteralRule(rule) => Some(rule.as_str()),
                SourceEntry::FetchTarget(_) => None,
            })
            .collect()
    }
}

/// Discover descriptor files (`*.txt`) in a directory, sorted by name.
///
/// A missing or unreadable source directory is the one fatal condition of
/// a run.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::Config(format!("source directory {}: {}", dir.display(), e))
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("txt"))
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_splits_urls_and_literals() {
        let text = "# ads sources\nhttps://example.com/reject.txt\nDOMAIN-SUFFIX,ads.example\nads\n\nhttp://mirror.example/list.yaml\n";
        let desc = SourceDescriptor::parse("reject", text);
        assert_eq!(
            desc.urls(),
            vec![
                "https://example.com/reject.txt",
                "http://mirror.example/list.yaml"
            ]
        );
        assert_eq!(desc.literals(), vec!["DOMAIN-SUFFIX,ads.example", "ads"]);
    }

    #[test]
    fn test_parse_keeps_odd_literals() {
        // Over-filtering here has silently dropped valid rules before;
        // everything non-blank and non-comment survives.
        let desc = SourceDescriptor::parse("s", "no_dots_or_colons\n");
        assert_eq!(desc.literals(), vec!["no_dots_or_colons"]);
    }

    #[test]
    fn test_load_names_after_file_stem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telegram.txt");
        fs::write(&path, "https://example.com/telegram.yaml\n").unwrap();

        let desc = SourceDescriptor::load(&path).unwrap();
        assert_eq!(desc.name, "telegram");
        assert_eq!(desc.entries.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_source_read_error() {
        let err = SourceDescriptor::load(Path::new("/nonexistent/x.txt")).unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();

        let paths = discover(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_discover_missing_dir_is_fatal() {
        assert!(discover(Path::new("/nonexistent/sources")).is_err());
    }
}
