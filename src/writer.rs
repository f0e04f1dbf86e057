//! Output document rendering and atomic file replacement.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::aggregator::RuleSet;
use crate::error::{Error, Result};

/// Everything needed to render one output document.
#[derive(Debug)]
pub struct OutputDocument<'a> {
    /// Source identifier; also the output file stem
    pub name: &'a str,
    /// Author identity for the header
    pub author: &'a str,
    /// Repository identity for the header
    pub repo: &'a str,
    /// Generation timestamp
    pub generated: SystemTime,
    /// The merged rules
    pub rules: &'a RuleSet,
}

impl OutputDocument<'_> {
    /// Render the document: identifying header, one count line per
    /// non-empty type bucket in fixed order, a total line, a blank
    /// separator, then the sorted rule body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# NAME: {}\n", self.name));
        out.push_str(&format!("# AUTHOR: {}\n", self.author));
        out.push_str(&format!("# REPO: {}\n", self.repo));
        out.push_str(&format!("# UPDATED: {}\n", format_timestamp(self.generated)));
        for (rule_type, count) in self.rules.type_counts() {
            out.push_str(&format!("# {}: {}\n", rule_type, count));
        }
        out.push_str(&format!("# TOTAL: {}\n", self.rules.len()));
        out.push('\n');
        for line in self.rules.sorted_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// Replace the file at `path` with `content` in full.
///
/// Written to a sibling temp file first and renamed into place, so readers
/// never observe a partial document.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let write = || -> std::io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp_path, path)
    };
    write().map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Delete `.list` files in `dir` whose stem is not in `expected`, so a
/// source that disappeared does not leave a stale document behind.
///
/// Returns the number of files removed. A missing output directory is not
/// an error; it simply has nothing stale in it.
pub fn clean_stale(dir: &Path, expected: &[String]) -> Result<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(0),
    };

    let mut removed = 0;
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let is_list = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("list"))
            .unwrap_or(false);
        if !is_list {
            continue;
        }
        let stem = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => continue,
        };
        if !expected.iter().any(|name| *name == stem) {
            match fs::remove_file(&path) {
                Ok(()) => {
                    log::info!("removed stale output {}", path.display());
                    removed += 1;
                }
                Err(e) => log::warn!("could not remove stale output {}: {}", path.display(), e),
            }
        }
    }
    Ok(removed)
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
fn format_timestamp(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (hours, minutes, seconds) = (
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
    );
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
        year, month, day, hours, minutes, seconds
    )
}

/// Gregorian civil date from days since the Unix epoch.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}
