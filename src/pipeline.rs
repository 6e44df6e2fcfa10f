//! Directory traversal and the scan pipeline.
//!
//! [`scan`] walks a tree depth-first in lexicographic name order, filters
//! candidates by extension, extracts GPS metadata, and appends every hit to
//! the output documents in discovery order. Ignore-listed entries are
//! pruned together with their descendants.

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

use crate::config::Config;
use crate::exif::{self, Extraction, SkipReason};
use crate::kml::KmlWriter;

/// Counters accumulated over one scan, reported in the end-of-run summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Directories entered.
    pub directories: usize,
    /// Files with an allowed extension that were handed to extraction.
    pub candidates: usize,
    /// Photos appended to the output documents.
    pub mapped: usize,
    /// Candidates without an Exif segment.
    pub no_metadata: usize,
    /// Candidates with Exif but no GPS coordinates.
    pub no_gps: usize,
    /// Candidates whose latitude matched a placeholder fix.
    pub invalid_fix: usize,
    /// Candidates cut off mid-file.
    pub truncated: usize,
}

impl ScanStats {
    /// Total candidates excluded from the output documents.
    pub fn skipped(&self) -> usize {
        self.no_metadata + self.no_gps + self.invalid_fix + self.truncated
    }
}

/// Walk `root` and append every geotagged photo to `writer`.
///
/// Entries within a directory are visited in lexicographic name order, with
/// directories descended into at their sort position, so repeated runs over
/// an unchanged tree produce identical documents. The root itself is never
/// pruned, even if its name is on the ignore list. Traversal errors and
/// metadata failures beyond the recoverable skip cases are fatal and
/// propagate.
pub fn scan(root: &Path, config: &Config, writer: &mut KmlWriter) -> Result<ScanStats> {
    let mut stats = ScanStats::default();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || e.file_name()
                    .to_str()
                    .map(|name| !config.is_ignored(name))
                    .unwrap_or(true)
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to traverse {}", root.display()))?;

        if entry.file_type().is_dir() {
            log::info!("Scanning {}", entry.path().display());
            stats.directories += 1;
            continue;
        }
        if !entry.file_type().is_file() || !config.is_allowed(entry.path()) {
            continue;
        }

        log::info!("Found candidate {}", entry.path().display());
        stats.candidates += 1;

        match exif::extract(entry.path(), config)? {
            Extraction::Geo(photo) => {
                writer.append(&photo)?;
                stats.mapped += 1;
            }
            Extraction::Skipped(reason) => match reason {
                SkipReason::NoMetadata => stats.no_metadata += 1,
                SkipReason::NoGps => stats.no_gps += 1,
                SkipReason::InvalidFix => stats.invalid_fix += 1,
                SkipReason::Truncated => stats.truncated += 1,
            },
        }
    }

    Ok(stats)
}
