//! # photo-mapper
//!
//! Build a chronological map of photographed destinations from a folder
//! (and sub-folders) of digital photos. The scan produces two KML
//! documents from embedded EXIF GPS metadata alone:
//!
//! 1. `points.kml` — a named placemark for every photo with GPS coords
//! 2. `route.kml` — a single line joining those photos in discovery order
//!
//! Photos are visited depth-first in lexicographic name order, so the
//! route traces the tree deterministically. Files without metadata,
//! without GPS coordinates, or stamped with a known placeholder fix are
//! skipped; both documents are written incrementally as photos are found.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photo_mapper::config::Config;
//! use photo_mapper::kml::KmlWriter;
//! use photo_mapper::pipeline::scan;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!
//!     let mut writer = KmlWriter::create(
//!         Path::new("points.kml"),
//!         Path::new("route.kml"),
//!         &config,
//!     )?;
//!     let stats = scan(Path::new("./photos"), &config, &mut writer)?;
//!     writer.close()?;
//!
//!     println!("Mapped {} of {} candidates", stats.mapped, stats.candidates);
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! For more control, the extractor can be called per file:
//!
//! ```rust,no_run
//! use photo_mapper::config::Config;
//! use photo_mapper::exif::{extract, Extraction};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     match extract(Path::new("photo.jpg"), &config)? {
//!         Extraction::Geo(photo) => {
//!             println!("{} at {},{}", photo.display_name, photo.longitude, photo.latitude);
//!         }
//!         Extraction::Skipped(reason) => println!("skipped: {reason:?}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] — scan configuration (ignore list, extensions, placeholder fixes)
//! - [`exif`] — EXIF GPS extraction
//! - [`kml`] — incremental assembly of the two output documents
//! - [`pipeline`] — directory traversal and the scan loop

pub mod config;
pub mod exif;
pub mod kml;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testutil;
