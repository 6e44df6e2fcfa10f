//! EXIF GPS extraction.
//!
//! One entry point, [`extract`], which reads a candidate photo's embedded
//! metadata and either yields a [`GeoPhoto`] ready for the output documents
//! or a typed [`SkipReason`] explaining why the file was left out. Failures
//! beyond the recoverable skip cases propagate to the caller.

mod reader;

pub use reader::{Extraction, GeoPhoto, SkipReason, extract};
