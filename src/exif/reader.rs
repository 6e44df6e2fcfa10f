use anyhow::{Context, Result, bail};
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::config::Config;

/// Prefix of a JPEG APP1 segment that carries Exif data.
const EXIF_HEADER: &[u8] = b"Exif\0\0";

// EXIF coordinates are up to three rationals: degrees, minutes, seconds.
const DMS_DIVISORS: [f64; 3] = [1.0, 60.0, 3600.0];

/// A photo with a usable GPS position.
///
/// Only ever constructed for a file that has an allowed extension, an EXIF
/// block, both GPS coordinates, and a latitude that is not one of the
/// configured placeholder fixes.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPhoto {
    /// The file's base name, used as the placemark label.
    pub display_name: String,
    /// Decimal degrees, negative west of the prime meridian.
    pub longitude: f64,
    /// Decimal degrees, negative south of the equator.
    pub latitude: f64,
    /// Meters above sea level; 0.0 when the metadata omits it.
    pub altitude: f64,
}

/// Why a candidate file was excluded from the output documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file carries no Exif segment at all.
    NoMetadata,
    /// EXIF is present but has no GPS coordinates.
    NoGps,
    /// The latitude matches a configured placeholder fix.
    InvalidFix,
    /// The file ended mid-read, typically a partially copied or uploaded
    /// photo. The only skip that is logged.
    Truncated,
}

/// Outcome of metadata extraction for one candidate file.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Geo(GeoPhoto),
    Skipped(SkipReason),
}

/// Raw Exif payload lookup result for one JPEG file.
enum RawExif {
    Found(Vec<u8>),
    Absent,
    Truncated,
}

/// Read the GPS position embedded in the photo at `path`.
///
/// Returns a [`GeoPhoto`] on success and a [`SkipReason`] for the
/// recoverable exclusions. A truncated file (unexpected end of data) is
/// reported and skipped; any other read or parse failure is an error.
pub fn extract(path: &Path, config: &Config) -> Result<Extraction> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let tiff = match find_exif_segment(&mut reader)
        .with_context(|| format!("Failed to read {}", path.display()))?
    {
        RawExif::Found(data) => data,
        RawExif::Absent => return Ok(Extraction::Skipped(SkipReason::NoMetadata)),
        RawExif::Truncated => {
            log::warn!("Reached end of data in {} - skipped", path.display());
            return Ok(Extraction::Skipped(SkipReason::Truncated));
        }
    };

    let exif = Reader::new()
        .read_raw(tiff)
        .with_context(|| format!("Failed to parse metadata from {}", path.display()))?;

    let Some(latitude) = gps_coord(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S') else {
        return Ok(Extraction::Skipped(SkipReason::NoGps));
    };
    let Some(longitude) = gps_coord(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W') else {
        return Ok(Extraction::Skipped(SkipReason::NoGps));
    };

    if config.is_invalid_latitude(latitude) {
        return Ok(Extraction::Skipped(SkipReason::InvalidFix));
    }

    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Extraction::Geo(GeoPhoto {
        display_name,
        longitude,
        latitude,
        altitude: gps_altitude(&exif),
    }))
}

/// Scan a JPEG's segments for the Exif APP1 payload.
///
/// Running out of data mid-scan yields [`RawExif::Truncated`]; reaching the
/// image data or the end marker without an Exif segment yields
/// [`RawExif::Absent`]. Anything that is not a well-formed JPEG segment
/// stream is an error.
fn find_exif_segment<R: Read + Seek>(reader: &mut R) -> Result<RawExif> {
    let mut marker = [0u8; 2];

    match reader.read_exact(&mut marker) {
        Ok(()) => {}
        Err(e) => return eof_or_fail(e),
    }
    if marker != [0xFF, 0xD8] {
        bail!("not a JPEG file");
    }

    loop {
        match reader.read_exact(&mut marker) {
            Ok(()) => {}
            Err(e) => return eof_or_fail(e),
        }
        if marker[0] != 0xFF {
            bail!("invalid JPEG segment structure");
        }

        match marker[1] {
            // Image data or end of image: no Exif segment ahead.
            0xDA | 0xD9 => return Ok(RawExif::Absent),
            // Markers without a length field.
            0xD8 | 0x01 | 0xD0..=0xD7 => {}
            kind => {
                let mut len_bytes = [0u8; 2];
                match reader.read_exact(&mut len_bytes) {
                    Ok(()) => {}
                    Err(e) => return eof_or_fail(e),
                }
                let Some(data_len) = usize::from(u16::from_be_bytes(len_bytes)).checked_sub(2)
                else {
                    bail!("invalid JPEG segment length");
                };

                if kind == 0xE1 {
                    // APP1 holds either Exif or XMP; check the payload prefix.
                    let mut data = vec![0u8; data_len];
                    match reader.read_exact(&mut data) {
                        Ok(()) => {}
                        Err(e) => return eof_or_fail(e),
                    }
                    if let Some(tiff) = data.strip_prefix(EXIF_HEADER) {
                        return Ok(RawExif::Found(tiff.to_vec()));
                    }
                } else {
                    reader.seek(SeekFrom::Current(data_len as i64))?;
                }
            }
        }
    }
}

/// Map a short read to the truncated-file outcome; other I/O errors stay
/// fatal.
fn eof_or_fail(e: io::Error) -> Result<RawExif> {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Ok(RawExif::Truncated)
    } else {
        Err(e.into())
    }
}

/// Read one signed GPS coordinate from its coordinate/reference tag pair.
///
/// Both fields must be present; a coordinate without a hemisphere reference
/// is treated as no GPS.
fn gps_coord(exif: &Exif, coord_tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let coord = exif.get_field(coord_tag, In::PRIMARY)?;
    let reference = exif.get_field(ref_tag, In::PRIMARY)?;
    let degrees = dms_to_decimal(&coord.value)?;
    if ref_is(reference, negative_ref) {
        Some(-degrees)
    } else {
        Some(degrees)
    }
}

/// Convert degree/minute/second rationals to decimal degrees.
fn dms_to_decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Rational(parts) if !parts.is_empty() => Some(
            parts
                .iter()
                .zip(DMS_DIVISORS.iter())
                .map(|(r, d)| r.to_f64() / d)
                .sum(),
        ),
        _ => None,
    }
}

/// Altitude in meters, negated below sea level, 0.0 when absent.
fn gps_altitude(exif: &Exif) -> f64 {
    let Some(field) = exif.get_field(Tag::GPSAltitude, In::PRIMARY) else {
        return 0.0;
    };
    let meters = match &field.value {
        Value::Rational(v) if !v.is_empty() && v[0].denom != 0 => v[0].to_f64(),
        _ => return 0.0,
    };
    // GPSAltitudeRef 1 means below sea level
    let below = exif
        .get_field(Tag::GPSAltitudeRef, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        == Some(1);
    if below { -meters } else { meters }
}

/// Check a hemisphere reference field against the given letter.
fn ref_is(field: &exif::Field, letter: u8) -> bool {
    match &field.value {
        Value::Ascii(items) => items.first().is_some_and(|s| s.first() == Some(&letter)),
        _ => false,
    }
}
