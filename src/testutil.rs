//! Test fixtures: synthesized JPEG files with hand-built Exif GPS blocks.
//!
//! The GPS block is a little-endian TIFF whose IFD0 holds a single pointer
//! to a GPS IFD, wrapped in a JPEG APP1 `Exif` segment. Offsets are
//! computed from the fixed layout below.

/// GPS IFD contents for a fixture photo. Coordinates are
/// degree/minute/second rationals as `(numerator, denominator)` pairs;
/// `altitude` is `((numerator, denominator), altitude_ref)`.
pub(crate) struct GpsIfd {
    pub lat: [(u32, u32); 3],
    pub lat_ref: u8,
    pub lon: [(u32, u32); 3],
    pub lon_ref: u8,
    pub altitude: Option<((u32, u32), u8)>,
}

/// A complete JPEG carrying the given GPS data.
pub(crate) fn gps_jpeg(ifd: &GpsIfd) -> Vec<u8> {
    wrap_jpeg(&gps_tiff(ifd))
}

/// Little-endian TIFF with IFD0 pointing at a GPS IFD.
pub(crate) fn gps_tiff(ifd: &GpsIfd) -> Vec<u8> {
    // Header (8) + IFD0 entry count (2) + one entry (12) + next-IFD (4).
    const GPS_IFD_OFFSET: u32 = 26;
    let entries: u16 = if ifd.altitude.is_some() { 6 } else { 4 };
    let data_start = GPS_IFD_OFFSET + 2 + u32::from(entries) * 12 + 4;

    let mut t = Vec::new();
    t.extend(b"II");
    t.extend(42u16.to_le_bytes());
    t.extend(8u32.to_le_bytes());

    // IFD0: a single pointer to the GPS IFD.
    t.extend(1u16.to_le_bytes());
    entry(&mut t, 0x8825, 4, 1, GPS_IFD_OFFSET.to_le_bytes());
    t.extend(0u32.to_le_bytes());

    // GPS IFD. References are inline ASCII, coordinates point past the IFD.
    t.extend(entries.to_le_bytes());
    entry(&mut t, 0x0001, 2, 2, [ifd.lat_ref, 0, 0, 0]);
    entry(&mut t, 0x0002, 5, 3, data_start.to_le_bytes());
    entry(&mut t, 0x0003, 2, 2, [ifd.lon_ref, 0, 0, 0]);
    entry(&mut t, 0x0004, 5, 3, (data_start + 24).to_le_bytes());
    if let Some((_, altitude_ref)) = ifd.altitude {
        entry(&mut t, 0x0005, 1, 1, [altitude_ref, 0, 0, 0]);
        entry(&mut t, 0x0006, 5, 1, (data_start + 48).to_le_bytes());
    }
    t.extend(0u32.to_le_bytes());

    debug_assert_eq!(t.len() as u32, data_start);
    for (num, denom) in ifd.lat.iter().chain(ifd.lon.iter()) {
        t.extend(num.to_le_bytes());
        t.extend(denom.to_le_bytes());
    }
    if let Some(((num, denom), _)) = ifd.altitude {
        t.extend(num.to_le_bytes());
        t.extend(denom.to_le_bytes());
    }
    t
}

/// Little-endian TIFF with an IFD0 but no GPS IFD (ImageWidth only).
pub(crate) fn tiff_without_gps() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend(b"II");
    t.extend(42u16.to_le_bytes());
    t.extend(8u32.to_le_bytes());
    t.extend(1u16.to_le_bytes());
    entry(&mut t, 0x0100, 3, 1, [1, 0, 0, 0]);
    t.extend(0u32.to_le_bytes());
    t
}

/// Wrap a TIFF blob in SOI + APP1 `Exif` segment + EOI.
pub(crate) fn wrap_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut j = vec![0xFF, 0xD8];
    // Segment length counts itself plus the Exif header and payload.
    let segment_len = (2 + EXIF_HEADER.len() + tiff.len()) as u16;
    j.extend([0xFF, 0xE1]);
    j.extend(segment_len.to_be_bytes());
    j.extend(EXIF_HEADER);
    j.extend_from_slice(tiff);
    j.extend([0xFF, 0xD9]);
    j
}

/// A well-formed JPEG with no Exif segment at all.
pub(crate) fn jpeg_without_exif() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

/// A JPEG cut off inside its APP1 segment, as left behind by an
/// interrupted copy: the length field promises far more data than the
/// file holds.
pub(crate) fn truncated_jpeg() -> Vec<u8> {
    let mut j = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x40, 0x00];
    j.extend(EXIF_HEADER);
    j
}

const EXIF_HEADER: &[u8] = b"Exif\0\0";

fn entry(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
    buf.extend(tag.to_le_bytes());
    buf.extend(kind.to_le_bytes());
    buf.extend(count.to_le_bytes());
    buf.extend(value);
}
