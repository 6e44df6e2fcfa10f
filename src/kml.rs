//! Incremental KML document assembly.
//!
//! Two documents are built side by side: `points` gets one Placemark per
//! photo, `route` gets a single styled LineString whose coordinate list
//! grows as photos are discovered. Both are written incrementally, so
//! memory stays flat regardless of how many photos a scan finds.

use anyhow::{Context, Result};
use quick_xml::escape::escape;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::Config;
use crate::exif::GeoPhoto;

/// Builder for the two output documents.
///
/// [`KmlWriter::create`] opens both sinks and writes their headers,
/// [`KmlWriter::append`] adds one photo to each, and [`KmlWriter::close`]
/// writes the footers and flushes. Dropping the writer without closing it
/// flushes whatever was appended but leaves the documents unterminated.
pub struct KmlWriter {
    points: BufWriter<File>,
    route: BufWriter<File>,
    appended: usize,
}

impl KmlWriter {
    /// Open both documents and write their headers.
    ///
    /// The headers carry the document name, a human-readable generation
    /// date, and (for the route document) the line style and the opening
    /// LineString boilerplate.
    pub fn create(points_path: &Path, route_path: &Path, config: &Config) -> Result<Self> {
        let points_file = File::create(points_path)
            .with_context(|| format!("Failed to create {}", points_path.display()))?;
        let route_file = File::create(route_path)
            .with_context(|| format!("Failed to create {}", route_path.display()))?;
        let mut points = BufWriter::new(points_file);
        let mut route = BufWriter::new(route_file);

        let date = chrono::Local::now().format("%a %-d %b %Y");

        write!(
            points,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Folder>
  <name>points</name>
  <description>Generated on {date} by photo-mapper</description>
  <open>1</open>
"#
        )
        .context("Failed to write points header")?;

        write!(
            route,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Folder>
  <name>route</name>
  <description>Generated on {date} by photo-mapper</description>
  <open>1</open>
  <Style id="linestyle">
    <LineStyle>
      <color>{color}</color>
      <width>{width}</width>
    </LineStyle>
  </Style>
  <Placemark>
    <name>Route</name>
    <styleUrl>#linestyle</styleUrl>
    <LineString>
      <extrude>1</extrude>
      <tessellate>1</tessellate>
      <coordinates>
"#,
            color = config.route_style.line_color,
            width = config.route_style.line_width,
        )
        .context("Failed to write route header")?;

        Ok(Self {
            points,
            route,
            appended: 0,
        })
    }

    /// Append one photo to both documents.
    ///
    /// Call order becomes the route's polyline order. The route coordinate
    /// always uses altitude 0 so the line stays clamped to ground level;
    /// the placemark keeps the photo's true altitude.
    pub fn append(&mut self, photo: &GeoPhoto) -> Result<()> {
        writeln!(
            self.points,
            "<Placemark><name>{name}</name><Point><coordinates>{lon},{lat},{alt}</coordinates></Point></Placemark>",
            name = escape(photo.display_name.as_str()),
            lon = photo.longitude,
            lat = photo.latitude,
            alt = photo.altitude,
        )
        .context("Failed to write placemark")?;

        writeln!(self.route, "{},{},0 ", photo.longitude, photo.latitude)
            .context("Failed to write route coordinate")?;

        self.appended += 1;
        Ok(())
    }

    /// Number of photos appended so far.
    pub fn appended(&self) -> usize {
        self.appended
    }

    /// Write both footers, flush, and close the documents.
    ///
    /// Valid to call after zero appends: the result is a pair of
    /// well-formed documents with no placemarks and an empty route line.
    pub fn close(mut self) -> Result<()> {
        write!(
            self.points,
            "</Folder>\n</kml>\n"
        )
        .context("Failed to write points footer")?;

        write!(
            self.route,
            "</coordinates>\n    </LineString>\n  </Placemark>\n</Folder>\n</kml>\n"
        )
        .context("Failed to write route footer")?;

        self.points.flush().context("Failed to flush points document")?;
        self.route.flush().context("Failed to flush route document")?;
        Ok(())
    }
}
