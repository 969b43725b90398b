// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Day-partitioned track file layout and GPX serialization.

use std::{
  fs,
  path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};
use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::prim::TrackPoint;

/// Derives the canonical track file path for a day:
/// `root/YYYY/MM/DD.<ext>`, zero-padded.
pub fn path_for(root: &Path, day: NaiveDate, ext: &str) -> PathBuf {
  root
    .join(format!("{:04}", day.year()))
    .join(format!("{:02}", day.month()))
    .join(format!("{:02}.{ext}", day.day()))
}

/// Creates the directory prefix for a track file. Idempotent.
pub fn ensure_dirs(path: &Path) -> Result<(), String> {
  let Some(parent) = path.parent() else {
    return Ok(());
  };

  fs::create_dir_all(parent)
    .map_err(|e| format!("{}: Failed to create track directory ({e}).", parent.display()))
}

/// Serializes a day's points to `path` as a pretty-printed GPX document,
/// overwriting any existing file. The document is built fully in memory and
/// written in a single call, so no track file is ever partially written.
pub fn write_track(path: &Path, points: &[TrackPoint], creator: &str) -> Result<(), String> {
  let document = render_track(points, creator)
    .map_err(|e| format!("{}: Failed to serialize track ({e}).", path.display()))?;

  fs::write(path, document)
    .map_err(|e| format!("{}: Failed to write track file ({e}).", path.display()))
}

/// Renders the GPX document: one track, one segment, one `trkpt` per point
/// with decimal-degree attributes and the source timestamp as text.
fn render_track(points: &[TrackPoint], creator: &str) -> Result<Vec<u8>, String> {
  let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

  emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

  let mut gpx = BytesStart::new("gpx");
  gpx.push_attribute(("version", "1.1"));
  gpx.push_attribute(("creator", creator));
  emit(&mut writer, Event::Start(gpx))?;
  emit(&mut writer, Event::Start(BytesStart::new("trk")))?;
  emit(&mut writer, Event::Start(BytesStart::new("trkseg")))?;

  for point in points {
    let mut trkpt = BytesStart::new("trkpt");
    trkpt.push_attribute(("lat", point.lat.to_string().as_str()));
    trkpt.push_attribute(("lon", point.lon.to_string().as_str()));
    emit(&mut writer, Event::Start(trkpt))?;

    emit(&mut writer, Event::Start(BytesStart::new("time")))?;
    emit(&mut writer, Event::Text(BytesText::new(&point.time)))?;
    emit(&mut writer, Event::End(BytesEnd::new("time")))?;

    emit(&mut writer, Event::End(BytesEnd::new("trkpt")))?;
  }

  emit(&mut writer, Event::End(BytesEnd::new("trkseg")))?;
  emit(&mut writer, Event::End(BytesEnd::new("trk")))?;
  emit(&mut writer, Event::End(BytesEnd::new("gpx")))?;

  let mut document = writer.into_inner();
  document.push(b'\n');

  Ok(document)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), String> {
  writer.write_event(event).map_err(|e| e.to_string())
}
