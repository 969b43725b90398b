// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Parsing of location-history exports into day-grouped track points.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::prim::{self, TrackPoint};

/// Top-level shape of a location-history export. Only the timeline paths are
/// of interest; everything else in the document is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
  #[serde(default)]
  semantic_segments: Vec<Segment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Segment {
  #[serde(default)]
  timeline_path: Vec<PathRecord>,
}

/// One raw record of a timeline path. Fields are optional so that a record
/// missing either one is skipped rather than failing the whole document.
#[derive(Deserialize)]
struct PathRecord {
  point: Option<String>,
  time: Option<String>,
}

/// Parses a location-history document into track points grouped by the
/// calendar date of each point's timestamp.
///
/// Records that fail to produce both a valid coordinate pair and a valid
/// timestamp are skipped; within a day, points keep their order of
/// appearance in the document.
pub fn parse(document: &str) -> Result<BTreeMap<NaiveDate, Vec<TrackPoint>>, String> {
  let document = serde_json::from_str::<Document>(document)
    .map_err(|e| format!("Failed to parse location history ({e})."))?;

  let mut days: BTreeMap<NaiveDate, Vec<TrackPoint>> = BTreeMap::new();

  for segment in document.semantic_segments {
    for record in segment.timeline_path {
      let Some((day, point)) = parse_record(&record) else {
        continue;
      };
      days.entry(day).or_default().push(point);
    }
  }

  Ok(days)
}

/// Converts one raw record into a day key and a track point, or `None` if
/// any part of it is malformed.
fn parse_record(record: &PathRecord) -> Option<(NaiveDate, TrackPoint)> {
  let (Some(point), Some(time)) = (record.point.as_deref(), record.time.as_deref()) else {
    log::debug!("Skipping record with missing point or time.");
    return None;
  };

  let Some((lat, lon)) = parse_coordinates(point) else {
    log::debug!("Skipping record with malformed coordinates `{point}`.");
    return None;
  };

  let instant = match prim::parse_rfc3339(time) {
    Ok(instant) => instant,
    Err(e) => {
      log::debug!("Skipping record: {e}");
      return None;
    }
  };

  let Some(track_point) = TrackPoint::new(lat, lon, time.to_string()) else {
    log::debug!("Skipping record with out-of-range coordinates `{point}`.");
    return None;
  };

  Some((instant.date_naive(), track_point))
}

/// Parses a `"<lat>°, <lon>°"` coordinate string. Degree glyphs are
/// optional.
fn parse_coordinates(point: &str) -> Option<(f64, f64)> {
  let cleaned = point.replace('\u{b0}', "");
  let (lat, lon) = cleaned.split_once(',')?;

  Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}
