// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Track point primitive.

/// A single timestamped coordinate from a location-history export.
///
/// `time` keeps the source document's timestamp text verbatim; it is written
/// back into track files unchanged. Points outside the valid
/// latitude/longitude ranges are rejected at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
  pub lat: f64,
  pub lon: f64,
  pub time: String,
}

impl TrackPoint {
  /// Builds a point, rejecting coordinates outside [-90, 90] / [-180, 180].
  pub fn new(lat: f64, lon: f64, time: String) -> Option<Self> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
      return None;
    }

    Some(Self { lat, lon, time })
  }
}

#[cfg(test)]
mod test_new {
  use super::*;

  #[test]
  fn accepts_in_range_coordinates() {
    let point = TrackPoint::new(49.5, 18.1, "2024-01-15T10:00:00Z".to_string()).unwrap();

    assert_eq!(point.lat, 49.5);
    assert_eq!(point.lon, 18.1);
    assert_eq!(point.time, "2024-01-15T10:00:00Z");
  }

  #[test]
  fn accepts_boundary_coordinates() {
    assert!(TrackPoint::new(-90.0, 180.0, String::new()).is_some());
  }

  #[test]
  fn rejects_out_of_range_latitude() {
    assert!(TrackPoint::new(90.5, 0.0, String::new()).is_none());
  }

  #[test]
  fn rejects_out_of_range_longitude() {
    assert!(TrackPoint::new(0.0, -180.1, String::new()).is_none());
  }
}
