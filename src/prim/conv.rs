// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Conversions between decimal degrees, DMS notation and date & time strings.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::config;

/// Decomposes decimal degrees into degrees, minutes and seconds.
///
/// For negative input, exactly one component carries the sign: degrees if
/// non-zero, else minutes if non-zero, else seconds. Hemisphere letters are
/// NOT derived from the sign (see `format_position`).
pub fn deg_to_dms(decimal_degrees: f64) -> (i32, i32, f64) {
  let total_seconds = decimal_degrees.abs() * 3600.0;

  let minutes_total = total_seconds.div_euclid(60.0);
  let mut seconds = total_seconds.rem_euclid(60.0);

  #[allow(clippy::cast_possible_truncation)]
  let mut degrees = minutes_total.div_euclid(60.0) as i32;
  #[allow(clippy::cast_possible_truncation)]
  let mut minutes = minutes_total.rem_euclid(60.0) as i32;

  if decimal_degrees < 0.0 {
    if degrees > 0 {
      degrees = -degrees;
    } else if minutes > 0 {
      minutes = -minutes;
    } else {
      seconds = -seconds;
    }
  }

  (degrees, minutes, seconds)
}

/// Converts degrees, minutes and seconds back to decimal degrees.
pub fn dms_to_deg(deg: f64, min: f64, sec: f64) -> f64 {
  deg + (min / 60.0) + (sec / 3600.0)
}

/// Renders a DMS triple as `D°M'S.SSSSSS"`.
pub fn format_dms(degrees: i32, minutes: i32, seconds: f64) -> String {
  format!("{degrees}\u{b0}{minutes}'{seconds:.6}\"")
}

/// Renders a latitude/longitude pair as `<lat dms> N <lon dms> E`.
///
/// The hemisphere letters are fixed; southern and western coordinates are
/// expressed through a negative DMS component instead.
pub fn format_position(lat: f64, lon: f64) -> String {
  let (lat_deg, lat_min, lat_sec) = deg_to_dms(lat);
  let (lon_deg, lon_min, lon_sec) = deg_to_dms(lon);

  format!(
    "{} N {} E",
    format_dms(lat_deg, lat_min, lat_sec),
    format_dms(lon_deg, lon_min, lon_sec)
  )
}

/// Parses an RFC3339 date & time string, as found in location-history
/// exports (e.g. `2024-01-15T10:00:00.000Z`).
pub fn parse_rfc3339(date_time: &str) -> Result<DateTime<FixedOffset>, String> {
  DateTime::parse_from_rfc3339(date_time)
    .map_err(|e| format!("Unable to parse date & time `{date_time}` ({e})."))
}

/// Parses `ExifTool`'s `YYYY:MM:DD HH:MM:SS` date & time format.
pub fn parse_exif_date_time(date_time: &str) -> Result<NaiveDateTime, String> {
  NaiveDateTime::parse_from_str(date_time, config::EXIF_DATETIME_FMT)
    .map_err(|e| format!("Unable to parse date & time `{date_time}` ({e})."))
}

#[cfg(test)]
mod test_deg_to_dms {
  use super::*;

  #[test]
  fn decomposes_zero_without_negative_components() {
    assert_eq!(deg_to_dms(0.0), (0, 0, 0.0));
  }

  #[test]
  fn decomposes_positive_degrees() {
    let (deg, min, sec) = deg_to_dms(49.5);

    assert_eq!(deg, 49);
    assert_eq!(min, 30);
    assert!(sec.abs() < 1e-6);
  }

  #[test]
  fn negates_degrees_when_non_zero() {
    assert_eq!(deg_to_dms(-18.125), (-18, 7, 30.0));
  }

  #[test]
  fn negates_minutes_when_degrees_zero() {
    let (deg, min, sec) = deg_to_dms(-0.5);

    assert_eq!(deg, 0);
    assert_eq!(min, -30);
    assert!(sec.abs() < 1e-6);
  }

  #[test]
  fn negates_seconds_when_degrees_and_minutes_zero() {
    let (deg, min, sec) = deg_to_dms(-0.001);

    assert_eq!(deg, 0);
    assert_eq!(min, 0);
    assert!((sec + 3.6).abs() < 1e-9);
  }

  #[test]
  fn round_trips_within_tolerance() {
    for dd in [
      0.0, 0.001, -0.001, 0.5, -0.5, 18.1, 18.125, -18.125, 49.5, -122.3328, 179.999,
    ] {
      let (deg, min, sec) = deg_to_dms(dd);

      let sign = if deg < 0 || min < 0 || sec < 0.0 { -1.0 } else { 1.0 };
      let rebuilt = sign * dms_to_deg(f64::from(deg).abs(), f64::from(min).abs(), sec.abs());

      assert!(
        (rebuilt - dd).abs() < 1e-9,
        "{dd} -> ({deg}, {min}, {sec}) -> {rebuilt}"
      );
    }
  }
}

#[cfg(test)]
mod test_format_dms {
  use super::*;

  #[test]
  fn renders_six_decimal_seconds() {
    assert_eq!(format_dms(-18, 7, 30.0), "-18\u{b0}7'30.000000\"");
  }
}

#[cfg(test)]
mod test_format_position {
  use super::*;

  #[test]
  fn letters_are_fixed_regardless_of_sign() {
    assert_eq!(
      format_position(-18.125, 18.1),
      "-18\u{b0}7'30.000000\" N 18\u{b0}6'0.000000\" E"
    );
  }

  #[test]
  fn renders_whole_degrees() {
    assert_eq!(
      format_position(49.5, 18.1),
      "49\u{b0}30'0.000000\" N 18\u{b0}6'0.000000\" E"
    );
  }
}
