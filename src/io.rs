// Copyright 2025 Seth Pendergrass. See LICENSE.

//! `ExifTool` command/result wrapper.
//!
//! All interaction with the external metadata tool goes through here: a
//! blocking invocation returning stdout, with a non-zero exit surfaced as an
//! error the caller treats as a per-artifact failure.

use std::{ffi::OsStr, path::Path, process::Command};

use chrono::NaiveDateTime;
use regex::Regex;

use crate::prim;

/// Runs `exiftool` with `args`, returning stdout. Spawn failure or a
/// non-zero exit status is an error.
pub fn run_exiftool<I, S>(args: I) -> Result<Vec<u8>, String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let mut cmd = Command::new("exiftool");
  cmd.args(args);

  let output = cmd.output().map_err(|e| {
    format!(
      "ExifTool failed to run ({e}).\nArgs:\n{}",
      cmd
        .get_args()
        .collect::<Vec<_>>()
        .join(OsStr::new(" "))
        .display()
    )
  })?;

  log::trace!(
    "exiftool output:\n{}",
    String::from_utf8_lossy(&output.stdout)
  );

  if !output.status.success() {
    return Err(format!(
      "ExifTool did not run successfully.\nArgs:\n{}\nstderr:\n{}",
      cmd
        .get_args()
        .collect::<Vec<_>>()
        .join(OsStr::new(" "))
        .display(),
      String::from_utf8_lossy(&output.stderr)
    ));
  }

  Ok(output.stdout)
}

/// Reads the capture timestamp from `path` via `-DateTimeOriginal`.
///
/// Any failure along the way (tool error, no such tag, unparsable value)
/// resolves to `None`; the caller decides how loudly to skip.
pub fn read_date_time_original(path: &Path) -> Option<NaiveDateTime> {
  let stdout = match run_exiftool([OsStr::new("-DateTimeOriginal"), path.as_os_str()]) {
    Ok(stdout) => stdout,
    Err(e) => {
      log::debug!("{}: {e}", path.display());
      return None;
    }
  };

  let stdout = String::from_utf8_lossy(&stdout);
  let value = parse_tag_value(&stdout)?;

  match prim::parse_exif_date_time(value) {
    Ok(date_time) => Some(date_time),
    Err(e) => {
      log::debug!("{}: {e}", path.display());
      None
    }
  }
}

/// Reads the numeric GPS position from `path` via `-n -GPSPosition`.
pub fn read_gps_position(path: &Path) -> Option<(f64, f64)> {
  let stdout = match run_exiftool([
    OsStr::new("-n"),
    OsStr::new("-GPSPosition"),
    path.as_os_str(),
  ]) {
    Ok(stdout) => stdout,
    Err(e) => {
      log::debug!("{}: {e}", path.display());
      return None;
    }
  };

  let stdout = String::from_utf8_lossy(&stdout);
  let value = parse_tag_value(&stdout)?;

  let Some(position) = parse_position_value(value) else {
    log::warn!("{}: Unable to parse GPSPosition `{value}`.", path.display());
    return None;
  };

  Some(position)
}

/// Writes GPS tags into `target` from the track log at `track`, rewriting
/// the file in place. Returns `ExifTool`'s summary line.
pub fn geotag(track: &Path, target: &Path) -> Result<String, String> {
  let stdout = run_exiftool([
    OsStr::new("-overwrite_original"),
    OsStr::new("-geotag"),
    track.as_os_str(),
    target.as_os_str(),
  ])?;

  Ok(String::from_utf8_lossy(&stdout).trim().to_string())
}

/// Extracts the value from a `Tag Name : value` output line.
///
/// The split is on the FIRST colon of the whole response: tag names contain
/// no colons, while date values do.
fn parse_tag_value(stdout: &str) -> Option<&str> {
  let (_, value) = stdout.split_once(':')?;
  let value = value.trim();

  if value.is_empty() { None } else { Some(value) }
}

/// Parses a numeric `GPSPosition` value (`<lat> <lon>`) into floats.
fn parse_position_value(value: &str) -> Option<(f64, f64)> {
  let re = Regex::new(r"^(-?\d+\.?\d*)\s+(-?\d+\.?\d*)$").unwrap();

  if let Some(caps) = re.captures(value) {
    let lat = caps.get(1)?.as_str().parse().ok()?;
    let lon = caps.get(2)?.as_str().parse().ok()?;
    return Some((lat, lon));
  }

  parse_position_dms(value)
}

/// Fallback for the human-readable DMS form `ExifTool` prints when numeric
/// output is not honored for a composite tag.
fn parse_position_dms(value: &str) -> Option<(f64, f64)> {
  let re = Regex::new(
    r#"^(\d+) deg (\d+)' (\d+\.?\d*)" ([NnSs]), (\d+) deg (\d+)' (\d+\.?\d*)" ([WwEe])$"#,
  )
  .unwrap();
  let caps = re.captures(value)?;

  let component = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<f64>().ok());

  let mut lat = prim::dms_to_deg(component(1)?, component(2)?, component(3)?);
  if caps.get(4)?.as_str().eq_ignore_ascii_case("S") {
    lat = -lat;
  }

  let mut lon = prim::dms_to_deg(component(5)?, component(6)?, component(7)?);
  if caps.get(8)?.as_str().eq_ignore_ascii_case("W") {
    lon = -lon;
  }

  Some((lat, lon))
}
