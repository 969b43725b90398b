// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Adapter filling `GPS` fields in ON1 JSON sidecars.

use std::{
  fs,
  path::{Path, PathBuf},
};

use serde_json::Value;

use super::ApplyOutcome;
use crate::{config, io, prim};

/// Inserts DMS-formatted GPS strings into the photo entries of an ON1
/// sidecar, sourcing coordinates from the sibling RAW file's EXIF tags.
///
/// Existing non-null `GPS` values are only overwritten in force mode; null
/// values mark photos whose source data was missing and are never touched.
pub struct JsonSidecarAdapter {
  pub force: bool,
  pub raw_ext: String,
}

impl JsonSidecarAdapter {
  pub fn apply(
    &self,
    artifact: &Path,
    _track: &Path,
    dry_run: bool,
  ) -> Result<ApplyOutcome, String> {
    let sidecar = sidecar_path(artifact);

    let text = fs::read_to_string(&sidecar)
      .map_err(|e| format!("{}: Failed to read sidecar ({e}).", sidecar.display()))?;
    let mut document = serde_json::from_str::<Value>(&text)
      .map_err(|e| format!("{}: Failed to parse sidecar ({e}).", sidecar.display()))?;

    // The RAW position is the same for every photo entry of this sidecar;
    // read it at most once.
    let mut cached: Option<Option<String>> = None;
    let mut coordinate = || {
      cached
        .get_or_insert_with(|| raw_position(&sidecar, &self.raw_ext))
        .clone()
    };

    let changed = annotate_photos(&mut document, &sidecar, self.force, &mut coordinate)?;

    if changed == 0 {
      return Ok(ApplyOutcome::Unchanged);
    }

    if dry_run {
      log::info!(
        "{}: Would update {changed} photo entry(ies).",
        sidecar.display()
      );
      return Ok(ApplyOutcome::DryRun);
    }

    let updated = serde_json::to_vec_pretty(&document)
      .map_err(|e| format!("{}: Failed to serialize sidecar ({e}).", sidecar.display()))?;
    fs::write(&sidecar, updated)
      .map_err(|e| format!("{}: Failed to write sidecar ({e}).", sidecar.display()))?;

    Ok(ApplyOutcome::Tagged)
  }
}

/// Walks the sidecar's `photos` map and applies the GPS policy to each
/// entry. Returns the number of entries changed.
fn annotate_photos(
  document: &mut Value,
  sidecar: &Path,
  force: bool,
  coordinate: &mut dyn FnMut() -> Option<String>,
) -> Result<usize, String> {
  let photos = document
    .get_mut("photos")
    .and_then(Value::as_object_mut)
    .ok_or(format!(
      "{}: Sidecar has no `photos` object.",
      sidecar.display()
    ))?;

  let mut changed = 0;

  for (id, entry) in photos.iter_mut() {
    let Some(entry) = entry.as_object_mut() else {
      log::warn!("{}: Photo `{id}` is not an object. Skipping.", sidecar.display());
      continue;
    };

    match entry.get("GPS") {
      None => {
        let Some(position) = coordinate() else {
          log::info!(
            "{}: Photo `{id}`: no coordinate available. Skipping.",
            sidecar.display()
          );
          continue;
        };

        log::info!("{}: Photo `{id}`: GPS set to `{position}`.", sidecar.display());
        entry.insert("GPS".to_string(), Value::String(position));
        changed += 1;
      }
      Some(Value::Null) => {
        log::warn!(
          "{}: Photo `{id}`: GPS is null (missing source data). Leaving untouched.",
          sidecar.display()
        );
      }
      Some(existing) => {
        if !force {
          log::debug!(
            "{}: Photo `{id}`: GPS already set. Leaving untouched.",
            sidecar.display()
          );
          continue;
        }

        let previous = existing.clone();

        let Some(position) = coordinate() else {
          log::info!(
            "{}: Photo `{id}`: no coordinate available. Skipping.",
            sidecar.display()
          );
          continue;
        };

        log::info!(
          "{}: Photo `{id}`: GPS `{previous}` -> `{position}`.",
          sidecar.display()
        );
        entry.insert("GPS".to_string(), Value::String(position));
        changed += 1;
      }
    }
  }

  Ok(changed)
}

/// Locates the sidecar for an artifact: the artifact itself if it already
/// carries the sidecar extension, else the artifact with its extension
/// swapped.
fn sidecar_path(artifact: &Path) -> PathBuf {
  if artifact
    .extension()
    .is_some_and(|e| e.eq_ignore_ascii_case(config::ON1_EXT))
  {
    artifact.to_path_buf()
  } else {
    artifact.with_extension(config::ON1_EXT)
  }
}

/// The RAW files that may sit next to a sidecar, in probe order.
fn raw_candidates(sidecar: &Path, raw_ext: &str) -> [PathBuf; 2] {
  [
    sidecar.with_extension(raw_ext.to_lowercase()),
    sidecar.with_extension(raw_ext.to_uppercase()),
  ]
}

/// Reads the sibling RAW file's GPS position and renders it as a DMS pair.
fn raw_position(sidecar: &Path, raw_ext: &str) -> Option<String> {
  for raw in raw_candidates(sidecar, raw_ext) {
    if !raw.is_file() {
      continue;
    }

    if let Some((lat, lon)) = io::read_gps_position(&raw) {
      return Some(prim::format_position(lat, lon));
    }
  }

  None
}

#[cfg(test)]
mod test_annotate_photos {
  use serde_json::json;

  use super::*;

  fn fixed_position() -> Option<String> {
    Some(prim::format_position(49.5, 18.1))
  }

  #[test]
  fn inserts_gps_when_absent() {
    let mut document = json!({ "photos": { "abc": { "name": "photo.nef" } } });

    let changed = annotate_photos(
      &mut document,
      Path::new("photo.on1"),
      false,
      &mut fixed_position,
    )
    .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(
      document["photos"]["abc"]["GPS"],
      json!("49\u{b0}30'0.000000\" N 18\u{b0}6'0.000000\" E")
    );
  }

  #[test]
  fn second_application_is_a_no_op() {
    let mut document = json!({ "photos": { "abc": { "name": "photo.nef" } } });

    annotate_photos(&mut document, Path::new("photo.on1"), false, &mut fixed_position).unwrap();
    let first = document["photos"]["abc"]["GPS"].clone();

    let changed = annotate_photos(
      &mut document,
      Path::new("photo.on1"),
      false,
      &mut fixed_position,
    )
    .unwrap();

    assert_eq!(changed, 0);
    assert_eq!(document["photos"]["abc"]["GPS"], first);
  }

  #[test]
  fn existing_gps_untouched_without_force() {
    let mut document = json!({ "photos": { "abc": { "GPS": "somewhere" } } });
    let mut calls = 0;
    let mut coordinate = || {
      calls += 1;
      fixed_position()
    };

    let changed =
      annotate_photos(&mut document, Path::new("photo.on1"), false, &mut coordinate).unwrap();

    assert_eq!(changed, 0);
    assert_eq!(calls, 0);
    assert_eq!(document["photos"]["abc"]["GPS"], json!("somewhere"));
  }

  #[test]
  fn force_recomputes_existing_gps() {
    let mut document = json!({ "photos": { "abc": { "GPS": "somewhere" } } });

    let changed = annotate_photos(
      &mut document,
      Path::new("photo.on1"),
      true,
      &mut fixed_position,
    )
    .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(
      document["photos"]["abc"]["GPS"],
      json!("49\u{b0}30'0.000000\" N 18\u{b0}6'0.000000\" E")
    );
  }

  #[test]
  fn null_gps_is_never_touched() {
    let mut document = json!({ "photos": { "abc": { "GPS": null } } });

    for force in [false, true] {
      let changed = annotate_photos(
        &mut document,
        Path::new("photo.on1"),
        force,
        &mut fixed_position,
      )
      .unwrap();

      assert_eq!(changed, 0);
      assert_eq!(document["photos"]["abc"]["GPS"], Value::Null);
    }
  }

  #[test]
  fn unavailable_coordinate_is_a_no_op() {
    let mut document = json!({ "photos": { "abc": {} } });

    let changed =
      annotate_photos(&mut document, Path::new("photo.on1"), false, &mut || None).unwrap();

    assert_eq!(changed, 0);
    assert!(document["photos"]["abc"].get("GPS").is_none());
  }

  #[test]
  fn errors_without_photos_object() {
    let mut document = json!({ "other": {} });

    assert!(annotate_photos(&mut document, Path::new("photo.on1"), false, &mut fixed_position).is_err());
  }
}
