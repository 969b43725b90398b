// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Batch application of track data to photo and sidecar artifacts.

mod exif;
mod on1;
mod xmp;

use std::{
  fs,
  path::{Path, PathBuf},
};

pub use exif::EmbeddedMetadataAdapter;
pub use on1::JsonSidecarAdapter;
pub use xmp::XmpSidecarAdapter;

use crate::{
  config::{self, ApplyConfig},
  gpx, io,
};

/// Result of applying one artifact.
pub enum ApplyOutcome {
  /// GPS data written into the artifact (or its sidecar rewritten).
  Tagged,
  /// Dry run: reported what would change without touching anything.
  DryRun,
  /// Read-only adapter: current state inspected, nothing modified.
  Inspected,
  /// Nothing to do; the artifact is already in the desired state.
  Unchanged,
}

/// The closed set of format adapters. The variant is chosen once at startup
/// by the subcommand, not per artifact.
pub enum FormatAdapter {
  Embedded(EmbeddedMetadataAdapter),
  Xmp(XmpSidecarAdapter),
  Json(JsonSidecarAdapter),
}

impl FormatAdapter {
  fn apply(&self, artifact: &Path, track: &Path, dry_run: bool) -> Result<ApplyOutcome, String> {
    match self {
      Self::Embedded(adapter) => adapter.apply(artifact, track, dry_run),
      Self::Xmp(adapter) => adapter.apply(artifact, track, dry_run),
      Self::Json(adapter) => adapter.apply(artifact, track, dry_run),
    }
  }
}

/// Collects the artifacts to process. A file path is the sole artifact,
/// bypassing enumeration; a directory is scanned (non-recursively) for files
/// whose extension matches `ext` case-insensitively.
pub fn collect_artifacts(input: &Path, ext: &str) -> Result<Vec<PathBuf>, String> {
  if input.is_file() {
    return Ok(vec![input.to_path_buf()]);
  }

  if !input.is_dir() {
    return Err(format!("{}: Input path was not found.", input.display()));
  }

  let entries = fs::read_dir(input)
    .map_err(|e| format!("{}: Failed to read directory ({e}).", input.display()))?;

  let ext = ext.to_lowercase();
  let mut artifacts = Vec::new();

  for entry in entries {
    let entry =
      entry.map_err(|e| format!("{}: Failed to read directory entry ({e}).", input.display()))?;
    let path = entry.path();

    if !path.is_file() {
      continue;
    }

    if path
      .extension()
      .and_then(std::ffi::OsStr::to_str)
      .is_some_and(|e| e.to_lowercase() == ext)
    {
      artifacts.push(path);
    }
  }

  Ok(artifacts)
}

/// Applies `adapter` to every matching artifact. Each artifact is processed
/// independently: an unresolvable capture date, a missing track file or an
/// adapter failure is logged and never aborts the batch.
pub fn apply_batch(cfg: &ApplyConfig, adapter: &FormatAdapter) -> Result<(), String> {
  let artifacts = collect_artifacts(&cfg.input, &cfg.match_ext)?;

  log::info!(
    "Processing {} artifact(s) under {}.",
    artifacts.len(),
    cfg.input.display()
  );

  for artifact in artifacts {
    let Some(date_time) = io::read_date_time_original(&artifact) else {
      log::warn!(
        "{}: Could not resolve capture date. Skipping.",
        artifact.display()
      );
      continue;
    };

    let track = gpx::path_for(&cfg.track_root, date_time.date(), config::TRACK_EXT);
    if !track.is_file() {
      log::warn!(
        "{}: No track file at {}. Skipping.",
        artifact.display(),
        track.display()
      );
      continue;
    }

    match adapter.apply(&artifact, &track, cfg.dry_run) {
      Ok(ApplyOutcome::Tagged) => log::info!("{}: GPS data written.", artifact.display()),
      Ok(ApplyOutcome::DryRun | ApplyOutcome::Inspected) => {}
      Ok(ApplyOutcome::Unchanged) => log::info!("{}: Already up to date.", artifact.display()),
      Err(e) => log::error!("{e}"),
    }
  }

  Ok(())
}

#[cfg(test)]
mod test_collect_artifacts {
  use super::*;

  #[test]
  fn matches_extension_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.NEF"), "").unwrap();
    fs::write(dir.path().join("b.nef"), "").unwrap();
    fs::write(dir.path().join("c.jpg"), "").unwrap();

    let mut artifacts = collect_artifacts(dir.path(), "nef").unwrap();
    artifacts.sort();

    assert_eq!(
      artifacts,
      vec![dir.path().join("a.NEF"), dir.path().join("b.nef")]
    );
  }

  #[test]
  fn single_file_bypasses_enumeration() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("photo.jpg");
    fs::write(&file, "").unwrap();

    assert_eq!(collect_artifacts(&file, "nef").unwrap(), vec![file]);
  }

  #[test]
  fn does_not_recurse_into_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("a.nef"), "").unwrap();

    assert!(collect_artifacts(dir.path(), "nef").unwrap().is_empty());
  }

  #[test]
  fn errors_on_missing_path() {
    let dir = tempfile::tempdir().unwrap();

    assert!(collect_artifacts(&dir.path().join("absent"), "nef").is_err());
  }
}
