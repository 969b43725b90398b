// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Program subcommands.

use std::fs;

use crate::{
  apply::{self, FormatAdapter},
  config::{self, ApplyConfig, ImportConfig},
  gpx, timeline,
};

/// Imports a location-history document into one track file per calendar
/// day under `cfg.output`.
pub fn import(cfg: &ImportConfig) -> Result<(), String> {
  if !cfg.input.is_file() {
    return Err(format!(
      "{}: Input document was not found.",
      cfg.input.display()
    ));
  }

  log::info!(
    "Importing {} into {}.",
    cfg.input.display(),
    cfg.output.display()
  );

  let text = fs::read_to_string(&cfg.input)
    .map_err(|e| format!("{}: Failed to read input document ({e}).", cfg.input.display()))?;
  let days = timeline::parse(&text)?;

  for (day, points) in &days {
    let path = gpx::path_for(&cfg.output, *day, config::TRACK_EXT);

    if cfg.dry_run {
      log::info!("Would create {} ({} points).", path.display(), points.len());
      continue;
    }

    gpx::ensure_dirs(&path)?;
    gpx::write_track(&path, points, cfg.creator)?;
    log::info!("Created {} ({} points).", path.display(), points.len());
  }

  Ok(())
}

/// Applies GPS data to every matching artifact with the chosen adapter.
pub fn apply(cfg: &ApplyConfig, adapter: &FormatAdapter) -> Result<(), String> {
  apply::apply_batch(cfg, adapter)
}

#[cfg(test)]
mod test_import {
  use std::path::PathBuf;

  use super::*;

  fn import_config(dir: &tempfile::TempDir, dry_run: bool) -> ImportConfig {
    ImportConfig {
      input: dir.path().join("timeline.json"),
      output: dir.path().join("gpx"),
      dry_run,
      creator: config::GPX_CREATOR,
    }
  }

  #[test]
  fn creates_one_track_file_per_day() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
      dir.path().join("timeline.json"),
      r#"{
        "semanticSegments": [
          { "timelinePath": [
            { "point": "49.5°, 18.1°", "time": "2024-01-15T10:00:00Z" },
            { "point": "49.6°, 18.2°", "time": "2024-01-15T11:00:00Z" }
          ] },
          { "timelinePath": [
            { "point": "50.0°, 19.0°", "time": "2024-01-16T09:00:00Z" }
          ] }
        ]
      }"#,
    )
    .unwrap();

    import(&import_config(&dir, false)).unwrap();

    let first = fs::read_to_string(dir.path().join("gpx/2024/01/15.gpx")).unwrap();
    assert!(first.contains("<trkpt lat=\"49.5\" lon=\"18.1\">"));
    assert!(first.contains("<time>2024-01-15T10:00:00Z</time>"));
    assert!(first.contains("<trkpt lat=\"49.6\" lon=\"18.2\">"));

    let second = fs::read_to_string(dir.path().join("gpx/2024/01/16.gpx")).unwrap();
    assert!(second.contains("<trkpt lat=\"50\" lon=\"19\">"));
  }

  #[test]
  fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
      dir.path().join("timeline.json"),
      r#"{
        "semanticSegments": [
          { "timelinePath": [
            { "point": "49.5°, 18.1°", "time": "2024-01-15T10:00:00Z" }
          ] }
        ]
      }"#,
    )
    .unwrap();

    import(&import_config(&dir, true)).unwrap();

    assert!(!dir.path().join("gpx").exists());
  }

  #[test]
  fn missing_input_document_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let result = import(&ImportConfig {
      input: PathBuf::from("absent/timeline.json"),
      output: dir.path().join("gpx"),
      dry_run: false,
      creator: config::GPX_CREATOR,
    });

    assert!(result.is_err());
  }
}
