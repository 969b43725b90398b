// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Adapter writing GPS tags directly into image files via `ExifTool`.

use std::path::Path;

use super::ApplyOutcome;
use crate::io;

/// Geotags an image in place from a track file, delegating the actual
/// metadata rewrite to `ExifTool`'s `-geotag` mode.
pub struct EmbeddedMetadataAdapter;

impl EmbeddedMetadataAdapter {
  pub fn apply(
    &self,
    artifact: &Path,
    track: &Path,
    dry_run: bool,
  ) -> Result<ApplyOutcome, String> {
    if dry_run {
      log::info!(
        "Would run: exiftool -overwrite_original -geotag {} {}",
        track.display(),
        artifact.display()
      );
      return Ok(ApplyOutcome::DryRun);
    }

    let summary = io::geotag(track, artifact)
      .map_err(|e| format!("{}: Failed to geotag ({e}).", artifact.display()))?;
    log::debug!("{}: {summary}", artifact.display());

    Ok(ApplyOutcome::Tagged)
  }
}
