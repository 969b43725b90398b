// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Crate-wide constants and per-command configuration.

use std::path::PathBuf;

/// Written into the `creator` attribute of every generated track file.
pub const GPX_CREATOR: &str = "geotag";

/// Extension of generated track files.
pub const TRACK_EXT: &str = "gpx";

/// Extension of ON1 sidecar files.
pub const ON1_EXT: &str = "on1";

/// Date & time format used by `ExifTool` for `DateTimeOriginal`.
pub const EXIF_DATETIME_FMT: &str = "%Y:%m:%d %H:%M:%S";

/// Name of the file under `XDG_CONFIG_HOME` remembering the track root.
pub const CONFIG_NAME: &str = "geotag";

/// Track root used when none is given and none is remembered.
pub const TRACK_ROOT_DEFAULT: &str = "gpx";

/// Settings for the `import` subcommand.
pub struct ImportConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub dry_run: bool,
  pub creator: &'static str,
}

/// Settings shared by the apply subcommands (`exif`, `sidecar`, `on1`).
pub struct ApplyConfig {
  pub input: PathBuf,
  pub track_root: PathBuf,
  pub match_ext: String,
  pub dry_run: bool,
}
