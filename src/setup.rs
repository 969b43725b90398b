// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Program setup functions.

use std::{fs, io::Write, path::PathBuf};

use env_logger::Builder;
use log::LevelFilter;

use crate::config;

/// Sets up env_logger with the format "ERROR_LEVEL message" (e.g. "WARN
/// something went wrong").
///
/// Log levels:
/// Error: Program and per-artifact errors.
/// Warn: Skipped artifacts and untouched sidecar entries.
/// Info: General program flow and file creation.
/// Debug: Skipped records and per-entry decisions.
/// Trace: ExifTool output.
pub fn configure_logging(verbosity: u8) {
  let level = match verbosity {
    0 => LevelFilter::Info,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  Builder::new()
    .filter_level(level)
    .format(|buf, record| {
      let style = buf.default_level_style(record.level());
      writeln!(
        buf,
        "{style}{}{style:#}\t{}",
        record.level(),
        record.args()
      )
    })
    .init();
}

/// Remember the track root in `XDG_CONFIG_HOME/geotag` when provided.
/// Else, read the remembered root, falling back to the default.
pub fn get_or_update_track_root(path: Option<PathBuf>) -> PathBuf {
  match path {
    Some(path) => {
      match (
        xdg::BaseDirectories::new().place_config_file(config::CONFIG_NAME),
        path.to_str(),
      ) {
        (Ok(file), Some(text)) => {
          if let Err(e) = fs::write(file, text) {
            log::debug!("Failed to remember track root ({e}).");
          }
        }
        _ => log::debug!("Not remembering track root."),
      }
      path
    }
    None => xdg::BaseDirectories::new()
      .get_config_file(config::CONFIG_NAME)
      .and_then(|file| fs::read_to_string(file).ok())
      .map(|text| PathBuf::from(text.trim()))
      .unwrap_or_else(|| PathBuf::from(config::TRACK_ROOT_DEFAULT)),
  }
}
