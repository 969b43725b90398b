//! A small utility for annotating RAW and sidecar files with GPS
//! coordinates derived from a location-history export, acting as a wrapper
//! around 'exiftool'.
//!
//! Copyright 2025 Seth Pendergrass. See LICENSE.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod apply;
mod commands;
mod config;
mod gpx;
mod io;
mod prim;
mod setup;
mod timeline;

#[cfg(test)]
mod testing;

use apply::{EmbeddedMetadataAdapter, FormatAdapter, JsonSidecarAdapter, XmpSidecarAdapter};
use config::{ApplyConfig, ImportConfig};

#[derive(Parser)]
#[command(about = "Annotate RAW/sidecar files with GPS coordinates")]
struct Args {
  /// Verbosity level. Max: 2.
  #[arg(short, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Import a location-history export into per-day track files.
  Import {
    /// Path to the location-history JSON document.
    #[arg(short, long, default_value = "timeline.json")]
    input: PathBuf,

    /// Root of the track file tree.
    #[arg(short, long, default_value = "gpx")]
    output: PathBuf,

    /// Report the files that would be created without writing them.
    #[arg(long)]
    dry_run: bool,
  },

  /// Write GPS tags into image files from matching track files.
  Exif {
    /// Root of the track file tree. Remembered across runs.
    #[arg(short, long)]
    gpx: Option<PathBuf>,

    /// File extension to match.
    #[arg(short, long, default_value = "nef")]
    r#match: String,

    /// Photo file or directory to process.
    #[arg(short, long)]
    input: PathBuf,

    /// Print the commands that would run without executing them.
    #[arg(long)]
    dry_run: bool,
  },

  /// Inspect XMP sidecars against matching track files.
  Sidecar {
    /// Root of the track file tree. Remembered across runs.
    #[arg(short, long)]
    gpx: Option<PathBuf>,

    /// File extension to match.
    #[arg(short, long, default_value = "xmp")]
    r#match: String,

    /// Sidecar file or directory to process.
    #[arg(short, long)]
    input: PathBuf,

    /// Report without modifying anything.
    #[arg(long)]
    dry_run: bool,
  },

  /// Fill GPS fields in ON1 sidecars from their RAW files.
  On1 {
    /// Root of the track file tree. Remembered across runs.
    #[arg(short, long)]
    gpx: Option<PathBuf>,

    /// File extension to match.
    #[arg(short, long, default_value = "on1")]
    r#match: String,

    /// Sidecar file or directory to process.
    #[arg(short, long)]
    input: PathBuf,

    /// Report the updates without rewriting sidecars.
    #[arg(long)]
    dry_run: bool,

    /// Overwrite existing non-null GPS fields.
    #[arg(long)]
    force: bool,

    /// Extension of the RAW files next to each sidecar.
    #[arg(short, long, default_value = "nef")]
    raw_ext: String,
  },
}

fn main() {
  let args = Args::parse();
  setup::configure_logging(args.verbose);

  let result = match args.command {
    Commands::Import {
      input,
      output,
      dry_run,
    } => commands::import(&ImportConfig {
      input,
      output,
      dry_run,
      creator: config::GPX_CREATOR,
    }),
    Commands::Exif {
      gpx,
      r#match,
      input,
      dry_run,
    } => commands::apply(
      &ApplyConfig {
        input,
        track_root: setup::get_or_update_track_root(gpx),
        match_ext: r#match,
        dry_run,
      },
      &FormatAdapter::Embedded(EmbeddedMetadataAdapter),
    ),
    Commands::Sidecar {
      gpx,
      r#match,
      input,
      dry_run,
    } => commands::apply(
      &ApplyConfig {
        input,
        track_root: setup::get_or_update_track_root(gpx),
        match_ext: r#match,
        dry_run,
      },
      &FormatAdapter::Xmp(XmpSidecarAdapter),
    ),
    Commands::On1 {
      gpx,
      r#match,
      input,
      dry_run,
      force,
      raw_ext,
    } => commands::apply(
      &ApplyConfig {
        input,
        track_root: setup::get_or_update_track_root(gpx),
        match_ext: r#match,
        dry_run,
      },
      &FormatAdapter::Json(JsonSidecarAdapter { force, raw_ext }),
    ),
  };

  if let Err(e) = result {
    log::error!("{e}");
    std::process::exit(1);
  }
}
