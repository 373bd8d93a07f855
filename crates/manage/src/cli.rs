use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pasos_core::digest::{DigestKind, DEFAULT_DAYS};

/// Pasos studio management
#[derive(Parser, Debug)]
#[command(name = "pasos-manage", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Email a digest of recent studio activity
    Digest(DigestArgs),
    /// Pull the latest media from the studio Instagram account
    SyncInstagram(SyncInstagramArgs),
    /// Resize and recompress gallery images
    OptimizeImages(OptimizeImagesArgs),
}

#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Activity window in days (1-90)
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    pub days: i64,

    /// Digest type: activity, weekly or test
    #[arg(long = "type", default_value = "activity")]
    pub kind: DigestKind,

    /// Dry run: print the email instead of sending it
    #[arg(long)]
    pub test: bool,

    /// Send an activity digest even when nothing happened
    #[arg(long)]
    pub force: bool,

    /// Recipient address (repeatable). Defaults to DIGEST_RECIPIENTS
    #[arg(long = "to")]
    pub to: Vec<String>,

    /// Database URL (can also be set via DATABASE_URL env var)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct SyncInstagramArgs {
    /// Number of most recent media to fetch
    #[arg(long, default_value_t = 25)]
    pub limit: usize,

    /// Database URL (can also be set via DATABASE_URL env var)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct OptimizeImagesArgs {
    /// Directory containing .jpg/.jpeg/.png files
    pub input_dir: PathBuf,

    /// Output directory (default: <input_dir>/optimized)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum output width in pixels; smaller images are not upscaled
    #[arg(long, default_value_t = 1600)]
    pub max_width: u32,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = 82, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Also write a lossless WebP next to each output
    #[arg(long)]
    pub webp: bool,
}
