use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "geocroissant",
    version,
    about = "Generate GeoCroissant metadata from geospatial datasets"
)]
pub struct CliArgs {
    /// Root directory containing GeoTIFF files
    pub directory: PathBuf,

    /// Output path for the GeoCroissant JSON (default: <directory>/geocroissant.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a configuration YAML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable band statistics computation (faster)
    #[arg(long, default_value_t = false)]
    pub no_stats: bool,

    /// Disable metadata cache file creation
    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
