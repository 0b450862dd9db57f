use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::{DEFAULT_MAX_POINTS, DEFAULT_MODELS_DIR, DEFAULT_NEIGHBOURS};

#[derive(Parser)]
#[command(name = "vayuraksha")]
#[command(about = "Geospatial air-quality prediction service for India")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train one model per prediction target from a historical export
    Train {
        #[arg(short, long, help = "Long-format CSV of historical readings")]
        dataset: PathBuf,

        #[arg(short, long, default_value = DEFAULT_MODELS_DIR, help = "Directory for model artifacts")]
        models_dir: PathBuf,

        #[arg(
            short = 'k',
            long,
            default_value_t = DEFAULT_NEIGHBOURS,
            help = "Neighbours consulted per prediction"
        )]
        neighbours: usize,

        #[arg(
            long,
            default_value_t = DEFAULT_MAX_POINTS,
            help = "Training point cap per model (0 = unlimited)"
        )]
        max_points: usize,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, default_value = "false")]
        validate_only: bool,
    },

    /// Serve predictions over HTTP
    Serve {
        #[arg(short, long, help = "Directory containing model artifacts")]
        models_dir: Option<PathBuf>,

        #[arg(long, help = "Bind host")]
        host: Option<String>,

        #[arg(short, long, help = "Bind port")]
        port: Option<u16>,

        #[arg(short, long, help = "TOML configuration file")]
        config: Option<PathBuf>,
    },

    /// Describe the model artifacts in a directory
    Info {
        #[arg(short, long, default_value = DEFAULT_MODELS_DIR)]
        models_dir: PathBuf,
    },
}
