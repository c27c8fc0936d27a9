use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "waterclass",
    version,
    about = "Surface water decision tree classifier"
)]
pub struct CliArgs {
    /// Enable logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the decision tree's predicate table
    Thresholds {
        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify one pixel and show its path through the tree
    Pixel {
        /// Band 1 surface reflectance (scaled 0-10000)
        #[arg(long, allow_hyphen_values = true)]
        b1: f64,

        /// Band 2 surface reflectance
        #[arg(long, allow_hyphen_values = true)]
        b2: f64,

        /// Band 3 surface reflectance
        #[arg(long, allow_hyphen_values = true)]
        b3: f64,

        /// Band 4 surface reflectance
        #[arg(long, allow_hyphen_values = true)]
        b4: f64,

        /// Band 5 surface reflectance
        #[arg(long, allow_hyphen_values = true)]
        b5: f64,

        /// Band 7 surface reflectance
        #[arg(long, allow_hyphen_values = true)]
        b7: f64,

        /// Compute in double precision instead of single precision
        #[arg(long, default_value_t = false)]
        float64: bool,

        /// JSON file with classifier parameters (force_f64, nodata)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
