//! House Features CLI - training-time tooling
//!
//! Runs the feature pipeline over a dataset, writes the reference network
//! artifact and prints the feature schema.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use price_core::constants::{DEFAULT_MODEL_PATH, DEFAULT_SEED_MODEL};
use price_core::logic::artifact::save_scaler;
use price_core::logic::dataset::{labelled_targets, load_csv, write_feature_csv};
use price_core::logic::features::{LayoutInfo, FEATURE_LAYOUT};
use price_core::logic::model::artifact_checksum;
use price_core::logic::pipeline::{PipelineConfig, RecordSet};
use price_core::logic::HousingDataPipeline;

#[derive(Parser)]
#[command(name = "house-features")]
#[command(about = "Feature pipeline and model tooling for house price prediction", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feature pipeline over a raw dataset
    Transform {
        /// Raw CSV (kc_house_data layout)
        #[arg(short, long)]
        input: PathBuf,

        /// Feature matrix destination
        #[arg(short, long)]
        output: PathBuf,

        /// Append the min-max normalization stage
        #[arg(long)]
        normalize: bool,

        /// Write fitted scaler parameters here (requires --normalize)
        #[arg(long)]
        scaler_out: Option<PathBuf>,

        /// Ignore already-pruned columns instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Write the reference network with freshly initialized weights
    InitModel {
        #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
        output: PathBuf,

        #[arg(long, default_value_t = DEFAULT_SEED_MODEL)]
        seed: u64,
    },

    /// Print the feature schema as JSON
    Schema,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transform {
            input,
            output,
            normalize,
            scaler_out,
            lenient,
        } => {
            if scaler_out.is_some() && !normalize {
                bail!("--scaler-out needs --normalize");
            }

            let records = load_csv(&input).with_context(|| format!("reading {}", input.display()))?;
            log::info!("Loaded {} records from {}", records.len(), input.display());

            let config = PipelineConfig {
                normalize,
                strict_pruning: !lenient,
                ..PipelineConfig::default()
            };
            let mut pipeline = HousingDataPipeline::default().with_config(config).create_pipeline();

            let data = RecordSet::from_records(&records);
            pipeline.fit(&data)?;
            let matrix = pipeline.transform_to_matrix(&data)?;

            let prices = labelled_targets(&records)?;
            if prices.is_none() {
                log::warn!("{} has no price column, writing features only", input.display());
            }
            let rows = write_feature_csv(&output, FEATURE_LAYOUT, &matrix, prices.as_deref())?;
            log::info!("Wrote {} rows to {}", rows, output.display());

            if let (Some(path), Some(scaler)) = (scaler_out, pipeline.scaler()) {
                save_scaler(scaler, &path)?;
                log::info!("Wrote scaler parameters to {}", path.display());
            }
        }

        Commands::InitModel { output, seed } => {
            let network = HousingDataPipeline::new(seed).build_network();
            network.save(&output)?;

            let checksum = artifact_checksum(&std::fs::read(&output)?);
            log::info!("Wrote reference network (seed {}) to {}", seed, output.display());
            println!("{}  {}", checksum, output.display());
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&LayoutInfo::current())?);
        }
    }

    Ok(())
}
