use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use shape_cli::{batch::run_batch, server, ShapesConfig, ShapeCliError};
use shapes::{FilterConfig, FilterPreset};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Extract hand-drawn shapes from a page image", long_about = None)]
struct Cli {
    /// Optional .toml or .json settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract shapes from one image into an output directory
    Extract {
        /// Path to the input image
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory for shape_<n>.png, background.png and shapes.json (cleared first)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Threshold preset: server, batch or permissive
        #[arg(long)]
        preset: Option<FilterPreset>,
        /// Luma below this value counts as ink
        #[arg(long)]
        cutoff: Option<u8>,
    },
    /// Serve the extraction pipeline over HTTP
    Serve {
        /// Address to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Threshold preset: server, batch or permissive
        #[arg(long)]
        preset: Option<FilterPreset>,
    },
    /// Print the JSON schema of the filter thresholds
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let mut settings = match &cli.config {
        Some(path) => ShapesConfig::from_file(path)?,
        None => ShapesConfig::default(),
    };

    match cli.command {
        Commands::Extract { input, output_dir, preset, cutoff } => {
            if let Some(preset) = preset {
                settings.preset = Some(preset);
            }
            if let Some(cutoff) = cutoff {
                settings.cutoff = cutoff;
            }

            let input = input
                .or_else(|| settings.input_path.as_ref().map(PathBuf::from))
                .ok_or(ShapeCliError::MissingInput)?;
            let output_dir = output_dir
                .or_else(|| settings.output_dir.as_ref().map(PathBuf::from))
                .ok_or(ShapeCliError::MissingOutputDir)?;

            let pipeline = settings.build_pipeline(FilterPreset::Batch)?;
            let descriptors = run_batch(&pipeline, &input, &output_dir)?;
            info!("Done! {} shapes saved in {}", descriptors.len(), output_dir.display());
        }
        Commands::Serve { host, port, preset } => {
            if let Some(preset) = preset {
                settings.preset = Some(preset);
            }
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            let pipeline = settings.build_pipeline(FilterPreset::Server)?;
            server::run(&settings.server, pipeline)
                .await
                .map_err(|e| eyre!("server error: {e}"))?;
        }
        Commands::Schema => {
            let schema = FilterConfig::schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
