//! Medialib CLI: inspect files the way the media library would store them.
//!
//! Storage settings come from `MEDIALIB_*` environment variables (or `.env`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use medialib_cli::{init_tracing, summary_line, OutputFormat};
use medialib_core::{AspectRatio, MediaLibraryConfig};
use medialib_processing::{MediaClassifier, MediaItemFactory};
use medialib_storage::{create_storage_manager, media_item_json};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "medialib", about = "Media library inspection tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a media item from a local file and print it
    Inspect {
        /// Path to the file
        path: PathBuf,
        /// Folder the item would belong to
        #[arg(long, value_name = "UUID")]
        folder: Option<Uuid>,
        /// Owning user id
        #[arg(long, default_value = "0")]
        user_id: i32,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Classify a file name, optionally with its MIME type
    Classify {
        /// File name (only the extension is used)
        filename: String,
        /// MIME type reported for the file
        #[arg(long)]
        mime: Option<String>,
    },
    /// Map a width and height to the nearest named aspect ratio
    AspectRatio {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            path,
            folder,
            user_id,
            format,
        } => {
            let config = MediaLibraryConfig::from_env()
                .context("Failed to load configuration from MEDIALIB_* variables")?;
            let factory = MediaItemFactory::from_config(&config);
            tracing::debug!(path = %path.display(), "Inspecting file");
            let item = factory
                .create_from_local_path(&path, folder.unwrap_or_else(Uuid::new_v4), user_id)
                .with_context(|| format!("Failed to inspect {}", path.display()))?;

            match format {
                OutputFormat::Json => {
                    let storage = create_storage_manager(&config)?;
                    let view = media_item_json(&item, &storage, &config.backend_preview_filter)?;
                    print_json(&view)?;
                }
                OutputFormat::Table => println!("{}", summary_line(&item)),
            }
        }
        Commands::Classify { filename, mime } => {
            let media_type = MediaClassifier::new().classify(&filename, mime.as_deref());
            print_json(&json!({
                "filename": filename,
                "mime": mime,
                "type": media_type,
            }))?;
        }
        Commands::AspectRatio { width, height } => {
            let aspect_ratio = AspectRatio::from_width_and_height(width, height);
            print_json(&json!({
                "width": width,
                "height": height,
                "aspectRatio": aspect_ratio,
                "landscape": aspect_ratio.is_landscape(),
                "portrait": aspect_ratio.is_portrait(),
            }))?;
        }
    }

    Ok(())
}
