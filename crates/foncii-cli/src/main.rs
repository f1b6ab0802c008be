//! Foncii media CLI: inspect, rewrite and ingest media from the command line.
//!
//! Storage commands read the same environment as the services
//! (STORAGE_BACKEND, LOCAL_STORAGE_PATH or S3_BUCKET/S3_REGION, ...).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use clap::{Parser, Subcommand, ValueEnum};
use foncii_cli::{fetch_object, post_location, sniff_report, stat_object, CLI_LOG_FILTER};
use foncii_core::{
    ImageFit, ImageOutputFormat, ImageUrlRewriter, LogFormat, MediaCategory, MediaConfig,
    ResizeRequest,
};
use foncii_services::{HttpFetcher, MediaIngestionGateway, PostUpload};
use foncii_storage::{create_storage, permalink};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "foncii-media", about = "Foncii media ingestion tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect a file's format and check it against the upload policies
    Sniff {
        file: PathBuf,
        /// Only check this category
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
    /// Rewrite an image URL to request a resized rendition
    Rewrite {
        url: String,
        #[arg(long)]
        height: u32,
        #[arg(long)]
        width: Option<u32>,
        /// Fit: contain, cover, fill, inside, outside
        #[arg(long)]
        fit: Option<ImageFit>,
        /// Output format: jpg, jpeg, webp, png, heif
        #[arg(long)]
        format: Option<ImageOutputFormat>,
        #[arg(long)]
        quality: Option<u8>,
    },
    /// Print the storage path and permalink of a post's media
    Path {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        post: String,
        /// Print the video thumbnail location instead
        #[arg(long)]
        thumbnail: bool,
    },
    /// Upload a post's media. Passing a thumbnail uploads a video post.
    Upload {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        post: String,
        file: PathBuf,
        #[arg(long)]
        thumbnail: Option<PathBuf>,
    },
    /// Download remote media and store it for a post
    Import {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        post: String,
        url: String,
        /// Store as the post's video thumbnail
        #[arg(long)]
        thumbnail: bool,
    },
    /// Check whether a post's media is stored and what it contains
    Stat {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        post: String,
        #[arg(long)]
        thumbnail: bool,
    },
    /// Download a post's stored media to a local file
    Fetch {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        post: String,
        #[arg(long)]
        thumbnail: bool,
        /// Destination file
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Delete a post's media and thumbnail
    Delete {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        post: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    ProfilePicture,
    PostImage,
    PostVideo,
}

impl From<CategoryArg> for MediaCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::ProfilePicture => MediaCategory::ProfilePicture,
            CategoryArg::PostImage => MediaCategory::PostImage,
            CategoryArg::PostVideo => MediaCategory::PostVideo,
        }
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

async fn read_file(path: &Path) -> anyhow::Result<Bytes> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Bytes::from(data))
}

fn load_config() -> anyhow::Result<MediaConfig> {
    MediaConfig::from_env().context("Failed to load configuration")
}

/// Configuration for commands that never touch storage.
fn config_or_default() -> MediaConfig {
    MediaConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Using default configuration");
        MediaConfig::default()
    })
}

async fn build_gateway(config: &MediaConfig) -> anyhow::Result<MediaIngestionGateway> {
    let storage = create_storage(config)
        .await
        .context("Failed to create storage backend")?;
    let fetcher = HttpFetcher::from_config(config).context("Failed to create HTTP client")?;
    Ok(MediaIngestionGateway::from_config(
        config,
        storage,
        Arc::new(fetcher),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Plain);
    foncii_infra::init_telemetry(CLI_LOG_FILTER, log_format)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Sniff { file, category } => {
            let data = read_file(&file).await?;
            let categories = match category {
                Some(c) => vec![c.into()],
                None => vec![
                    MediaCategory::ProfilePicture,
                    MediaCategory::PostImage,
                    MediaCategory::PostVideo,
                ],
            };
            print_json(&serde_json::json!({
                "file": file.display().to_string(),
                "size_bytes": data.len(),
                "verdicts": sniff_report(&data, &categories),
            }))?;
        }
        Commands::Rewrite {
            url,
            height,
            width,
            fit,
            format,
            quality,
        } => {
            let mut request = ResizeRequest::new(height);
            if let Some(width) = width {
                request = request.with_width(width);
            }
            if let Some(fit) = fit {
                request = request.with_fit(fit);
            }
            if let Some(format) = format {
                request = request.with_format(format);
            }
            if let Some(quality) = quality {
                request = request.with_quality(quality);
            }

            let rewriter = ImageUrlRewriter::new(config_or_default().provider_origins());
            println!("{}", rewriter.rewrite(&url, &request));
        }
        Commands::Path {
            owner,
            post,
            thumbnail,
        } => {
            let config = config_or_default();
            let path = post_location(&config.bucket_domain, &owner, &post, thumbnail)?;
            print_json(&serde_json::json!({
                "path": path.to_string(),
                "object_key": path.object_key(),
                "permalink": permalink(&config.cdn_origin, &path),
            }))?;
        }
        Commands::Upload {
            owner,
            post,
            file,
            thumbnail,
        } => {
            let config = load_config()?;
            let gateway = build_gateway(&config).await?;

            let media = read_file(&file).await?;
            let upload = match thumbnail {
                Some(thumbnail) => PostUpload::Video {
                    media,
                    thumbnail: read_file(&thumbnail).await?,
                },
                None => PostUpload::Image(media),
            };

            let result = gateway.update_post_media(&owner, &post, Some(upload)).await;
            print_json(&result)?;
            if !result.operation_succeeded {
                anyhow::bail!("Upload failed");
            }
        }
        Commands::Import {
            owner,
            post,
            url,
            thumbnail,
        } => {
            let config = load_config()?;
            let gateway = build_gateway(&config).await?;

            let link = if thumbnail {
                gateway.upload_remote_thumbnail(&url, &post, &owner).await
            } else {
                gateway.upload_from_remote_url(&url, &post, &owner).await
            };
            let link = link.context("Import failed")?;
            print_json(&serde_json::json!({ "permalink": link }))?;
        }
        Commands::Stat {
            owner,
            post,
            thumbnail,
        } => {
            let config = load_config()?;
            let storage = create_storage(&config)
                .await
                .context("Failed to create storage backend")?;
            let path = post_location(&config.bucket_domain, &owner, &post, thumbnail)?;

            let stat = stat_object(storage.as_ref(), &path, &config.cdn_origin).await?;
            print_json(&stat)?;
        }
        Commands::Fetch {
            owner,
            post,
            thumbnail,
            output,
        } => {
            let config = load_config()?;
            let storage = create_storage(&config)
                .await
                .context("Failed to create storage backend")?;
            let path = post_location(&config.bucket_domain, &owner, &post, thumbnail)?;

            let data = fetch_object(storage.as_ref(), &path)
                .await
                .with_context(|| format!("Failed to fetch {}", path))?;
            tokio::fs::write(&output, &data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            print_json(&serde_json::json!({
                "object_key": path.object_key(),
                "output": output.display().to_string(),
                "size_bytes": data.len(),
            }))?;
        }
        Commands::Delete { owner, post } => {
            let config = load_config()?;
            let gateway = build_gateway(&config).await?;

            let deleted = gateway.delete_media_for_post(&owner, &post).await;
            print_json(&serde_json::json!({ "success": deleted }))?;
            if !deleted {
                anyhow::bail!("Delete failed");
            }
        }
    }

    foncii_infra::shutdown_telemetry().await;
    Ok(())
}
