use crate::config::load_config;
use crate::render::render_thumbnail;
use crate::request::{Category, RenderRequest};
use crate::theme;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "thumbsynth",
    version,
    about = "Procedural article-cover thumbnail renderer"
)]
pub struct Args {
    /// Article title (may contain mixed Japanese/Latin text)
    #[arg(short = 't', long = "title")]
    pub title: String,

    /// Content category: music, voice, tutorial, news, comparison,
    /// development or general
    #[arg(long = "category", default_value = "general")]
    pub category: String,

    /// Tool name shown as a hashtag chip; also drives theme selection
    #[arg(long = "tool")]
    pub tool: Option<String>,

    /// Force a specific theme by name
    #[arg(long = "theme")]
    pub theme: Option<String>,

    /// Seed for deterministic output; omitted draws from entropy
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short = 'o', long = "output", default_value = "thumbnail.png")]
    pub output: PathBuf,

    /// Canvas width override
    #[arg(short = 'w', long = "width")]
    pub width: Option<u32>,

    /// Canvas height override
    #[arg(short = 'H', long = "height")]
    pub height: Option<u32>,

    /// List available theme names and exit
    #[arg(long = "listThemes")]
    pub list_themes: bool,
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_themes {
        for name in theme::theme_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }

    let request = RenderRequest {
        title: args.title,
        category: Category::parse(&args.category),
        tool_label: args.tool,
        theme_override: args.theme,
        seed: args.seed,
    };

    let bytes = render_thumbnail(&request, &config)?;
    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(path = %args.output.display(), bytes = bytes.len(), "thumbnail written");
    Ok(())
}
