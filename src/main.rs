use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use shopfront::api::{ApiClient, ClientOptions};
use shopfront::app::{App, AppEvent};
use shopfront::catalog::SortKey;
use shopfront::config::Config;
use shopfront::motion::MotionControl;
use shopfront::theme::ThemeVariant;
use shopfront::ui;

/// Default config file path (~/.config/shopfront/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("shopfront")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "shopfront", about = "Terminal storefront for a paginated product catalog")]
struct Args {
    /// Base URL of the storefront API (overrides config and SHOPFRONT_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file to read instead of ~/.config/shopfront/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable decorative animation
    #[arg(long)]
    reduced_motion: bool,

    /// Products requested per page
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=100))]
    page_size: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land on the alternate screen buffer
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    config.apply_env(|key| std::env::var(key).ok());

    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if args.reduced_motion {
        config.reduced_motion = true;
    }
    tracing::debug!(?config, "Effective configuration");

    let api = ApiClient::new(
        &config.api_url,
        ClientOptions {
            timeout_secs: config.request_timeout_secs,
            token: config.api_token_secret(),
        },
    )
    .with_context(|| format!("Invalid API URL '{}'", config.api_url))?;

    let (motion_control, motion_pref) = MotionControl::new(config.reduced_motion);
    let mut app = App::new(api, config.page_size, motion_control, motion_pref);

    match ThemeVariant::from_str_name(&config.theme) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %config.theme, "Unknown theme, using Dark"),
    }

    match SortKey::from_str_name(&config.sort) {
        Some(key) => app.set_sort(key),
        None => tracing::warn!(sort = %config.sort, "Unknown sort order, using Featured"),
    }

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::spawn_categories_load(&mut app, &event_tx);
    let ticket = app.feed.load_initial();
    ui::spawn_feed_load(&mut app, ticket, &event_tx);

    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
