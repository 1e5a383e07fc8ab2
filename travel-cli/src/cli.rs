use std::{fs, path::PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use travel_core::{Aggregator, Config, Page, ServiceId, providers_for};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "travel", version, about = "Travel Explorer site builder")]
pub struct Cli {
    /// Log every request and fallback to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key for a service.
    Configure {
        /// Service short name, "unsplash" or "openweather".
        service: String,
    },

    /// Render the home page with popular destinations.
    Home {
        #[command(flatten)]
        output: Output,
    },

    /// Render the detail page for a destination.
    Destination {
        /// Destination to look up, e.g. "Kyoto".
        query: Option<String>,

        #[command(flatten)]
        output: Output,
    },

    /// Render the weather dashboard for a city.
    Weather {
        city: String,

        #[command(flatten)]
        output: Output,
    },
}

#[derive(Debug, clap::Args)]
pub struct Output {
    /// Write the page to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Output {
    fn write(&self, html: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, html)
                    .with_context(|| format!("Failed to write page to {}", path.display()))?;
                tracing::info!(path = %path.display(), "Page written");
            }
            None => println!("{html}"),
        }
        Ok(())
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let (page, output) = match self.command {
            Command::Configure { service } => return configure(&service),
            Command::Home { output } => (Page::Home, output),
            Command::Destination { query, output } => (Page::Destination { query }, output),
            Command::Weather { city, output } => (Page::Weather { city }, output),
        };

        let config = Config::load()?;
        let aggregator = Aggregator::new(providers_for(&config, page.services())?);

        tracing::debug!(page = page.file_name(), "Building page");
        let html = page.build(&aggregator, &config).await?;
        output.write(&html)
    }
}

fn configure(service: &str) -> anyhow::Result<()> {
    let id = ServiceId::try_from(service)?;
    if !id.requires_api_key() {
        bail!("Service '{id}' does not need an API key.");
    }

    let api_key = inquire::Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty.");
    }

    let mut config = Config::load()?;
    config.upsert_api_key(id, api_key.to_string());
    config.save()?;

    println!(
        "Saved {id} key to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
