use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use weatherapi_core::{ApiError, Config, LocationQuery, WeatherApi, WeatherApiClient};

use crate::output;

/// Location used by the demo for current conditions.
pub const DEMO_CURRENT_LOCATION: &str = "Salt lake city";
/// Location used by the demo for alerts.
pub const DEMO_ALERTS_LOCATION: &str = "21.8,-90.8W";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherapi", version, about = "WeatherAPI.com current conditions and alerts")]
pub struct Cli {
    /// API key to use instead of the configured one.
    #[arg(long, global = true, env = "WEATHERAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL to use instead of the configured one.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Runs the demo when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key (and optional base URL) in the config file.
    Configure,

    /// Show current conditions and air quality for a location.
    Current {
        /// City, `lat,lon`, postal code, `metar:`/`iata:` code, IP or `id:`.
        location: String,
    },

    /// Show active alerts for a location.
    Alerts {
        /// Same formats as `current`.
        location: String,
    },

    /// Fetch current conditions for Salt Lake City, then alerts for 21.8,-90.8W.
    Demo,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        match self.command.unwrap_or(Command::Demo) {
            Command::Configure => configure(self.api_key, self.base_url, &mut out),
            Command::Current { location } => {
                let client = build_client(self.api_key, self.base_url)?;
                show_current(&client, &location.into(), &mut out).await
            }
            Command::Alerts { location } => {
                let client = build_client(self.api_key, self.base_url)?;
                show_alerts(&client, &location.into(), &mut out).await
            }
            Command::Demo => {
                let client = build_client(self.api_key, self.base_url)?;
                run_demo(&client, &mut out).await
            }
        }
    }
}

/// Stored config with any command-line overrides applied on top.
fn build_client(
    api_key: Option<String>,
    base_url: Option<String>,
) -> anyhow::Result<WeatherApiClient> {
    let mut config = Config::load()?;
    if let Some(key) = api_key {
        config.set_api_key(key);
    }
    if base_url.is_some() {
        config.set_base_url(base_url);
    }

    let client = WeatherApiClient::new(config.client_config()?);
    debug!(base_url = %client.config().base_url, "client configured");
    Ok(client)
}

pub async fn show_current(
    api: &dyn WeatherApi,
    location: &LocationQuery,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let reply = api
        .fetch_current(location)
        .await
        .or_else(|err| show_raw_body(err, out))
        .with_context(|| format!("Failed to fetch current conditions for '{location}'"))?;
    output::write_current(out, &reply)?;
    Ok(())
}

pub async fn show_alerts(
    api: &dyn WeatherApi,
    location: &LocationQuery,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let reply = api
        .fetch_alerts(location)
        .await
        .or_else(|err| show_raw_body(err, out))
        .with_context(|| format!("Failed to fetch alerts for '{location}'"))?;
    output::write_alerts(out, &reply)?;
    Ok(())
}

/// Prints the decoded body, if there was one, before the error is reported.
fn show_raw_body<T>(err: ApiError, out: &mut impl Write) -> anyhow::Result<T> {
    if let Some(raw) = err.raw_body() {
        output::write_raw(out, raw)?;
    }
    Err(err.into())
}

/// Current conditions first, then alerts. The first error stops the run.
pub async fn run_demo(api: &dyn WeatherApi, out: &mut impl Write) -> anyhow::Result<()> {
    show_current(api, &DEMO_CURRENT_LOCATION.into(), out).await?;
    show_alerts(api, &DEMO_ALERTS_LOCATION.into(), out).await
}

fn configure(
    api_key: Option<String>,
    base_url: Option<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None => inquire::Password::new("WeatherAPI.com API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };

    store_config(&Config::config_file_path()?, api_key, base_url, out)
}

/// Merges the key (and base URL, if given) into the config file at `path`.
fn store_config(
    path: &Path,
    api_key: String,
    base_url: Option<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;
    config.set_api_key(api_key.trim().to_string());
    if base_url.is_some() {
        config.set_base_url(base_url);
    }

    config.client_config()?;
    config.save_to(path)?;
    info!(path = %path.display(), "configuration saved");
    writeln!(out, "Saved configuration to {}", path.display())?;

    Ok(())
}
