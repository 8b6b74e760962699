use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skywatch_core::{
    Config, ContactForm, DEFAULT_REFRESH_PERIOD, RefreshScheduler, SessionState, Visibility,
    WeatherClient, contact,
};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::watch;

use crate::render::TerminalRenderer;

/// The "popular locations" shortcuts offered alongside free-text entry.
const PRESET_LOCATIONS: &[&str] = &["London", "New York", "Tokyo", "Sydney", "Cape Town"];
const OTHER_CHOICE: &str = "Other (type a city name)";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "Terminal weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Look up a city and keep refreshing it until Ctrl-C.
    Watch {
        /// City name; prompted for interactively when absent.
        city: Option<String>,
    },

    /// Fill in the contact form.
    Contact,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Watch { city } => watch(city).await,
            Command::Contact => contact_form(),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:")
        .with_help_message("Create one at https://openweathermap.org/api")
        .prompt()
        .context("API key prompt aborted")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn watch(city: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let session = Arc::new(SessionState::new());
    let client = WeatherClient::from_config(&config, Arc::new(TerminalRenderer), session);

    let city = match city {
        Some(city) if !city.trim().is_empty() => city.trim().to_string(),
        _ => prompt_city()?,
    };

    let scheduler = RefreshScheduler::new(client.clone(), DEFAULT_REFRESH_PERIOD);
    let (visibility_tx, visibility_rx) = watch::channel(Visibility::Visible);
    let observer = scheduler.observe_visibility(visibility_rx);

    tracing::info!("starting watch for {city:?}");

    // A submitted search: fetch once, then arm the refresh timer.
    let _ = client.fetch_weather(&city).await;
    scheduler.start();

    println!();
    println!("Refreshing every 10 minutes. Send SIGUSR1 to refresh now; Ctrl-C exits.");

    // SIGUSR1 stands in for the surface becoming visible again.
    let mut visible = signal(SignalKind::user_defined1())
        .context("failed to install SIGUSR1 handler")?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(()) = visible.recv() => {
                let _ = visibility_tx.send(Visibility::Visible);
            }
        }
    }

    observer.abort();
    scheduler.dispose();
    Ok(())
}

fn prompt_city() -> anyhow::Result<String> {
    let mut options: Vec<&str> = PRESET_LOCATIONS.to_vec();
    options.push(OTHER_CHOICE);

    let choice = Select::new("Where to?", options)
        .prompt()
        .context("city prompt aborted")?;

    if choice != OTHER_CHOICE {
        return Ok(choice.to_string());
    }

    loop {
        let city = Text::new("City:").prompt().context("city prompt aborted")?;
        let city = city.trim().to_string();
        if !city.is_empty() {
            return Ok(city);
        }
    }
}

fn contact_form() -> anyhow::Result<()> {
    let mut form = ContactForm::default();

    loop {
        // Re-prompting keeps the previous input so only the failing fields
        // need retyping.
        form.name = Text::new("Name:")
            .with_initial_value(&form.name)
            .prompt()
            .context("contact prompt aborted")?;
        form.email = Text::new("Email:")
            .with_initial_value(&form.email)
            .prompt()
            .context("contact prompt aborted")?;
        form.message = Text::new("Message:")
            .with_initial_value(&form.message)
            .prompt()
            .context("contact prompt aborted")?;

        let errors = contact::validate(&form);
        if errors.ok() {
            println!("{}", contact::ACKNOWLEDGMENT);
            return Ok(());
        }

        println!();
        for error in [errors.name, errors.email, errors.message]
            .into_iter()
            .flatten()
        {
            println!("  {error}");
        }
        println!();
    }
}
