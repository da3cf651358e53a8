use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use std::{
    io::{self, Write},
    process::ExitCode,
};
use weather_lookup_core::{
    Config, Coordinates, LookupError, UiState, WeatherController,
    geolocation::geolocator_from_config, provider::provider_from_config, render,
};

const PROMPT_HELP: &str = "/here for your location, /quit to exit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-lookup",
    version,
    about = "Current weather for a city or your location"
)]
pub struct Cli {
    /// Use this OpenWeatherMap API key instead of the configured one.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show current weather for a city.
    City {
        /// City name, e.g. "London" or "London,GB".
        name: String,
    },

    /// Show current weather for your location.
    Here {
        /// Latitude; skips automatic location when given with --lon.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude; skips automatic location when given with --lat.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Look up cities one after another. `/here` uses your location, `/quit` exits.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;
        tracing::debug!(command = ?self.command, "Running command");

        // Lookup errors land on the display state, so the results are not inspected here.
        match self.command {
            Command::Configure => {
                configure(config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::City { name } => {
                let controller = build_controller(&config, self.api_key, None);
                let _ = controller.submit_city_query(&name).await;
                show(&controller)
            }
            Command::Here { lat, lon } => {
                let fixed = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
                let controller = build_controller(&config, self.api_key, fixed);
                let _ = controller.submit_location_query().await;
                show(&controller)
            }
            Command::Interactive => {
                let controller = build_controller(&config, self.api_key, None);
                interactive(&controller).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Draw the display state: readings on stdout, errors on stderr.
///
/// Returns `false` when an error was drawn.
fn write_state(state: &UiState, out: &mut impl Write, err: &mut impl Write) -> io::Result<bool> {
    match state {
        UiState::Error(_) => {
            writeln!(err, "{}", render(state))?;
            Ok(false)
        }
        _ => {
            writeln!(out, "{}", render(state))?;
            Ok(true)
        }
    }
}

fn show(controller: &WeatherController) -> anyhow::Result<ExitCode> {
    let shown = write_state(&controller.state(), &mut io::stdout(), &mut io::stderr())
        .context("Failed to write output")?;

    Ok(if shown {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build_controller(
    config: &Config,
    api_key: Option<String>,
    fixed: Option<Coordinates>,
) -> WeatherController {
    WeatherController::new(
        provider_from_config(config),
        geolocator_from_config(config, fixed),
        api_key.or_else(|| config.api_key.clone()),
    )
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    if !config.is_api_key_configured() {
        anyhow::bail!("{}", LookupError::MissingCredential);
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn interactive(controller: &WeatherController) -> anyhow::Result<()> {
    loop {
        let prompt = Text::new("City:").with_help_message(PROMPT_HELP);
        let line = match prompt.prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let _ = match line.trim() {
            "/quit" => break,
            "/here" => controller.submit_location_query().await,
            _ => controller.submit_city_query(&line).await,
        };

        write_state(&controller.state(), &mut io::stdout(), &mut io::stderr())
            .context("Failed to write output")?;
        println!();
    }

    Ok(())
}
