use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{Config, HistoryError, HistoryStore, WeatherRecord, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup with search history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for the weather provider.
    Configure,

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// Inspect or edit the search history.
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List previously looked-up cities with their ids.
    List,

    /// Remove one entry by id.
    Remove {
        /// Entry id as printed by `history list`.
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::History { command } => history(command),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("Provider API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let store = HistoryStore::new(config.history_file_path()?);

    let records = provider
        .resolve_weather(city)
        .await
        .with_context(|| format!("Failed to resolve weather for \"{city}\""))?;

    print!("{}", render_records(&records));

    // Recording the lookup is an independent side effect; a city that is
    // already in the history is not a failed lookup.
    match store.add(city) {
        Ok(_) => {}
        Err(HistoryError::Duplicate(_)) => {
            tracing::debug!(city, "city already in search history");
        }
        Err(e) => return Err(e).context("Failed to record city in search history"),
    }

    Ok(())
}

fn history(command: HistoryCommand) -> anyhow::Result<()> {
    let config = Config::load()?;
    let store = HistoryStore::new(config.history_file_path()?);

    match command {
        HistoryCommand::List => {
            let entries = store.list().context("Failed to read search history")?;
            if entries.is_empty() {
                println!("Search history is empty.");
                return Ok(());
            }
            for entry in entries {
                println!("{}  {}", entry.id, entry.name);
            }
        }
        HistoryCommand::Remove { id } => {
            store.remove(&id).context("Failed to remove history entry")?;
            println!("Removed {id} from search history.");
        }
    }

    Ok(())
}

fn render_records(records: &[WeatherRecord]) -> String {
    let mut output = String::new();

    let Some((current, forecast)) = records.split_first() else {
        return output;
    };

    output.push_str(&format!(
        "Current weather in {} ({}): {}\n  Temperature: {:.2}\u{00b0}F\n  Wind: {:.1} m/s\n  Humidity: {}%\n",
        current.city,
        current.date,
        current.description,
        current.temperature_f,
        current.wind_speed,
        current.humidity_pct
    ));

    if !forecast.is_empty() {
        output.push_str("\nForecast:\n");
        for day in forecast {
            output.push_str(&format!(
                "  {}: {}, {:.2}\u{00b0}F, wind {:.1} m/s, humidity {}%\n",
                day.date, day.description, day.temperature_f, day.wind_speed, day.humidity_pct
            ));
        }
    }

    output
}
