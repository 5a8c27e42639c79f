use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, PasswordDisplayMode};
use weatherdash_core::{
    Config, Dashboard, LocalStore, RecentSearches, ThemePreference, provider_from_config,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive dashboard.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// List recent searches, most recent first.
    Recent,

    /// Show or change the color theme.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Interactive dashboard (default).
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

impl ThemeAction {
    fn apply(self, current: ThemePreference) -> ThemePreference {
        match self {
            ThemeAction::Toggle => current.toggle(),
            ThemeAction::Light => ThemePreference::Light,
            ThemeAction::Dark => ThemePreference::Dark,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure => configure(),
            Command::Show { city } => show(&mut open_dashboard()?, &city).await,
            Command::Recent => {
                let store = open_store()?;
                let recent = RecentSearches::load(&store);
                render::print_recent(&recent, ThemePreference::load(&store));
                Ok(())
            }
            Command::Theme { action } => {
                let mut store = open_store()?;
                let mut theme = ThemePreference::load(&store);
                if let Some(action) = action {
                    theme = action.apply(theme);
                    theme.persist(&mut store)?;
                }
                render::print_theme(theme);
                Ok(())
            }
            Command::Dashboard => interactive::run(open_dashboard()?).await,
        }
    }
}

/// One search. A failure is returned for `main` to report instead of being
/// rendered.
async fn show(dash: &mut Dashboard, city: &str) -> anyhow::Result<()> {
    dash.search(city).await?;
    render::print_dashboard(dash);
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    cfg.set_api_key(api_key.to_string());
    cfg.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

fn open_store() -> anyhow::Result<LocalStore> {
    let store = LocalStore::open(Config::state_file_path()?);
    tracing::debug!(path = %store.path().display(), "Opened local state");
    Ok(store)
}

fn open_dashboard() -> anyhow::Result<Dashboard> {
    let cfg = Config::load()?;
    let provider = provider_from_config(&cfg)?;
    Ok(Dashboard::new(provider, open_store()?))
}
