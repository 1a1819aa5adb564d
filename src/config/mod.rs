use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Password that unlocks the admin session
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Prefix shown in front of project budgets
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// File the tracing output is written to
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_database_url() -> String {
    "sqlite://Database.db".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

fn default_log_file() -> String {
    "project_tracker.log".to_string()
}

/// Command line overrides
#[derive(Debug, Parser)]
#[command(name = "project_tracker", about = "Track projects, people and tasks")]
pub struct Cli {
    /// SQLite URL of the store, e.g. sqlite://Database.db
    #[arg(long)]
    pub database: Option<String>,

    /// Where to write the log
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build a configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(vars)?)
    }

    /// Apply command line overrides on top of the environment
    pub fn apply_cli(&mut self, cli: Cli) {
        if let Some(database) = cli.database {
            self.database_url = database;
        }
        if let Some(log_file) = cli.log_file {
            self.log_file = log_file;
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Render a budget with the configured currency prefix
    pub fn format_budget(&self, budget: &str) -> String {
        format!("{}{}", self.currency_symbol, budget.trim())
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    config.apply_cli(cli);

    Ok(config)
}
