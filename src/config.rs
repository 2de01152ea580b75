use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "expense-tracker.toml";
const ENV_PREFIX: &str = "EXPENSE_TRACKER";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// File offered by the save and load prompts when the answer is empty.
    pub data_file: PathBuf,
    /// Load `data_file` before showing the menu.
    pub load_on_start: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("expenses.json"),
            load_on_start: false,
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "expense-tracker", version, about = "Home expense tracker")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Default file for save and load.
    #[arg(long)]
    pub data_file: Option<PathBuf>,
    /// Load the data file before the menu starts.
    #[arg(long)]
    pub load: bool,
    /// Log filter, e.g. `info` or `expense_tracker=debug`.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn load() -> Result<AppConfig, config::ConfigError> {
    resolve(Args::parse())
}

/// Layer defaults, the config file, `EXPENSE_TRACKER_*` variables and
/// finally command-line flags.
pub fn resolve(args: Args) -> Result<AppConfig, config::ConfigError> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::from(config_path).required(args.config.is_some()));
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_file) = args.data_file {
        settings.data_file = data_file;
    }
    if args.load {
        settings.load_on_start = true;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
