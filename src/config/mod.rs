pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::DisplayCurrency;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-etl")]
#[command(about = "Search hotel listings for a city, rank them by review points and export a CSV")]
pub struct CliConfig {
    /// City to search, e.g. Paris, London, Berlin
    #[arg(long)]
    pub city: String,

    /// Check-in date (DD/MM/YYYY)
    #[arg(long)]
    pub checkin: String,

    /// Check-out date (DD/MM/YYYY)
    #[arg(long)]
    pub checkout: String,

    #[arg(long, value_enum, default_value_t = DisplayCurrency::Base)]
    pub currency: DisplayCurrency,

    /// Path to TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Override the directory the CSV is written to
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print the top listings as JSON instead of a table")]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔（沒有就用內建預設），再套用命令列覆蓋
    pub fn load_settings(&self) -> Result<toml_config::SearchConfig> {
        let mut settings = match &self.config {
            Some(path) => toml_config::SearchConfig::from_file(path)?,
            None => toml_config::SearchConfig::default(),
        };

        if let Some(output_path) = &self.output_path {
            settings.load.output_path = output_path.clone();
        }

        Ok(settings)
    }
}
