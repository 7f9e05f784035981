#![allow(clippy::missing_errors_doc)]

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::{
    data::spi::DEFAULT_API_URL,
    domain::spi::{COMPARISON_WINDOWS, QueryParams},
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogFormatArg {
    Text,
    Json,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "spi-dashboard",
    version,
    about = "Drought and moisture (SPI) dashboard for a point"
)]
pub struct Cli {
    /// Base URL of the SPI analytics service
    #[arg(long, env = "SPI_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// SPI window in months (1..24)
    #[arg(long, default_value_t = 3)]
    pub window_months: u32,

    /// Years of history used to fit the distribution (1..50)
    #[arg(long, default_value_t = 10)]
    pub history_years: u32,

    /// Weather-driven forecast horizon in days (1..16)
    #[arg(long, default_value_t = 7)]
    pub forecast_days: u32,

    /// Last day of the analysed period, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Read points and commands from stdin
    #[arg(long)]
    pub interactive: bool,

    /// Print the compact 30-day projection summary and exit
    #[arg(long, conflicts_with = "interactive")]
    pub summary: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (None, None) if !self.interactive => {
                anyhow::bail!("--lat and --lon are required unless --interactive is set")
            }
            (Some(lat), Some(lon)) if !lat.is_finite() || !lon.is_finite() => {
                anyhow::bail!("--lat and --lon must be finite numbers")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn query_params(&self) -> QueryParams {
        let defaults = QueryParams::default();
        QueryParams {
            latitude: self.lat.unwrap_or(defaults.latitude),
            longitude: self.lon.unwrap_or(defaults.longitude),
            window_months: self.window_months,
            history_years: self.history_years,
            forecast_horizon_days: self.forecast_days,
            comparison_windows: COMPARISON_WINDOWS.to_vec(),
            end_date: self.end_date,
        }
    }
}
