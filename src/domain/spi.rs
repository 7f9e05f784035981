use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Windows compared side by side for one point.
pub const COMPARISON_WINDOWS: [u32; 3] = [1, 3, 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Current,
    Comparison,
    Forecast,
    Summary,
    Fields,
    Field,
}

impl OperationKind {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Current => "/spi/by-coords",
            Self::Comparison => "/spi/multi-by-coords",
            Self::Forecast => "/spi/forecast-by-coords",
            Self::Summary => "/spi/forecast-summary-by-coords",
            Self::Fields | Self::Field => "/fields",
        }
    }

    /// Message shown when the service gives no explanation of its own.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Current => "SPI request failed",
            Self::Comparison => "SPI window comparison request failed",
            Self::Forecast => "SPI forecast request failed",
            Self::Summary => "SPI forecast summary request failed",
            Self::Fields => "Saved fields request failed",
            Self::Field => "Field lookup failed",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Comparison => "comparison",
            Self::Forecast => "forecast",
            Self::Summary => "summary",
            Self::Fields => "fields",
            Self::Field => "field",
        }
    }
}

/// Inputs for one user action. Ranges are enforced by whoever collects the
/// values; everything here is forwarded to the service as given.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub latitude: f64,
    pub longitude: f64,
    pub window_months: u32,
    pub history_years: u32,
    pub forecast_horizon_days: u32,
    pub comparison_windows: Vec<u32>,
    pub end_date: Option<NaiveDate>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            latitude: 47.0188,
            longitude: 39.9324,
            window_months: 3,
            history_years: 10,
            forecast_horizon_days: 7,
            comparison_windows: COMPARISON_WINDOWS.to_vec(),
            end_date: None,
        }
    }
}

impl QueryParams {
    #[must_use]
    pub fn at(&self, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..self.clone()
        }
    }

    pub fn current_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.coords();
        query.push(("scale_months", self.window_months.to_string()));
        query.push(("history_years", self.history_years.to_string()));
        self.push_end_date(&mut query);
        query
    }

    pub fn comparison_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.coords();
        query.push(("history_years", self.history_years.to_string()));
        query.extend(
            self.comparison_windows
                .iter()
                .map(|window| ("scales", window.to_string())),
        );
        self.push_end_date(&mut query);
        query
    }

    pub fn forecast_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.coords();
        query.push(("scale_months", self.window_months.to_string()));
        query.push(("history_years", self.history_years.to_string()));
        query.push(("forecast_days", self.forecast_horizon_days.to_string()));
        self.push_end_date(&mut query);
        query
    }

    fn coords(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.latitude.to_string()),
            ("lon", self.longitude.to_string()),
        ]
    }

    fn push_end_date(&self, query: &mut Vec<(&'static str, String)>) {
        if let Some(date) = self.end_date {
            query.push(("end_date", date.format("%Y-%m-%d").to_string()));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryPoint {
    #[serde(deserialize_with = "lenient_opt")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub spi: Option<f64>,
}

/// 30-day statistical projection bundled with the current index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastDelta {
    #[serde(deserialize_with = "lenient_f64")]
    pub spi_30: Option<f64>,
    #[serde(deserialize_with = "lenient_opt")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentIndex {
    #[serde(rename = "lat", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "lon", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(rename = "scale_months", deserialize_with = "lenient_u32")]
    pub window_months: Option<u32>,
    #[serde(deserialize_with = "lenient_opt")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub spi: Option<f64>,
    #[serde(deserialize_with = "lenient_opt")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub recommendations: Vec<String>,
    #[serde(deserialize_with = "lenient_opt")]
    pub forecast: Option<ForecastDelta>,
    #[serde(deserialize_with = "lenient_vec")]
    pub history: Vec<HistoryPoint>,
}

impl CurrentIndex {
    /// Projected 30-day SPI minus the current SPI, when both are known.
    #[must_use]
    pub fn projection_delta(&self) -> Option<f64> {
        let projected = self.forecast.as_ref()?.spi_30?;
        Some(projected - self.spi?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComparisonItem {
    #[serde(rename = "scale_months", deserialize_with = "lenient_u32")]
    pub window_months: Option<u32>,
    #[serde(deserialize_with = "lenient_f64")]
    pub spi: Option<f64>,
    #[serde(deserialize_with = "lenient_opt")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Comparison {
    #[serde(deserialize_with = "lenient_opt")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub history_years: Option<u32>,
    #[serde(deserialize_with = "lenient_vec")]
    pub items: Vec<ComparisonItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastPoint {
    #[serde(deserialize_with = "lenient_opt")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub spi: Option<f64>,
    #[serde(deserialize_with = "lenient_opt")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Forecast {
    #[serde(deserialize_with = "lenient_f64")]
    pub latest_spi: Option<f64>,
    #[serde(deserialize_with = "lenient_opt")]
    pub latest_category: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub forecast_days: Option<u32>,
    #[serde(deserialize_with = "lenient_opt")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub scale_months: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub history_years: Option<u32>,
    #[serde(deserialize_with = "lenient_vec")]
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastSummary {
    #[serde(deserialize_with = "lenient_f64")]
    pub latest_spi: Option<f64>,
    #[serde(deserialize_with = "lenient_opt")]
    pub latest_category: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sarima_spi_30: Option<f64>,
    #[serde(deserialize_with = "lenient_opt")]
    pub sarima_category: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub sarima_recommendations: Vec<String>,
    #[serde(deserialize_with = "lenient_opt")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub forecast_days: Option<u32>,
}

impl ForecastSummary {
    #[must_use]
    pub fn projection_delta(&self) -> Option<f64> {
        Some(self.sarima_spi_30? - self.latest_spi?)
    }
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

/// Null or wrong-typed values decode as absent.
pub(crate) fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Anything but an array decodes as empty; elements that do not fit are dropped.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}
