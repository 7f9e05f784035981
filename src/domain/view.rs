//! Classified view model. Always rebuilt from the raw payloads, never edited.

use crate::domain::{
    classify::{Trend, WaterStatus, forecast_trend, simplify_category, water_status},
    field::Field,
    spi::{Comparison, CurrentIndex, Forecast, ForecastSummary, HistoryPoint},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionView {
    pub spi_30: Option<f64>,
    pub status: WaterStatus,
    pub category: String,
    pub delta: Option<f64>,
    pub trend: Option<Trend>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDigest {
    pub points: usize,
    pub min_spi: f64,
    pub max_spi: f64,
    pub last_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub window_months: Option<u32>,
    pub end_date: Option<String>,
    pub spi: Option<f64>,
    pub status: WaterStatus,
    pub category: String,
    pub raw_category: Option<String>,
    pub recommendations: Vec<String>,
    pub projection: Option<ProjectionView>,
    pub history: Option<HistoryDigest>,
}

impl CurrentView {
    #[must_use]
    pub fn from_payload(payload: &CurrentIndex) -> Self {
        let delta = payload.projection_delta();
        let projection = payload.forecast.as_ref().map(|forecast| ProjectionView {
            spi_30: forecast.spi_30,
            status: water_status(forecast.spi_30),
            category: simplify_category(forecast.category.as_deref()),
            delta,
            trend: forecast_trend(delta),
            recommendations: forecast.recommendations.clone(),
        });

        Self {
            latitude: payload.latitude,
            longitude: payload.longitude,
            window_months: payload.window_months,
            end_date: payload.end_date.clone(),
            spi: payload.spi,
            status: water_status(payload.spi),
            category: simplify_category(payload.category.as_deref()),
            raw_category: payload.category.clone(),
            recommendations: payload.recommendations.clone(),
            projection,
            history: digest_history(&payload.history),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub window_months: Option<u32>,
    pub spi: Option<f64>,
    pub status: WaterStatus,
    pub category: String,
}

#[must_use]
pub fn comparison_rows(payload: &Comparison) -> Vec<ComparisonRow> {
    payload
        .items
        .iter()
        .map(|item| ComparisonRow {
            window_months: item.window_months,
            spi: item.spi,
            status: water_status(item.spi),
            category: simplify_category(item.category.as_deref()),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDayView {
    pub date: Option<String>,
    pub spi: Option<f64>,
    pub status: WaterStatus,
    pub category: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub latest_spi: Option<f64>,
    pub latest_status: WaterStatus,
    pub latest_category: String,
    pub forecast_days: Option<u32>,
    pub days: Vec<ForecastDayView>,
}

impl ForecastView {
    #[must_use]
    pub fn from_payload(payload: &Forecast) -> Self {
        Self {
            latest_spi: payload.latest_spi,
            latest_status: water_status(payload.latest_spi),
            latest_category: simplify_category(payload.latest_category.as_deref()),
            forecast_days: payload.forecast_days,
            days: payload
                .forecast
                .iter()
                .map(|point| ForecastDayView {
                    date: point.date.clone(),
                    spi: point.spi,
                    status: water_status(point.spi),
                    category: simplify_category(point.category.as_deref()),
                    recommendations: point.recommendations.clone(),
                })
                .collect(),
        }
    }

    /// Last projected day, if the service returned any.
    #[must_use]
    pub fn horizon_end(&self) -> Option<&ForecastDayView> {
        self.days.last()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub latest_spi: Option<f64>,
    pub latest_status: WaterStatus,
    pub latest_category: String,
    pub projection: ProjectionView,
}

impl SummaryView {
    #[must_use]
    pub fn from_payload(payload: &ForecastSummary) -> Self {
        let delta = payload.projection_delta();
        Self {
            latest_spi: payload.latest_spi,
            latest_status: water_status(payload.latest_spi),
            latest_category: simplify_category(payload.latest_category.as_deref()),
            projection: ProjectionView {
                spi_30: payload.sarima_spi_30,
                status: water_status(payload.sarima_spi_30),
                category: simplify_category(payload.sarima_category.as_deref()),
                delta,
                trend: forecast_trend(delta),
                recommendations: payload.sarima_recommendations.clone(),
            },
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    /// Saved field the point came from, if any.
    pub field: Option<Field>,
    pub field_error: Option<String>,
    pub current: Option<CurrentView>,
    pub current_error: Option<String>,
    /// `None` until the comparison succeeds; may then hold zero rows.
    pub comparison: Option<Vec<ComparisonRow>>,
    pub comparison_warning: Option<String>,
    pub forecast: Option<ForecastView>,
    pub forecast_error: Option<String>,
    pub loading: Vec<&'static str>,
}

fn digest_history(history: &[HistoryPoint]) -> Option<HistoryDigest> {
    let values: Vec<f64> = history.iter().filter_map(|p| p.spi).collect();
    if values.is_empty() {
        return None;
    }
    let min_spi = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_spi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(HistoryDigest {
        points: values.len(),
        min_spi,
        max_spi,
        last_date: history.iter().rev().find_map(|p| p.date.clone()),
    })
}
