use crate::{
    app::state::AppState,
    data::spi::SpiClient,
    domain::spi::{
        Comparison, ComparisonItem, CurrentIndex, Forecast, ForecastDelta, ForecastPoint,
        HistoryPoint, QueryParams,
    },
};

pub(crate) fn unreachable_state() -> AppState {
    AppState::with_client(
        SpiClient::with_base_url("http://127.0.0.1:1"),
        QueryParams::default(),
    )
}

pub(crate) fn sample_current(spi: f64) -> CurrentIndex {
    CurrentIndex {
        latitude: Some(47.0188),
        longitude: Some(39.9324),
        window_months: Some(3),
        end_date: Some("2025-06-30".to_string()),
        spi: Some(spi),
        category: Some("слабо засушливые условия".to_string()),
        recommendations: vec!["Check soil moisture more often.".to_string()],
        forecast: Some(ForecastDelta {
            spi_30: Some(spi + 0.1),
            category: Some("норма по влажности".to_string()),
            recommendations: vec!["Plan field work as usual.".to_string()],
        }),
        history: vec![
            HistoryPoint {
                date: Some("2025-06-29".to_string()),
                spi: Some(spi - 0.2),
            },
            HistoryPoint {
                date: Some("2025-06-30".to_string()),
                spi: Some(spi),
            },
        ],
    }
}

pub(crate) fn sample_comparison() -> Comparison {
    Comparison {
        end_date: Some("2025-06-30".to_string()),
        history_years: Some(10),
        items: [(1, -0.9), (3, -0.62), (6, 0.2)]
            .into_iter()
            .map(|(window, spi)| ComparisonItem {
                window_months: Some(window),
                spi: Some(spi),
                category: None,
            })
            .collect(),
    }
}

pub(crate) fn sample_forecast() -> Forecast {
    Forecast {
        latest_spi: Some(-0.62),
        latest_category: Some("слабо засушливые условия".to_string()),
        forecast_days: Some(2),
        end_date: Some("2025-06-30".to_string()),
        scale_months: Some(3),
        history_years: Some(10),
        forecast: vec![
            ForecastPoint {
                date: Some("2025-07-01".to_string()),
                spi: Some(-0.55),
                category: Some("слабо засушливые условия".to_string()),
                recommendations: Vec::new(),
            },
            ForecastPoint {
                date: Some("2025-07-02".to_string()),
                spi: Some(-0.3),
                category: Some("норма по влажности".to_string()),
                recommendations: Vec::new(),
            },
        ],
    }
}
