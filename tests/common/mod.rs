#![allow(dead_code)]

use serde_json::{Value, json};
use spi_dashboard::{
    app::{events::AppEvent, state::AppState},
    data::spi::SpiClient,
    domain::spi::{Comparison, CurrentIndex, Forecast, ForecastSummary, QueryParams},
    run_until_settled,
};
use tokio::sync::mpsc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const CURRENT_PATH: &str = "/spi/by-coords";
pub const COMPARISON_PATH: &str = "/spi/multi-by-coords";
pub const FORECAST_PATH: &str = "/spi/forecast-by-coords";
pub const SUMMARY_PATH: &str = "/spi/forecast-summary-by-coords";
pub const FIELDS_PATH: &str = "/fields";

pub struct Harness {
    pub app: AppState,
    pub tx: mpsc::Sender<AppEvent>,
    pub rx: mpsc::Receiver<AppEvent>,
}

impl Harness {
    pub fn new(server: &MockServer) -> Self {
        Self::with_params(server, QueryParams::default())
    }

    pub fn with_params(server: &MockServer, params: QueryParams) -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            app: AppState::with_client(SpiClient::with_base_url(server.uri()), params),
            tx,
            rx,
        }
    }

    pub fn send(&mut self, event: AppEvent) {
        self.app.handle_event(event, &self.tx);
    }

    pub async fn settle(&mut self) {
        run_until_settled(&mut self.app, &self.tx, &mut self.rx).await;
    }

    pub async fn run_all(&mut self) {
        self.send(AppEvent::RunAll);
        self.settle().await;
    }
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_detail_error(server: &MockServer, route: &str, status: u16, detail: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "detail": detail })))
        .mount(server)
        .await;
}

pub fn current_body(spi: f64, category: &str, spi_30: f64) -> Value {
    json!({
        "lat": 47.0188,
        "lon": 39.9324,
        "scale_months": 3,
        "end_date": "2025-06-30",
        "spi": spi,
        "category": category,
        "recommendations": ["Check soil moisture weekly."],
        "forecast": {
            "spi_30": spi_30,
            "category": "норма по влажности",
            "recommendations": []
        },
        "history": [
            { "date": "2025-06-29", "spi": -0.81 },
            { "date": "2025-06-30", "spi": spi }
        ]
    })
}

pub fn comparison_body() -> Value {
    json!({
        "end_date": "2025-06-30",
        "history_years": 10,
        "items": [
            { "scale_months": 1, "spi": -0.91, "category": "умеренная засуха" },
            { "scale_months": 3, "spi": -0.62, "category": null },
            { "scale_months": 6, "spi": 0.55, "category": "избыточно влажные условия" }
        ]
    })
}

pub fn forecast_body() -> Value {
    json!({
        "latest_spi": -0.62,
        "latest_category": "слабо засушливые условия",
        "forecast_days": 2,
        "end_date": "2025-06-30",
        "scale_months": 3,
        "history_years": 10,
        "forecast": [
            { "date": "2025-07-01", "spi": -0.55, "category": "слабо засушливые условия", "recommendations": [] },
            { "date": "2025-07-02", "spi": -0.3, "category": "норма по влажности", "recommendations": [] }
        ]
    })
}

pub fn summary_body() -> Value {
    json!({
        "latest_spi": 0.1,
        "latest_category": "норма по влажности",
        "sarima_spi_30": 0.05,
        "sarima_category": "норма по влажности",
        "sarima_recommendations": ["Keep the usual irrigation schedule."],
        "end_date": "2025-06-30",
        "forecast_days": 7
    })
}

pub fn field_body(id: &str, name: &str, lat: f64, lon: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "lat": lat,
        "lon": lon,
        "area_ha": 12.5,
        "has_irrigation": false,
        "soil_type": "chernozem",
        "created_at": "2025-05-01T08:00:00"
    })
}

pub fn current_payload() -> CurrentIndex {
    serde_json::from_value(current_body(-0.62, "слабо засушливые условия", -0.4))
        .expect("current fixture")
}

pub fn comparison_payload() -> Comparison {
    serde_json::from_value(comparison_body()).expect("comparison fixture")
}

pub fn forecast_payload() -> Forecast {
    serde_json::from_value(forecast_body()).expect("forecast fixture")
}

pub fn summary_payload() -> ForecastSummary {
    serde_json::from_value(summary_body()).expect("summary fixture")
}
