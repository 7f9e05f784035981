use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    app::{
        events::AppEvent,
        lifecycle::{FetchStatus, Lifecycle},
    },
    cli::Cli,
    data::{error::FetchError, spi::SpiClient},
    domain::{
        field::Field,
        spi::{Comparison, CurrentIndex, Forecast, OperationKind, QueryParams},
        view::{CurrentView, DashboardView, ForecastView, comparison_rows},
    },
    resilience::epoch::RequestEpochs,
};

mod methods_fetch;

/// Owns the three fetch lifecycles. Only the event loop mutates it; request
/// tasks report back through `AppEvent`s.
#[derive(Debug)]
pub struct AppState {
    /// Cleared by `Quit`; the interactive loop exits once this is false and
    /// nothing is loading.
    pub running: bool,
    pub params: QueryParams,
    pub current: Lifecycle<CurrentIndex>,
    pub comparison: Lifecycle<Comparison>,
    pub forecast: Lifecycle<Forecast>,
    pub fields: Lifecycle<Vec<Field>>,
    pub selected_field: Lifecycle<Field>,
    /// False until a point has been chosen; run commands are refused before.
    pub point_selected: bool,
    pub epochs: RequestEpochs,
    pub client: SpiClient,
    report_due: bool,
    listing_due: bool,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let client =
            SpiClient::with_timeout(cli.api_url.clone(), Duration::from_secs(cli.timeout_secs));
        let mut state = Self::with_client(client, cli.query_params());
        state.point_selected = cli.lat.is_some() && cli.lon.is_some();
        state
    }

    pub fn with_client(client: SpiClient, params: QueryParams) -> Self {
        Self {
            running: true,
            params,
            current: Lifecycle::idle(),
            comparison: Lifecycle::idle(),
            forecast: Lifecycle::idle(),
            fields: Lifecycle::idle(),
            selected_field: Lifecycle::idle(),
            point_selected: true,
            epochs: RequestEpochs::new(),
            client,
            report_due: false,
            listing_due: false,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent, tx: &mpsc::Sender<AppEvent>) {
        match event {
            AppEvent::PointSelected {
                latitude,
                longitude,
            } => self.handle_point_selected(latitude, longitude),
            AppEvent::RunCurrent | AppEvent::RunForecast | AppEvent::RunAll
                if !self.point_selected =>
            {
                warn!("no point selected yet; enter `<lat> <lon>` or `field <id>` first");
            }
            AppEvent::RunCurrent => self.run_current_and_comparison(tx),
            AppEvent::RunForecast => self.run_forecast(tx),
            AppEvent::RunAll => self.run_all(tx),
            AppEvent::ListFields => self.list_fields(tx),
            AppEvent::SelectField { id } => self.select_field(tx, id),
            AppEvent::CurrentSettled {
                epoch,
                params,
                result,
            } => self.handle_current_settled(tx, epoch, params, result),
            AppEvent::ComparisonSettled { epoch, result } => {
                self.handle_comparison_settled(epoch, result);
            }
            AppEvent::ForecastSettled { epoch, result } => {
                self.handle_forecast_settled(epoch, result);
            }
            AppEvent::FieldsSettled { epoch, result } => {
                self.handle_fields_settled(epoch, result);
            }
            AppEvent::FieldSettled { epoch, result } => {
                self.handle_field_settled(tx, epoch, result);
            }
            AppEvent::Quit => self.running = false,
        }
    }

    pub(crate) fn handle_point_selected(&mut self, latitude: f64, longitude: f64) {
        if !latitude.is_finite() || !longitude.is_finite() {
            warn!(latitude, longitude, "ignoring non-finite point selection");
            return;
        }
        info!(latitude, longitude, "point selected");
        self.params = self.params.at(latitude, longitude);
        self.point_selected = true;
        self.selected_field = Lifecycle::idle();
    }

    pub(crate) fn handle_current_settled(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        epoch: u64,
        params: QueryParams,
        result: Result<CurrentIndex, FetchError>,
    ) {
        if !self.accepts(OperationKind::Current, epoch) {
            return;
        }
        match result {
            Ok(payload) => {
                debug!(spi = ?payload.spi, "current index settled");
                self.current = Lifecycle::success(payload);
                self.start_comparison(tx, params);
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "current index request failed");
                self.current = Lifecycle::error(err.to_string());
                self.epochs.invalidate(OperationKind::Comparison);
                self.comparison = Lifecycle::idle();
            }
        }
    }

    pub(crate) fn handle_comparison_settled(
        &mut self,
        epoch: u64,
        result: Result<Comparison, FetchError>,
    ) {
        if !self.accepts(OperationKind::Comparison, epoch) {
            return;
        }
        self.comparison = match result {
            Ok(payload) => {
                debug!(windows = payload.items.len(), "comparison settled");
                Lifecycle::success(payload)
            }
            Err(err) => {
                warn!(error = %err, "window comparison failed; keeping current index");
                Lifecycle::error(err.to_string())
            }
        };
    }

    pub(crate) fn handle_forecast_settled(
        &mut self,
        epoch: u64,
        result: Result<Forecast, FetchError>,
    ) {
        if !self.accepts(OperationKind::Forecast, epoch) {
            return;
        }
        self.forecast = match result {
            Ok(payload) => {
                debug!(days = payload.forecast.len(), "forecast settled");
                Lifecycle::success(payload)
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "forecast request failed");
                Lifecycle::error(err.to_string())
            }
        };
    }

    pub(crate) fn handle_fields_settled(
        &mut self,
        epoch: u64,
        result: Result<Vec<Field>, FetchError>,
    ) {
        if !self.accepts(OperationKind::Fields, epoch) {
            return;
        }
        self.fields = match result {
            Ok(fields) => {
                debug!(count = fields.len(), "saved fields settled");
                Lifecycle::success(fields)
            }
            Err(err) => {
                warn!(error = %err, "saved fields request failed");
                Lifecycle::error(err.to_string())
            }
        };
        self.listing_due = true;
    }

    /// A looked-up field becomes the selected point and everything reruns.
    pub(crate) fn handle_field_settled(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        epoch: u64,
        result: Result<Field, FetchError>,
    ) {
        if !self.accepts(OperationKind::Field, epoch) {
            return;
        }
        match result {
            Ok(field) => match field.point() {
                Some((latitude, longitude)) => {
                    self.handle_point_selected(latitude, longitude);
                    self.selected_field = Lifecycle::success(field);
                    self.run_all(tx);
                }
                None => {
                    warn!(id = ?field.id, "field has no coordinates");
                    self.selected_field = Lifecycle::error("Field has no coordinates".to_string());
                    self.report_due = true;
                }
            },
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "field lookup failed");
                self.selected_field = Lifecycle::error(err.to_string());
                self.report_due = true;
            }
        }
    }

    fn accepts(&self, kind: OperationKind, epoch: u64) -> bool {
        if self.epochs.is_current(kind, epoch) {
            return true;
        }
        debug!(
            operation = kind.label(),
            epoch,
            latest = self.epochs.latest(kind),
            "discarding stale response"
        );
        false
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        !(self.current.is_loading()
            || self.comparison.is_loading()
            || self.forecast.is_loading()
            || self.fields.is_loading()
            || self.selected_field.is_loading())
    }

    /// The report, once per run, as soon as nothing is loading.
    pub fn take_report(&mut self) -> Option<DashboardView> {
        if !self.report_due || !self.is_settled() {
            return None;
        }
        self.report_due = false;
        Some(self.view())
    }

    /// The saved-field listing, once per `fields` request.
    pub fn take_field_listing(&mut self) -> Option<&Lifecycle<Vec<Field>>> {
        if !std::mem::take(&mut self.listing_due) {
            return None;
        }
        Some(&self.fields)
    }

    /// Rebuilds the classified view from the lifecycles.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        let loading = [
            (OperationKind::Current, self.current.status),
            (OperationKind::Comparison, self.comparison.status),
            (OperationKind::Forecast, self.forecast.status),
        ]
        .into_iter()
        .filter(|(_, status)| *status == FetchStatus::Loading)
        .map(|(kind, _)| kind.label())
        .collect();

        DashboardView {
            current: self.current.result.as_ref().map(CurrentView::from_payload),
            current_error: self.current.error_message.clone(),
            field: self.selected_field.result.clone(),
            field_error: self.selected_field.error_message.clone(),
            comparison: self.comparison.result.as_ref().map(comparison_rows),
            comparison_warning: self.comparison.error_message.clone(),
            forecast: self.forecast.result.as_ref().map(ForecastView::from_payload),
            forecast_error: self.forecast.error_message.clone(),
            loading,
        }
    }
}
