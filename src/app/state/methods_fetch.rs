use super::*;

impl AppState {
    pub fn run_all(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.run_current_and_comparison(tx);
        self.run_forecast(tx);
    }

    /// Starts the current-index fetch. The comparison fetch follows only once
    /// the current index has succeeded.
    pub fn run_current_and_comparison(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let epoch = self.epochs.issue(OperationKind::Current);
        self.epochs.invalidate(OperationKind::Comparison);
        self.current = Lifecycle::loading();
        self.comparison = Lifecycle::idle();
        self.report_due = true;

        let params = self.params.clone();
        debug!(epoch, lat = params.latitude, lon = params.longitude, "current index requested");
        let client = self.client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_current(&params).await;
            let _ = tx2
                .send(AppEvent::CurrentSettled {
                    epoch,
                    params,
                    result,
                })
                .await;
        });
    }

    pub fn run_forecast(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let epoch = self.epochs.issue(OperationKind::Forecast);
        self.forecast = Lifecycle::loading();
        self.report_due = true;

        let params = self.params.clone();
        debug!(epoch, days = params.forecast_horizon_days, "forecast requested");
        let client = self.client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_forecast(&params).await;
            let _ = tx2.send(AppEvent::ForecastSettled { epoch, result }).await;
        });
    }

    pub(crate) fn start_comparison(&mut self, tx: &mpsc::Sender<AppEvent>, params: QueryParams) {
        let epoch = self.epochs.issue(OperationKind::Comparison);
        self.comparison = Lifecycle::loading();

        debug!(epoch, windows = ?params.comparison_windows, "comparison requested");
        let client = self.client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_comparison(&params).await;
            let _ = tx2.send(AppEvent::ComparisonSettled { epoch, result }).await;
        });
    }

    pub fn list_fields(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let epoch = self.epochs.issue(OperationKind::Fields);
        self.fields = Lifecycle::loading();

        debug!(epoch, "saved fields requested");
        let client = self.client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_fields().await;
            let _ = tx2.send(AppEvent::FieldsSettled { epoch, result }).await;
        });
    }

    pub fn select_field(&mut self, tx: &mpsc::Sender<AppEvent>, id: String) {
        let epoch = self.epochs.issue(OperationKind::Field);
        self.selected_field = Lifecycle::loading();

        debug!(epoch, %id, "field lookup requested");
        let client = self.client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_field(&id).await;
            let _ = tx2.send(AppEvent::FieldSettled { epoch, result }).await;
        });
    }
}
