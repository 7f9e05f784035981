//! Plain-text rendering of the classified view for the terminal.

use crate::{
    app::lifecycle::{FetchStatus, Lifecycle},
    domain::{
        field::Field,
        view::{
            ComparisonRow, CurrentView, DashboardView, ForecastDayView, ForecastView,
            ProjectionView, SummaryView,
        },
    },
};

const MISSING: &str = "n/a";

#[must_use]
pub fn render_report(view: &DashboardView) -> String {
    let is_loading = |label: &str| view.loading.iter().any(|l| *l == label);

    let mut sections: Vec<Vec<String>> = Vec::new();

    if let Some(field) = &view.field {
        sections.push(vec![field_header(field)]);
    } else if let Some(err) = &view.field_error {
        sections.push(vec![format!("Field: error: {err}")]);
    }

    if let Some(current) = &view.current {
        sections.push(current_lines(current));
    } else if let Some(err) = &view.current_error {
        sections.push(vec![format!("SPI: error: {err}")]);
    } else if is_loading("current") {
        sections.push(vec!["SPI: loading...".to_string()]);
    }

    if let Some(rows) = &view.comparison {
        if rows.is_empty() {
            sections.push(vec!["Window comparison: no windows returned".to_string()]);
        } else {
            let mut lines = vec!["Window comparison".to_string()];
            lines.extend(rows.iter().map(comparison_line));
            sections.push(lines);
        }
    } else if let Some(warning) = &view.comparison_warning {
        sections.push(vec![format!("Window comparison unavailable: {warning}")]);
    } else if is_loading("comparison") {
        sections.push(vec!["Window comparison: loading...".to_string()]);
    }

    if let Some(forecast) = &view.forecast {
        sections.push(forecast_lines(forecast));
    } else if let Some(err) = &view.forecast_error {
        sections.push(vec![format!("Forecast: error: {err}")]);
    } else if is_loading("forecast") {
        sections.push(vec!["Forecast: loading...".to_string()]);
    }

    let mut out = sections
        .iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

#[must_use]
pub fn render_summary(view: &SummaryView) -> String {
    let mut lines = vec![format!(
        "SPI {}  {} ({})",
        fmt_spi(view.latest_spi),
        view.latest_status.label,
        view.latest_category
    )];
    lines.extend(projection_lines(&view.projection, ""));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Listing printed for the `fields` command.
#[must_use]
pub fn render_fields(fields: &Lifecycle<Vec<Field>>) -> String {
    let lines = match (fields.status, &fields.result, &fields.error_message) {
        (FetchStatus::Error, _, Some(err)) => vec![format!("Fields: error: {err}")],
        (FetchStatus::Success, Some(list), _) if list.is_empty() => {
            vec!["No saved fields".to_string()]
        }
        (FetchStatus::Success, Some(list), _) => {
            let mut lines = vec!["Saved fields".to_string()];
            lines.extend(list.iter().map(|field| {
                format!(
                    "  {}  {}  {}, {}",
                    field.id.as_deref().unwrap_or("?"),
                    field.name.as_deref().unwrap_or(MISSING),
                    fmt_coord(field.latitude),
                    fmt_coord(field.longitude)
                )
            }));
            lines
        }
        _ => vec!["Fields: loading...".to_string()],
    };
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn field_header(field: &Field) -> String {
    let mut parts = vec![format!(
        "Field {}",
        field.name.as_deref().or(field.id.as_deref()).unwrap_or(MISSING)
    )];
    if let Some(area) = field.area_ha {
        parts.push(format!("{area:.1} ha"));
    }
    match field.has_irrigation {
        Some(true) => parts.push("irrigated".to_string()),
        Some(false) => parts.push("rainfed".to_string()),
        None => {}
    }
    if let Some(soil) = &field.soil_type {
        parts.push(format!("{soil} soil"));
    }
    parts.join(" | ")
}

fn current_lines(current: &CurrentView) -> Vec<String> {
    let mut lines = vec![format!(
        "SPI at {}, {} | {}-month window | {}",
        fmt_coord(current.latitude),
        fmt_coord(current.longitude),
        current
            .window_months
            .map_or_else(|| MISSING.to_string(), |w| w.to_string()),
        current.end_date.as_deref().unwrap_or(MISSING)
    )];
    lines.push(format!(
        "  SPI {}  {} ({})",
        fmt_spi(current.spi),
        current.status.label,
        current.category
    ));
    if !current.status.description.is_empty() {
        lines.push(format!("  {}", current.status.description));
    }
    lines.extend(current.recommendations.iter().map(|r| format!("  - {r}")));
    if let Some(projection) = &current.projection {
        lines.extend(projection_lines(projection, "  "));
    }
    if let Some(history) = &current.history {
        lines.push(format!(
            "  History: {} points, min {:+.2}, max {:+.2}",
            history.points, history.min_spi, history.max_spi
        ));
    }
    lines
}

fn projection_lines(projection: &ProjectionView, indent: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "{indent}30-day projection: SPI {} ({})",
        fmt_spi(projection.spi_30),
        projection.category
    )];
    if let (Some(trend), Some(delta)) = (projection.trend, projection.delta) {
        lines.push(format!("{indent}{} (delta {delta:+.2})", trend.message()));
    }
    lines.extend(
        projection
            .recommendations
            .iter()
            .map(|r| format!("{indent}- {r}")),
    );
    lines
}

fn comparison_line(row: &ComparisonRow) -> String {
    format!(
        "  {:>2} mo  SPI {}  {} ({})",
        row.window_months
            .map_or_else(|| "?".to_string(), |w| w.to_string()),
        fmt_spi(row.spi),
        row.status.label,
        row.category
    )
}

fn forecast_lines(forecast: &ForecastView) -> Vec<String> {
    let mut lines = vec![format!(
        "Forecast ({} days): latest SPI {}  {} ({})",
        forecast
            .forecast_days
            .map_or_else(|| MISSING.to_string(), |d| d.to_string()),
        fmt_spi(forecast.latest_spi),
        forecast.latest_status.label,
        forecast.latest_category
    )];
    lines.extend(forecast.days.iter().map(forecast_day_line));
    lines
}

fn forecast_day_line(day: &ForecastDayView) -> String {
    format!(
        "  {}  SPI {}  {} ({})",
        day.date.as_deref().unwrap_or(MISSING),
        fmt_spi(day.spi),
        day.status.label,
        day.category
    )
}

fn fmt_spi(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:+.2}"))
}

fn fmt_coord(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.4}"))
}
