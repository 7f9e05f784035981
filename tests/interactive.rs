mod common;

use common::{
    COMPARISON_PATH, CURRENT_PATH, FIELDS_PATH, FORECAST_PATH, Harness, comparison_body,
    current_body, field_body, forecast_body, mount_detail_error, mount_json,
};
use serde_json::json;
use spi_dashboard::{app::events::InputCommand, run_interactive};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

async fn dashboard_server() -> MockServer {
    let server = MockServer::start().await;
    mount_json(&server, CURRENT_PATH, current_body(-0.62, "слабо засушливые условия", -0.4)).await;
    mount_json(&server, COMPARISON_PATH, comparison_body()).await;
    mount_json(&server, FORECAST_PATH, forecast_body()).await;
    server
}

async fn expect_current_at(server: &MockServer, lat: &str, lon: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(CURRENT_PATH))
        .and(query_param("lat", lat))
        .and(query_param("lon", lon))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body(0.1, "норма по влажности", 0.05)),
        )
        .expect(times)
        .mount(server)
        .await;
}

async fn drive(server: &MockServer, has_point: bool, commands: Vec<InputCommand>) -> String {
    let Harness { mut app, tx, rx } = Harness::new(server);
    app.point_selected = has_point;
    let mut out = Vec::new();
    run_interactive(app, tx, rx, futures::stream::iter(commands), &mut out)
        .await
        .expect("interactive loop");
    String::from_utf8(out).expect("utf-8 output")
}

#[tokio::test]
async fn startup_point_prints_one_report_at_end_of_input() {
    let server = dashboard_server().await;

    let out = drive(&server, true, Vec::new()).await;

    assert_eq!(out.matches("SPI at").count(), 1);
    assert!(out.contains("Window comparison\n"));
    assert!(out.contains("Forecast (2 days)"));
    assert!(!out.contains("loading..."));
}

#[tokio::test]
async fn quit_waits_for_the_selected_point_report() {
    let server = MockServer::start().await;
    expect_current_at(&server, "51.5", "-0.12", 1).await;
    mount_json(&server, COMPARISON_PATH, comparison_body()).await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body())
                .set_delay(std::time::Duration::from_millis(150)),
        )
        .mount(&server)
        .await;

    let out = drive(
        &server,
        false,
        vec![
            InputCommand::Select {
                latitude: 51.5,
                longitude: -0.12,
            },
            InputCommand::Quit,
        ],
    )
    .await;

    assert_eq!(out.matches("SPI at").count(), 1);
    assert_eq!(out.matches("Forecast (2 days)").count(), 1);
    assert!(out.contains("SPI +0.10  Close to normal (Normal)"));
}

#[tokio::test]
async fn run_commands_before_a_point_print_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let out = drive(
        &server,
        false,
        vec![
            InputCommand::RunAll,
            InputCommand::RunCurrent,
            InputCommand::RunForecast,
        ],
    )
    .await;

    assert_eq!(out, "");
}

#[tokio::test]
async fn fields_command_prints_the_listing() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        FIELDS_PATH,
        json!([field_body("f-north", "North", 51.5, -0.12)]),
    )
    .await;

    let out = drive(&server, false, vec![InputCommand::ListFields]).await;

    assert_eq!(out, "Saved fields\n  f-north  North  51.5000, -0.1200\n");
}

#[tokio::test]
async fn field_command_runs_at_the_field_point() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        &format!("{FIELDS_PATH}/f-north"),
        field_body("f-north", "North", 51.5, -0.12),
    )
    .await;
    expect_current_at(&server, "51.5", "-0.12", 1).await;
    mount_json(&server, COMPARISON_PATH, comparison_body()).await;
    mount_json(&server, FORECAST_PATH, forecast_body()).await;

    let out = drive(
        &server,
        false,
        vec![InputCommand::SelectField {
            id: "f-north".to_string(),
        }],
    )
    .await;

    assert!(out.starts_with("Field North | 12.5 ha | rainfed | chernozem soil\n\nSPI at"));
    assert_eq!(out.matches("SPI at").count(), 1);
}

#[tokio::test]
async fn unknown_field_reports_the_error_without_running() {
    let server = MockServer::start().await;
    mount_detail_error(&server, &format!("{FIELDS_PATH}/missing"), 404, "Поле не найдено").await;
    expect_current_at(&server, "51.5", "-0.12", 0).await;

    let out = drive(
        &server,
        false,
        vec![InputCommand::SelectField {
            id: "missing".to_string(),
        }],
    )
    .await;

    assert_eq!(out, "Field: error: Поле не найдено\n");
}

#[tokio::test]
async fn commands_after_quit_are_not_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FIELDS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let out = drive(
        &server,
        false,
        vec![InputCommand::Quit, InputCommand::ListFields],
    )
    .await;

    assert_eq!(out, "");
}
