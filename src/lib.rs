pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod render;
pub mod resilience;
pub mod telemetry;

#[cfg(test)]
mod test_support;

use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use app::events::{AppEvent, InputCommand, dispatch_input, spawn_input_task};
use app::state::AppState;
use cli::Cli;
use data::spi::SpiClient;
use domain::view::SummaryView;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    telemetry::init_tracing(cli.log_format);
    cli.validate()?;
    info!(api_url = %cli.api_url, interactive = cli.interactive, "starting");

    if cli.summary {
        return run_summary(&cli).await;
    }

    let (tx, rx) = mpsc::channel::<AppEvent>(256);
    let app = AppState::new(&cli);
    let mut stdout = std::io::stdout();
    if cli.interactive {
        run_interactive(app, tx, rx, spawn_input_task(), &mut stdout).await
    } else {
        run_once(app, tx, rx, &mut stdout).await
    }
}

/// Drives the event loop until no lifecycle is loading.
pub async fn run_until_settled(
    app: &mut AppState,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
) {
    while !app.is_settled() {
        let Some(event) = rx.recv().await else {
            break;
        };
        app.handle_event(event, tx);
    }
}

async fn run_once<W: Write>(
    mut app: AppState,
    tx: mpsc::Sender<AppEvent>,
    mut rx: mpsc::Receiver<AppEvent>,
    out: &mut W,
) -> Result<()> {
    app.handle_event(AppEvent::RunAll, &tx);
    tokio::select! {
        () = run_until_settled(&mut app, &tx, &mut rx) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
            return Ok(());
        }
    }
    flush_output(&mut app, out)
}

/// Reads commands until `quit` or end of input. A report is written each
/// time the runs started by a command have all settled. Quitting waits for
/// requests in flight and writes their report before returning.
pub async fn run_interactive<S, W>(
    mut app: AppState,
    tx: mpsc::Sender<AppEvent>,
    mut rx: mpsc::Receiver<AppEvent>,
    input: S,
    out: &mut W,
) -> Result<()>
where
    S: Stream<Item = InputCommand>,
    W: Write,
{
    tokio::pin!(input);
    let mut input_open = true;

    if app.point_selected {
        app.handle_event(AppEvent::RunAll, &tx);
    }

    loop {
        tokio::select! {
            maybe_input = input.next(), if input_open => {
                match maybe_input {
                    Some(command) => {
                        input_open = command != InputCommand::Quit;
                        dispatch_input(command, &tx).await?;
                    }
                    None => {
                        input_open = false;
                        tx.send(AppEvent::Quit).await?;
                    }
                }
            }
            Some(event) = rx.recv() => {
                app.handle_event(event, &tx);
                flush_output(&mut app, out)?;
                if !app.running && app.is_settled() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    Ok(())
}

fn flush_output<W: Write>(app: &mut AppState, out: &mut W) -> Result<()> {
    if let Some(fields) = app.take_field_listing() {
        write!(out, "{}", render::render_fields(fields))?;
    }
    if let Some(view) = app.take_report() {
        write!(out, "{}", render::render_report(&view))?;
    }
    out.flush()?;
    Ok(())
}

async fn run_summary(cli: &Cli) -> Result<()> {
    let client = SpiClient::with_timeout(
        cli.api_url.clone(),
        Duration::from_secs(cli.timeout_secs),
    );
    let summary = client
        .fetch_summary(&cli.query_params())
        .await
        .context("forecast summary unavailable")?;
    print!(
        "{}",
        render::render_summary(&SummaryView::from_payload(&summary))
    );
    Ok(())
}
