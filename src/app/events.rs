use anyhow::Result;
use futures::Stream;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::warn;

use crate::{
    data::error::FetchError,
    domain::{
        field::{Field, is_valid_field_id},
        spi::{Comparison, CurrentIndex, Forecast, QueryParams},
    },
};

#[derive(Debug)]
pub enum AppEvent {
    PointSelected {
        latitude: f64,
        longitude: f64,
    },
    RunCurrent,
    RunForecast,
    RunAll,
    ListFields,
    SelectField {
        id: String,
    },
    CurrentSettled {
        epoch: u64,
        params: QueryParams,
        result: Result<CurrentIndex, FetchError>,
    },
    ComparisonSettled {
        epoch: u64,
        result: Result<Comparison, FetchError>,
    },
    ForecastSettled {
        epoch: u64,
        result: Result<Forecast, FetchError>,
    },
    FieldsSettled {
        epoch: u64,
        result: Result<Vec<Field>, FetchError>,
    },
    FieldSettled {
        epoch: u64,
        result: Result<Field, FetchError>,
    },
    /// No more commands will arrive. Runs in flight still settle and report.
    Quit,
}

/// What a map widget offers the dashboard: a point was picked.
#[allow(async_fn_in_trait)]
pub trait PointSelection {
    async fn notify(&self, latitude: f64, longitude: f64) -> Result<()>;
}

impl PointSelection for mpsc::Sender<AppEvent> {
    async fn notify(&self, latitude: f64, longitude: f64) -> Result<()> {
        self.send(AppEvent::PointSelected {
            latitude,
            longitude,
        })
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputCommand {
    Select { latitude: f64, longitude: f64 },
    RunCurrent,
    RunForecast,
    RunAll,
    ListFields,
    SelectField { id: String },
    Quit,
}

#[must_use]
pub fn parse_command(line: &str) -> Option<InputCommand> {
    let mut words = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty());
    let first = words.next()?;
    let command = match first.to_ascii_lowercase().as_str() {
        "spi" | "current" => Some(InputCommand::RunCurrent),
        "forecast" => Some(InputCommand::RunForecast),
        "all" | "run" => Some(InputCommand::RunAll),
        "fields" => Some(InputCommand::ListFields),
        "q" | "quit" | "exit" => Some(InputCommand::Quit),
        "field" => {
            let id = words.next()?;
            if words.next().is_some() || !is_valid_field_id(id) {
                return None;
            }
            return Some(InputCommand::SelectField { id: id.to_string() });
        }
        "point" => return parse_point(words.next()?, words.next()?, words.next()),
        _ => None,
    };
    if command.is_some() {
        return command;
    }

    parse_point(first, words.next()?, words.next())
}

fn parse_point(lat: &str, lon: &str, trailing: Option<&str>) -> Option<InputCommand> {
    if trailing.is_some() {
        return None;
    }
    let latitude = lat.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let longitude = lon.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(InputCommand::Select {
        latitude,
        longitude,
    })
}

/// Line-oriented stand-in for the map widget.
pub fn spawn_input_task() -> impl Stream<Item = InputCommand> {
    let lines = BufReader::new(tokio::io::stdin()).lines();
    futures::stream::unfold(lines, |mut lines| async move {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(command) = parse_command(&line) {
                        return Some((command, lines));
                    }
                    if !line.trim().is_empty() {
                        warn!(input = %line.trim(), "unrecognised command");
                    }
                }
                Ok(None) => return None,
                Err(err) => {
                    warn!(%err, "reading stdin failed");
                    return None;
                }
            }
        }
    })
}

pub async fn dispatch_input(command: InputCommand, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
    match command {
        InputCommand::Select {
            latitude,
            longitude,
        } => {
            tx.notify(latitude, longitude).await?;
            tx.send(AppEvent::RunAll).await?;
        }
        InputCommand::RunCurrent => tx.send(AppEvent::RunCurrent).await?,
        InputCommand::RunForecast => tx.send(AppEvent::RunForecast).await?,
        InputCommand::RunAll => tx.send(AppEvent::RunAll).await?,
        InputCommand::ListFields => tx.send(AppEvent::ListFields).await?,
        InputCommand::SelectField { id } => tx.send(AppEvent::SelectField { id }).await?,
        InputCommand::Quit => tx.send(AppEvent::Quit).await?,
    }
    Ok(())
}
