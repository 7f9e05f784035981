use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::spi::OperationKind;

/// Failure of one request to the analytics service. `Display` is the text
/// shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: the analytics service could not be reached")]
    Transport {
        kind: OperationKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{detail}")]
    Service {
        kind: OperationKind,
        status: StatusCode,
        detail: String,
    },

    #[error("{}", .kind.fallback_message())]
    Decode {
        kind: OperationKind,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Transport { kind, .. } | Self::Service { kind, .. } | Self::Decode { kind, .. } => {
                *kind
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Builds a service error from a non-success body, preferring the
    /// service's own `detail` text.
    #[must_use]
    pub fn from_error_body(kind: OperationKind, status: StatusCode, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .and_then(serde_json::Value::as_str)
                    .filter(|detail| !detail.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| kind.fallback_message().to_string());

        Self::Service {
            kind,
            status,
            detail,
        }
    }
}
