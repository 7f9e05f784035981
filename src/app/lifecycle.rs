#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// State of one fetch operation kind. Transitions replace the whole record,
/// so a lifecycle never mixes a result with an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Lifecycle<T> {
    pub status: FetchStatus,
    pub result: Option<T>,
    pub error_message: Option<String>,
}

impl<T> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T> Lifecycle<T> {
    #[must_use]
    pub fn idle() -> Self {
        Self {
            status: FetchStatus::Idle,
            result: None,
            error_message: None,
        }
    }

    #[must_use]
    pub fn loading() -> Self {
        Self {
            status: FetchStatus::Loading,
            result: None,
            error_message: None,
        }
    }

    #[must_use]
    pub fn success(result: T) -> Self {
        Self {
            status: FetchStatus::Success,
            result: Some(result),
            error_message: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Error,
            result: None,
            error_message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}
