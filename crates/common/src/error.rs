use thiserror::Error;

/// Error types shared across the worker.
///
/// None of these are fatal once the scheduler is running: data-store errors
/// skip the current cycle and delivery errors drop the single notification.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Query error: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a push notification was not accepted.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("push API responded with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("push API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Coarse classification of a [`WatchError`], for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Query,
    Delivery,
    Config,
}

impl WatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WatchError::Connection(_) => ErrorKind::Connection,
            WatchError::Query(_) => ErrorKind::Query,
            WatchError::Delivery(_) => ErrorKind::Delivery,
            WatchError::Config(_) => ErrorKind::Config,
        }
    }

    /// HTTP status of a rejected delivery, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            WatchError::Delivery(DeliveryError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Connection => write!(f, "connection"),
            ErrorKind::Query => write!(f, "query"),
            ErrorKind::Delivery => write!(f, "delivery"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}
