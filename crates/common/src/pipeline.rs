//! Seams between the scheduler and its external collaborators.

use async_trait::async_trait;

use crate::error::WatchError;
use crate::types::QualifyingRecord;

/// Something that can produce the current set of qualifying rows.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every qualifying row, or fail the whole fetch.
    async fn fetch_qualifying(&self) -> Result<Vec<QualifyingRecord>, WatchError>;
}

/// Something that can deliver a push notification.
#[async_trait]
pub trait PushNotifier: Send + Sync {
    /// Make a single delivery attempt for `message`.
    async fn send(&self, message: &str) -> Result<(), WatchError>;
}
