use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A `signal_main` row that passed the odds filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QualifyingRecord {
    pub id: i64,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
}

impl QualifyingRecord {
    /// Human-readable notification body for this row.
    pub fn message(&self) -> String {
        format!(
            "New Signal: {} vs {} ({})",
            self.home_team, self.away_team, self.league
        )
    }
}

/// Outcome counters for one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    /// Rows returned by the poller
    pub fetched: usize,
    /// Rows skipped because their id was already seen
    pub already_seen: usize,
    /// Notification attempts made (one per newly seen id)
    pub notified: usize,
    /// Attempts accepted by the push API
    pub delivered: usize,
    /// Attempts that failed (rejected or transport error)
    pub failed: usize,
    /// True when the data store could not be read and the cycle was skipped
    pub skipped: bool,
}

impl CycleReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            fetched: 0,
            already_seen: 0,
            notified: 0,
            delivered: 0,
            failed: 0,
            skipped: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_template() {
        let record = QualifyingRecord {
            id: 1,
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            league: "X".to_string(),
        };
        assert_eq!(record.message(), "New Signal: A vs B (X)");
    }

    #[test]
    fn test_message_keeps_names_verbatim() {
        let record = QualifyingRecord {
            id: 7,
            home_team: "Bayern München".to_string(),
            away_team: "PSG".to_string(),
            league: "UEFA Champions League".to_string(),
        };
        assert_eq!(
            record.message(),
            "New Signal: Bayern München vs PSG (UEFA Champions League)"
        );
    }
}
