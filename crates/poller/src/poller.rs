use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;

use signal_common::config::AppConfig;
use signal_common::db;
use signal_common::error::WatchError;
use signal_common::pipeline::RecordSource;
use signal_common::types::QualifyingRecord;

// Display columns are nullable upstream; a NULL must not fail the whole fetch
const QUALIFYING_ROWS_SQL: &str = r#"
    SELECT id::BIGINT AS id,
           COALESCE(home_team, 'unknown') AS home_team,
           COALESCE(away_team, 'unknown') AS away_team,
           COALESCE(league, 'unknown') AS league
    FROM signal_main
    WHERE odds < $1
    ORDER BY date_time DESC
"#;

/// Reads qualifying signals from `signal_main`.
///
/// Every fetch opens its own connection and closes it before returning, so a
/// database restart between cycles needs no reconnect logic.
pub struct SignalPoller {
    connect_options: PgConnectOptions,
    odds_threshold: f64,
}

impl SignalPoller {
    pub fn new(connect_options: PgConnectOptions, odds_threshold: f64) -> Self {
        Self {
            connect_options,
            odds_threshold,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            db::connect_options(&config.database),
            config.odds_threshold,
        )
    }

    /// Run the filter query once and materialize every matching row.
    pub async fn fetch(&self) -> Result<Vec<QualifyingRecord>, WatchError> {
        let mut conn = db::open_connection(&self.connect_options).await?;

        let result = sqlx::query_as::<_, QualifyingRecord>(QUALIFYING_ROWS_SQL)
            .bind(self.odds_threshold)
            .fetch_all(&mut conn)
            .await
            .map_err(WatchError::Query);

        db::close_connection(conn).await;

        let rows = result?;
        tracing::debug!(
            rows = rows.len(),
            odds_threshold = self.odds_threshold,
            "Fetched qualifying rows"
        );
        Ok(rows)
    }
}

#[async_trait]
impl RecordSource for SignalPoller {
    async fn fetch_qualifying(&self) -> Result<Vec<QualifyingRecord>, WatchError> {
        self.fetch().await
    }
}
