use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgConnection};

use crate::config::DatabaseConfig;
use crate::error::WatchError;

/// Build PostgreSQL connect options from the database section of the config.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .database(&config.name);

    if let Some(password) = &config.password {
        options = options.password(password);
    }

    options
}

/// Open a single, unpooled connection.
pub async fn open_connection(options: &PgConnectOptions) -> Result<PgConnection, WatchError> {
    let conn = PgConnection::connect_with(options)
        .await
        .map_err(WatchError::Connection)?;

    tracing::debug!("Connected to PostgreSQL");
    Ok(conn)
}

/// Close a connection, logging instead of failing if the goodbye is lost.
pub async fn close_connection(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "PostgreSQL connection did not close cleanly");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database() -> DatabaseConfig {
        DatabaseConfig {
            host: "db.internal".to_string(),
            port: 6543,
            user: "signals".to_string(),
            password: Some("hunter2".to_string()),
            name: "signals_db".to_string(),
        }
    }

    #[test]
    fn test_connect_options_from_config() {
        let options = connect_options(&database());
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "signals");
        assert_eq!(options.get_database(), Some("signals_db"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let mut config = database();
        // Port 1 on loopback refuses immediately
        config.host = "127.0.0.1".to_string();
        config.port = 1;
        let err = open_connection(&connect_options(&config)).await.err().unwrap();
        assert_eq!(err.kind(), crate::error::ErrorKind::Connection);
    }
}
