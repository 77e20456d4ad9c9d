//! Persistence layer — per-submission sessions over libSQL or PostgreSQL.

pub mod libsql_backend;
pub mod postgres_backend;
pub mod schema;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use crate::config::{ConnectionMode, ConnectionParts, DATABASE_URL_ENV, DatabaseConfig};
use crate::error::{ConfigError, DatabaseError};

pub use libsql_backend::LibSqlSessionFactory;
pub use postgres_backend::PgSessionFactory;
pub use traits::{NewProfile, NewUser, Session, SessionFactory};

/// Pick a backend for the configured connection string.
///
/// `postgres://` and `postgresql://` go to sqlx, honouring the connection
/// mode; `file:` and `sqlite:` go to a local libSQL file. Nothing connects
/// here, connections are only made per submission.
pub fn factory_from_config(config: &DatabaseConfig) -> Result<Arc<dyn SessionFactory>, ConfigError> {
    match config.scheme() {
        "postgres" | "postgresql" => {
            let raw = config.url.expose_secret();
            let factory = match config.mode {
                ConnectionMode::Direct => {
                    PgSessionFactory::direct(SecretString::from(raw.to_string()))
                }
                ConnectionMode::Decomposed => {
                    let parts = ConnectionParts::parse(raw)?;
                    info!(
                        host = %parts.host,
                        port = parts.port,
                        database = %parts.database,
                        "Using decomposed postgres connection with unverified TLS"
                    );
                    PgSessionFactory::decomposed(&parts)
                }
            };
            Ok(Arc::new(factory))
        }
        "file" | "sqlite" => {
            if config.mode == ConnectionMode::Decomposed {
                warn!("Decomposed connection mode has no effect on local databases");
            }
            let factory = LibSqlSessionFactory::from_url(config.url.expose_secret()).map_err(|e| {
                ConfigError::InvalidValue {
                    key: DATABASE_URL_ENV.to_string(),
                    message: e.to_string(),
                }
            })?;
            Ok(Arc::new(factory))
        }
        other => Err(ConfigError::InvalidValue {
            key: DATABASE_URL_ENV.to_string(),
            message: format!("unsupported scheme `{other}`"),
        }),
    }
}

/// Create the onboarding tables through one short-lived session.
pub async fn apply_schema(factory: &dyn SessionFactory) -> Result<(), DatabaseError> {
    let mut session = factory.open().await?;
    let result = session.apply_schema().await;
    if let Err(e) = session.close().await {
        warn!(error = %e, "Failed to close schema session");
    }
    result?;
    info!(backend = factory.backend(), "Onboarding schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, mode: ConnectionMode) -> DatabaseConfig {
        DatabaseConfig {
            url: SecretString::from(url.to_string()),
            mode,
            atomic_writes: false,
            apply_schema: false,
        }
    }

    #[test]
    fn postgres_urls_select_sqlx() {
        let factory =
            factory_from_config(&config("postgres://u:p@db/app", ConnectionMode::Direct)).unwrap();
        assert_eq!(factory.backend(), "postgres");

        let factory =
            factory_from_config(&config("postgresql://u:p@db/app", ConnectionMode::Decomposed))
                .unwrap();
        assert_eq!(factory.backend(), "postgres");
    }

    #[test]
    fn decomposed_mode_rejects_unparseable_url() {
        let err = factory_from_config(&config("postgres://db-without-user/app", ConnectionMode::Decomposed))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn local_urls_select_libsql() {
        let tmp = tempfile::tempdir().unwrap();
        let url = format!("file:{}", tmp.path().join("onboard.db").display());
        let factory = factory_from_config(&config(&url, ConnectionMode::Direct)).unwrap();
        assert_eq!(factory.backend(), "libsql");
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = factory_from_config(&config("mysql://u@db/app", ConnectionMode::Direct))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[tokio::test]
    async fn apply_schema_closes_its_session() {
        let factory = mock::MockFactory::new();
        apply_schema(&factory).await.unwrap();
        let log = factory.log();
        assert_eq!(log.opened, 1);
        assert_eq!(log.closed, 1);
        assert_eq!(log.calls, vec!["apply_schema"]);
    }
}
