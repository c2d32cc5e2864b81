use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

use crate::domain::errors::BoxError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("could not open {url} for provisioning")]
    Connection {
        url: String,
        #[source]
        source: ConnectionError,
    },
    #[error("failed to create order tables")]
    Migration(#[source] BoxError),
}

/// Opens a single connection to the store. No pooling, no retry.
pub fn establish(database_url: &str) -> ConnectionResult<SqliteConnection> {
    SqliteConnection::establish(database_url)
}

/// Creates the `Order` and `LineItem` tables if they are not there yet.
pub fn provision_schema(database_url: &str) -> Result<(), SchemaError> {
    let mut conn = establish(database_url).map_err(|source| SchemaError::Connection {
        url: database_url.to_string(),
        source,
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(SchemaError::Migration)?;
    if applied.is_empty() {
        log::debug!("Order schema already provisioned at {}", database_url);
    } else {
        log::info!("Provisioned order schema at {}", database_url);
    }
    Ok(())
}
