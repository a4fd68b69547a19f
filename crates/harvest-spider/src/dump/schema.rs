use super::sql;
use crate::http::*;
use crate::{Result, SpiderError};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use std::path::Path;
use tracing::{debug, error, info, trace};

/// A named, ordered set of statements run in one transaction.
#[derive(Debug)]
pub struct Migration {
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

/// Drops and recreates `organizations` and `customers`. Every run discards all rows in both.
pub static RECREATE_TABLES: Migration = Migration {
    name: "recreate_organizations_and_customers",
    statements: &[
        sql::DROP_ORGANIZATIONS,
        sql::CREATE_ORGANIZATIONS,
        sql::DROP_CUSTOMERS,
        sql::CREATE_CUSTOMERS,
    ],
};

/// Open the SQLite database at `path`, creating the file (and its directory) if missing.
pub async fn connect(path: &Path) -> Result<DbConn> {
    if let Some(dir_path) = path.parent() {
        tokio::fs::create_dir_all(dir_path)
            .await
            .map_err(|err| SpiderError::io(dir_path, err))?;
    }

    trace!("connecting to {} ...", path.display());
    let conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .map_err(|err| {
            error!("connection to {} failed, error({err})", path.display());
            err
        })?;
    debug!("connection to {} established", path.display());

    Ok(conn)
}

/// Run `migration` atomically: either every statement applies or none does.
pub async fn migrate(conn: &mut DbConn, migration: &Migration) -> Result<()> {
    debug!("running migration {}", migration.name);
    let mut transaction = conn.begin().await?;
    for statement in migration.statements {
        sqlx::query(*statement)
            .execute(&mut *transaction)
            .await
            .map_err(|err| {
                error!("migration {} failed, error({err})", migration.name);
                err
            })?;
    }
    transaction.commit().await?;
    info!("migration {} applied", migration.name);
    Ok(())
}

/// Open the database at `path` and recreate both tables, without loading any data.
pub async fn recreate(path: &Path) -> Result<()> {
    let mut conn = connect(path).await?;
    let migrated = migrate(&mut conn, &RECREATE_TABLES).await;
    let closed = conn.close().await;
    migrated?;
    closed?;
    Ok(())
}
