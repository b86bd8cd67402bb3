//! Ordered schema steps for the note store.
//!
//! The schema version lives in `PRAGMA user_version`. Pending steps run in a
//! single transaction, so a failing step leaves the file at its old version.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_notes",
    sql: include_str!("0001_init.sql"),
}];

/// Highest schema version this build can create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Schema version recorded in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the schema up to `latest_version()`.
///
/// # Errors
/// - `SchemaTooNew` when the file comes from a newer build.
/// - `Migration` naming the step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let mut pending = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > found)
        .peekable();
    if pending.peek().is_none() {
        return Ok(());
    }

    info!("event=db_migrate module=db status=start from={found} to={supported}");
    let tx = conn.transaction()?;
    for migration in pending {
        tx.execute_batch(migration.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
            .map_err(|source| DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;
    info!("event=db_migrate module=db status=ok version={supported}");
    Ok(())
}
