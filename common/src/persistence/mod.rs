use crate::config::Database;
use diesel::ConnectionError;
use diesel::ConnectionResult;
use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::deadpool::{BuildError, Pool, PoolError};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;

pub mod models;
pub mod schema;
pub mod store;

pub type SqliteConn = SyncConnectionWrapper<SqliteConnection>;
pub type SqlitePool = Pool<SqliteConn>;

type SqliteSetup =
    Box<dyn for<'a> Fn(&'a str) -> BoxFuture<'a, ConnectionResult<SqliteConn>> + Send + Sync>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("diesel error: `{0}`")]
    Diesel(#[from] diesel::result::Error),
    #[error("sqlite pool error: `{0}`")]
    Pool(#[from] PoolError),
    #[error("sqlite pool build error: `{0}`")]
    PoolBuild(#[from] BuildError),
    #[error("sqlite pool needs at least one connection")]
    EmptyPool,
}

/// Applied to every new connection. WAL lets readers run next to a writer, and
/// the busy timeout makes writers queue on the lock instead of failing.
pub fn connection_pragmas(busy_timeout_ms: u64) -> String {
    format!(
        "PRAGMA busy_timeout = {busy_timeout_ms};\
         PRAGMA journal_mode = WAL;\
         PRAGMA synchronous = NORMAL;"
    )
}

fn establish_sqlite(url: &str, busy_timeout_ms: u64) -> BoxFuture<'_, ConnectionResult<SqliteConn>> {
    async move {
        let mut conn = SqliteConn::establish(url).await?;
        conn.batch_execute(&connection_pragmas(busy_timeout_ms))
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}

fn sqlite_setup<F>(setup: F) -> SqliteSetup
where
    F: for<'a> Fn(&'a str) -> BoxFuture<'a, ConnectionResult<SqliteConn>> + Send + Sync + 'static,
{
    Box::new(setup)
}

pub fn init_sqlite_pool(config: &Database) -> Result<SqlitePool, StoreError> {
    if config.max_connections == 0 {
        return Err(StoreError::EmptyPool);
    }

    let busy_timeout_ms = config.busy_timeout_ms;
    let mut manager_config = ManagerConfig::default();
    manager_config.custom_setup = sqlite_setup(move |url| establish_sqlite(url, busy_timeout_ms));

    let manager =
        AsyncDieselConnectionManager::<SqliteConn>::new_with_config(config.path.clone(), manager_config);
    Ok(Pool::builder(manager)
        .max_size(config.max_connections)
        .build()?)
}

pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    let mut conn = pool.get().await?;
    conn.batch_execute(schema::CREATE_CAR_TABLE).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::sql_types::{Integer, Text};
    use diesel::{QueryableByName, sql_query};
    use diesel_async::RunQueryDsl;

    #[derive(QueryableByName)]
    struct BusyTimeout {
        #[diesel(sql_type = Integer)]
        timeout: i32,
    }

    #[derive(QueryableByName)]
    struct JournalMode {
        #[diesel(sql_type = Text)]
        journal_mode: String,
    }

    #[test]
    fn test_zero_connections_is_rejected() {
        let config = Database {
            max_connections: 0,
            ..Default::default()
        };
        assert!(matches!(
            init_sqlite_pool(&config),
            Err(StoreError::EmptyPool)
        ));
    }

    #[tokio::test]
    async fn test_connections_wait_on_locks_in_wal_mode() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let config = Database {
            path: dir.path().join("db.sqlite").to_string_lossy().into_owned(),
            max_connections: 2,
            busy_timeout_ms: 1234,
        };
        let pool = init_sqlite_pool(&config)?;
        let mut conn = pool.get().await?;

        let busy = sql_query("PRAGMA busy_timeout")
            .get_result::<BusyTimeout>(&mut conn)
            .await?;
        let journal = sql_query("PRAGMA journal_mode")
            .get_result::<JournalMode>(&mut conn)
            .await?;

        assert_eq!(busy.timeout, 1234);
        assert_eq!(journal.journal_mode.to_lowercase(), "wal");
        Ok(())
    }
}
