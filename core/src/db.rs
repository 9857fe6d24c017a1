// Cocktail catalog
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic abstraction to access the SQLite store.
//!
//! Persistence operations in the service are free functions that take an `Executor`.  Callers
//! obtain one either directly from the store (`Db::ex`), in which case every operation commits on
//! its own, or from an open transaction (`Db::begin`), in which case the caller is responsible for
//! calling `TxExecutor::commit`.  Transactions that are dropped without being committed are
//! rolled back.

use crate::env::{get_optional_var, get_required_var};
use crate::model::ModelError;
use async_trait::async_trait;
use log::{debug, warn};
use sqlx::Transaction;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    Sqlite, SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions,
};
use std::str::FromStr;
use std::time::Duration;

/// Default value for the `acquire_timeout` configuration property.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Default value for the `busy_timeout` configuration property.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("Already exists")]
    AlreadyExists,

    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,

    /// Indicates that the database is not available (maybe because it cannot be opened, because
    /// it is locked by another writer for too long, or because the pool ran out of connections).
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::Database(e)
            if e.is_unique_violation() || e.message().contains("UNIQUE constraint failed") =>
        {
            DbError::AlreadyExists
        }
        sqlx::Error::Database(e)
            if e.message().contains("database is locked")
                || e.message().contains("database table is locked")
                || e.message().contains("unable to open database file") =>
        {
            DbError::Unavailable
        }
        sqlx::Error::Io(_) | sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            DbError::Unavailable
        }
        sqlx::Error::RowNotFound => DbError::NotFound,
        e => DbError::BackendError(e.to_string()),
    }
}

/// A database executor on which to issue `sqlx` operations.
///
/// Both direct connections obtained from the pool and open transactions dereference to this type,
/// so persistence functions can be written once and be called in either context.
pub type Executor = SqliteConnection;

/// A database executor backed by a connection taken from the pool.  The connection returns to the
/// pool when this is dropped.
pub type PoolExecutor = PoolConnection<Sqlite>;

/// A wrapper for a database executor backed by an open transaction.
pub struct TxExecutor(Transaction<'static, Sqlite>);

impl TxExecutor {
    /// Returns the executor wrapped by this transaction.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Commits the transaction.
    pub async fn commit(self) -> DbResult<()> {
        self.0.commit().await.map_err(map_sqlx_error)
    }
}

/// Abstraction over the database connection.
#[async_trait]
pub trait Db {
    /// Obtains an executor for direct access to the pool.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    async fn ex(&self) -> DbResult<PoolExecutor>;

    /// Begins a transaction.
    ///
    /// Transactions take the write lock upfront, so concurrent writers wait for each other up to
    /// the configured busy timeout instead of failing when they first try to write.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned executor.  Otherwise
    /// the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes the connection to the database, waiting for in-flight operations to complete.
    async fn close(&self);
}

/// Options to establish a connection to a SQLite database.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct SqliteOptions {
    /// Location of the database.  Can be a path to a file, which is created if missing, or the
    /// special `:memory:` value to keep the database in memory.
    pub uri: String,

    /// Maximum number of connections to allow against the database.
    pub max_connections: Option<u32>,

    /// Maximum time to wait for a connection to become available in the pool.
    pub acquire_timeout: Duration,

    /// Maximum time a statement waits on a locked database before giving up.
    pub busy_timeout: Duration,
}

impl SqliteOptions {
    /// Initializes a set of options for the database at `uri` with default settings.
    pub fn new<S: Into<String>>(uri: S) -> Self {
        Self {
            uri: uri.into(),
            max_connections: None,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_URI`, `<prefix>_MAX_CONNECTIONS`,
    /// `<prefix>_ACQUIRE_TIMEOUT` and `<prefix>_BUSY_TIMEOUT`.
    pub fn from_env(prefix: &str) -> Result<SqliteOptions, String> {
        Ok(SqliteOptions {
            uri: get_required_var::<String>(prefix, "URI")?,
            max_connections: get_optional_var::<u32>(prefix, "MAX_CONNECTIONS")?,
            acquire_timeout: get_optional_var::<Duration>(prefix, "ACQUIRE_TIMEOUT")?
                .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT),
            busy_timeout: get_optional_var::<Duration>(prefix, "BUSY_TIMEOUT")?
                .unwrap_or(DEFAULT_BUSY_TIMEOUT),
        })
    }
}

/// A database instance backed by a SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Opens the database described by `opts`, creating it if it does not exist yet.
    pub async fn connect(opts: SqliteOptions) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(&opts.uri)
            .map_err(map_sqlx_error)?
            .create_if_missing(true)
            .busy_timeout(opts.busy_timeout);

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(opts.acquire_timeout);
        if let Some(max_connections) = opts.max_connections {
            pool_options = pool_options.max_connections(max_connections);
        }
        if opts.uri == ":memory:" {
            // In-memory databases vanish along with their last connection.
            pool_options = pool_options.min_connections(1).idle_timeout(None).max_lifetime(None);
        }

        debug!("Opening SQLite database {}", opts.uri);
        let pool = pool_options.connect_with(options).await.map_err(map_sqlx_error)?;
        Ok(Self { pool })
    }
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<PoolExecutor> {
        self.pool.acquire().await.map_err(map_sqlx_error)
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(tx))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a `schema`, which may contain more than one
/// statement.  The schema must be idempotent as this runs on every start.
pub async fn run_schema(ex: &mut Executor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(ex).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes an empty in-memory test database.
    ///
    /// The pool is limited to a single connection so that the in-memory database stays alive for
    /// as long as the returned object does and so that all operations see the same data.  This
    /// means that tests must not hold more than one executor at once.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let mut opts = SqliteOptions::new(":memory:");
        opts.max_connections = Some(1);
        SqliteDb::connect(opts).await.unwrap()
    }

    /// A database that is never reachable, to exercise error paths in upper layers.
    pub struct UnavailableDb;

    #[async_trait]
    impl Db for UnavailableDb {
        async fn ex(&self) -> DbResult<PoolExecutor> {
            Err(DbError::Unavailable)
        }

        async fn begin(&self) -> DbResult<TxExecutor> {
            Err(DbError::Unavailable)
        }

        async fn close(&self) {}
    }
}
