// Holocron
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

//! Generic abstraction to access different database systems.
//!
//! The facilities in this module provide an abstraction over PostgreSQL and SQLite.  Which one is
//! used is decided at runtime by the scheme of the connection URL, so the same binary can run
//! against a production PostgreSQL server or against a local SQLite file.

use crate::env::get_optional_var;
use crate::model::ModelError;
use async_trait::async_trait;
use derivative::Derivative;
use std::sync::Arc;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Connection URL used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///tmp/test.db";

/// Default value for the `max_retries` configuration property.
const DEFAULT_MAX_RETRIES: u16 = 60;

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

    /// Indicates that the database is not available (maybe because of too many active concurrent
    /// connections).
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

/// Options to establish a connection to a database.
#[derive(Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct DbOptions {
    /// Connection URL.  The scheme selects the backend: `postgres:` or `postgresql:` for
    /// PostgreSQL and `sqlite:` for SQLite.
    #[derivative(Debug = "ignore")]
    pub url: String,

    /// Maximum number of connections to allow against the database.
    pub max_connections: Option<u32>,

    /// Maximum number of attempts to retry a connection operation when the database does not seem
    /// to be available.  Only used by PostgreSQL.
    pub max_retries: u16,
}

impl DbOptions {
    /// Creates a set of options for `url` with all other settings at their defaults.
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into(), max_connections: None, max_retries: DEFAULT_MAX_RETRIES }
    }

    /// Initializes a set of options from the `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and
    /// `DATABASE_MAX_RETRIES` environment variables.
    pub fn from_env() -> Result<Self, String> {
        Ok(DbOptions {
            url: get_optional_var::<String>("DATABASE_URL")?
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            max_connections: get_optional_var::<u32>("DATABASE_MAX_CONNECTIONS")?,
            max_retries: get_optional_var::<u16>("DATABASE_MAX_RETRIES")?
                .unwrap_or(DEFAULT_MAX_RETRIES),
        })
    }

    /// Returns the scheme of the connection URL, if any.
    fn scheme(&self) -> Option<&str> {
        self.url.split_once(':').map(|(scheme, _rest)| scheme)
    }
}

/// A database executor that can talk to multiple database implementations.
///
/// Users of this type are forced to destructure it and issue different calls for each database,
/// which is what sqlx needs to offer type safety for the queries of each backend.
///
/// Note that this can wrap an executor that talks directly to a pool or to an open transaction.
pub enum Executor {
    /// A PostgreSQL executor that can be used in `sqlx` operations.
    #[cfg(feature = "postgres")]
    Postgres(postgres::PostgresExecutor),

    /// A SQLite executor that can be used in `sqlx` operations.
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteExecutor),
}

/// A wrapper for a database executor backed by an open transaction.
pub struct TxExecutor(Executor);

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
        match self.0 {
            #[cfg(feature = "postgres")]
            Executor::Postgres(e) => e.commit().await,

            #[cfg(feature = "sqlite")]
            Executor::Sqlite(e) => e.commit().await,
        }
    }
}

/// Abstraction over the database connection.
#[async_trait]
pub trait Db {
    /// Obtains an executor for direct access to the pool.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    async fn ex(&self) -> DbResult<Executor>;

    /// Begins a transaction.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned executor.  Otherwise
    /// the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes the connection pool, waiting for all active connections to be returned.
    async fn close(&self);
}

/// Creates a database handle for the backend selected by the scheme of `opts.url`.
///
/// Connections may be established lazily, so a successful return does not mean that the database
/// is reachable.
pub async fn connect(opts: DbOptions) -> DbResult<Arc<dyn Db + Send + Sync>> {
    let scheme = opts.scheme().map(str::to_owned);
    match scheme.as_deref() {
        #[cfg(feature = "postgres")]
        Some("postgres") | Some("postgresql") => {
            let db = postgres::PostgresDb::connect(opts)?;
            Ok(Arc::new(db))
        }

        #[cfg(feature = "sqlite")]
        Some("sqlite") => {
            let db = sqlite::SqliteDb::connect(opts).await?;
            Ok(Arc::new(db))
        }

        Some(scheme) => {
            Err(DbError::BackendError(format!("Unsupported database URL scheme '{}'", scheme)))
        }

        None => Err(DbError::BackendError("Database URL lacks a scheme".to_owned())),
    }
}

/// Macros to help instantiate tests for multiple database systems.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Instantiates the `module::name` test for the database configured by `setup`.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_one_test [
        ( $name:ident, $setup:expr, $module:path $(, #[$extra:meta] )? ) => {
            #[tokio::test]
            $(#[$extra])?
            async fn $name() {
                $crate::db::testutils::paste! {
                    $module :: [< $name >]($setup).await;
                }
            }
        }
    ];

    pub use generate_one_test;

    /// Instantiates a collection of tests for a specific database system.
    ///
    /// The database implementation to run the tests against is determined by the `setup`
    /// expression, which needs to return a database object already initialized with the desired
    /// schema.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_tests [
        ( #[$extra:meta], $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module, #[$extra]);
            )+
        };

        ( $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module);
            )+
        };
    ];

    pub use generate_tests;
}
