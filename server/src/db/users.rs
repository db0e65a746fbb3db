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

//! Database operations on users.

use crate::model::{NewUser, User, UserId};
use futures::TryStreamExt;
#[cfg(feature = "postgres")]
use holocron_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use holocron_core::db::sqlite;
use holocron_core::db::{DbError, DbResult, Executor};
use holocron_core::model::{EmailAddress, Username};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(postgres::map_sqlx_error)?;
        let is_active: bool = row.try_get("is_active").map_err(postgres::map_sqlx_error)?;

        let email = EmailAddress::new(email)?;
        let username = Username::new(username)?;
        Ok(User::new(UserId::new(id), email, username, is_active))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(sqlite::map_sqlx_error)?;
        let is_active: bool = row.try_get("is_active").map_err(sqlite::map_sqlx_error)?;

        let email = EmailAddress::new(email)?;
        let username = Username::new(username)?;
        Ok(User::new(UserId::new(id), email, username, is_active))
    }
}

/// Gets all users ordered by their identifier.
pub(crate) async fn get_users(ex: &mut Executor) -> DbResult<Vec<User>> {
    let query_str = "SELECT id, email, username, is_active FROM users ORDER BY id";
    let mut users = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                users.push(User::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                users.push(User::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(users)
}

/// Gets the user identified by `id`.
pub(crate) async fn get_user(ex: &mut Executor, id: UserId) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, email, username, is_active FROM users WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, email, username, is_active FROM users WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Checks whether a user already holds the given `email` or `username`.
pub(crate) async fn user_exists(
    ex: &mut Executor,
    email: &EmailAddress,
    username: &Username,
) -> DbResult<bool> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "SELECT COUNT(*) AS count FROM users WHERE email = $1 OR username = $2";
            let row = sqlx::query(query_str)
                .bind(email.as_str())
                .bind(username.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM users WHERE email = ? OR username = ?";
            let row = sqlx::query(query_str)
                .bind(email.as_str())
                .bind(username.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(count > 0)
}

/// Creates a new user with the given `details` and returns it with its assigned identifier.
pub(crate) async fn create_user(ex: &mut Executor, details: NewUser) -> DbResult<User> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO users (email, username, password, is_active)
                VALUES ($1, $2, $3, $4)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(details.email().as_str())
                .bind(details.username().as_str())
                .bind(details.password().as_str())
                .bind(*details.is_active())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO users (email, username, password, is_active)
                VALUES (?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(details.email().as_str())
                .bind(details.username().as_str())
                .bind(details.password().as_str())
                .bind(*details.is_active())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            if done.rows_affected() != 1 {
                return Err(DbError::BackendError(
                    "Insertion affected more than one row".to_owned(),
                ));
            }
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    let is_active = *details.is_active();
    Ok(User::new(UserId::new(id), details.email().clone(), details.username().clone(), is_active))
}

/// Deletes the user identified by `id`.
///
/// The user's favorites must have been deleted beforehand.
pub(crate) async fn delete_user(ex: &mut Executor, id: UserId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM users WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM users WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
