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

//! Database operations on favorites.
//!
//! A favorite row carries one nullable column per target kind and exactly one of them is set.

use crate::model::{
    CharacterId, Favorite, FavoriteId, FavoriteTarget, PlanetId, UserId, VehicleId,
};
use futures::TryStreamExt;
#[cfg(feature = "postgres")]
use holocron_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use holocron_core::db::sqlite;
use holocron_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Favorite {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let user_id: i64 = row.try_get("user_id").map_err(postgres::map_sqlx_error)?;
        let character_id: Option<i64> =
            row.try_get("character_id").map_err(postgres::map_sqlx_error)?;
        let planet_id: Option<i64> = row.try_get("planet_id").map_err(postgres::map_sqlx_error)?;
        let vehicle_id: Option<i64> =
            row.try_get("vehicle_id").map_err(postgres::map_sqlx_error)?;
        let created_at: OffsetDateTime =
            row.try_get("created_at").map_err(postgres::map_sqlx_error)?;

        let target = FavoriteTarget::from_references(
            character_id.map(CharacterId::new),
            planet_id.map(PlanetId::new),
            vehicle_id.map(VehicleId::new),
        )?;
        Ok(Favorite::new(FavoriteId::new(id), UserId::new(user_id), target, created_at))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Favorite {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let user_id: i64 = row.try_get("user_id").map_err(sqlite::map_sqlx_error)?;
        let character_id: Option<i64> =
            row.try_get("character_id").map_err(sqlite::map_sqlx_error)?;
        let planet_id: Option<i64> = row.try_get("planet_id").map_err(sqlite::map_sqlx_error)?;
        let vehicle_id: Option<i64> = row.try_get("vehicle_id").map_err(sqlite::map_sqlx_error)?;
        let created_at_secs: i64 =
            row.try_get("created_at_secs").map_err(sqlite::map_sqlx_error)?;
        let created_at_nsecs: i64 =
            row.try_get("created_at_nsecs").map_err(sqlite::map_sqlx_error)?;

        let target = FavoriteTarget::from_references(
            character_id.map(CharacterId::new),
            planet_id.map(PlanetId::new),
            vehicle_id.map(VehicleId::new),
        )?;
        let created_at = sqlite::build_timestamp(created_at_secs, created_at_nsecs)?;
        Ok(Favorite::new(FavoriteId::new(id), UserId::new(user_id), target, created_at))
    }
}

/// Gets all favorites of the user `user_id` ordered by their identifier.
pub(crate) async fn get_favorites(ex: &mut Executor, user_id: UserId) -> DbResult<Vec<Favorite>> {
    let mut favorites = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, user_id, character_id, planet_id, vehicle_id, created_at
                FROM favorites
                WHERE user_id = $1
                ORDER BY id
            ";
            let mut rows = sqlx::query(query_str).bind(user_id.as_i64()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                favorites.push(Favorite::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT
                    id, user_id, character_id, planet_id, vehicle_id,
                    created_at_secs, created_at_nsecs
                FROM favorites
                WHERE user_id = ?
                ORDER BY id
            ";
            let mut rows = sqlx::query(query_str).bind(user_id.as_i64()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                favorites.push(Favorite::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(favorites)
}

/// Gets the favorite of the user `user_id` that points to `target`, if any.
pub(crate) async fn get_favorite(
    ex: &mut Executor,
    user_id: UserId,
    target: FavoriteTarget,
) -> DbResult<Option<Favorite>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "
                SELECT id, user_id, character_id, planet_id, vehicle_id, created_at
                FROM favorites
                WHERE user_id = $1 AND {} = $2
                ",
                target.kind().column()
            );
            let row = sqlx::query(&query_str)
                .bind(user_id.as_i64())
                .bind(target.id())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.map(Favorite::try_from).transpose()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "
                SELECT
                    id, user_id, character_id, planet_id, vehicle_id,
                    created_at_secs, created_at_nsecs
                FROM favorites
                WHERE user_id = ? AND {} = ?
                ",
                target.kind().column()
            );
            let row = sqlx::query(&query_str)
                .bind(user_id.as_i64())
                .bind(target.id())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.map(Favorite::try_from).transpose()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Marks `target` as a favorite of the user `user_id` at time `created_at`.
///
/// Fails with `AlreadyExists` if the user already has this favorite.
pub(crate) async fn create_favorite(
    ex: &mut Executor,
    user_id: UserId,
    target: FavoriteTarget,
    created_at: OffsetDateTime,
) -> DbResult<Favorite> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "INSERT INTO favorites (user_id, {}, created_at) VALUES ($1, $2, $3) RETURNING id",
                target.kind().column()
            );
            let row = sqlx::query(&query_str)
                .bind(user_id.as_i64())
                .bind(target.id())
                .bind(created_at)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (created_at_secs, created_at_nsecs) = sqlite::unpack_timestamp(created_at);
            let query_str = format!(
                "
                INSERT INTO favorites (user_id, {}, created_at_secs, created_at_nsecs)
                VALUES (?, ?, ?, ?)
                ",
                target.kind().column()
            );
            let done = sqlx::query(&query_str)
                .bind(user_id.as_i64())
                .bind(target.id())
                .bind(created_at_secs)
                .bind(created_at_nsecs)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(Favorite::new(FavoriteId::new(id), user_id, target, created_at))
}

/// Removes `target` from the favorites of the user `user_id`.
pub(crate) async fn delete_favorite(
    ex: &mut Executor,
    user_id: UserId,
    target: FavoriteTarget,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "DELETE FROM favorites WHERE user_id = $1 AND {} = $2",
                target.kind().column()
            );
            let done = sqlx::query(&query_str)
                .bind(user_id.as_i64())
                .bind(target.id())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "DELETE FROM favorites WHERE user_id = ? AND {} = ?",
                target.kind().column()
            );
            let done = sqlx::query(&query_str)
                .bind(user_id.as_i64())
                .bind(target.id())
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

/// Deletes all favorites of the user `user_id`.
///
/// Returns the number of deleted favorites.
pub(crate) async fn delete_user_favorites(ex: &mut Executor, user_id: UserId) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("DELETE FROM favorites WHERE user_id = $1")
                .bind(user_id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("DELETE FROM favorites WHERE user_id = ?")
                .bind(user_id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes the favorites of all users that point to `target`.
///
/// Returns the number of deleted favorites.
pub(crate) async fn delete_target_favorites(
    ex: &mut Executor,
    target: FavoriteTarget,
) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                format!("DELETE FROM favorites WHERE {} = $1", target.kind().column());
            let done = sqlx::query(&query_str)
                .bind(target.id())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!("DELETE FROM favorites WHERE {} = ?", target.kind().column());
            let done = sqlx::query(&query_str)
                .bind(target.id())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
