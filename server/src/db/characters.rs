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

//! Database operations on characters.

use crate::model::{Character, CharacterId, Name, NewCharacter, PlanetId, VehicleId};
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

/// Columns to fetch when building a `Character`.
const CHARACTER_COLUMNS: &str = "id, name, gender, birth_year, homeplanet_id, vehicle_id";

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Character {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let gender: Option<String> = row.try_get("gender").map_err(postgres::map_sqlx_error)?;
        let birth_year: Option<String> =
            row.try_get("birth_year").map_err(postgres::map_sqlx_error)?;
        let homeplanet_id: Option<i64> =
            row.try_get("homeplanet_id").map_err(postgres::map_sqlx_error)?;
        let vehicle_id: Option<i64> = row.try_get("vehicle_id").map_err(postgres::map_sqlx_error)?;

        let details = NewCharacter::new(
            Name::new(name)?,
            gender,
            birth_year,
            homeplanet_id.map(PlanetId::new),
            vehicle_id.map(VehicleId::new),
        )?;
        Ok(Character::new(CharacterId::new(id), details))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Character {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let gender: Option<String> = row.try_get("gender").map_err(sqlite::map_sqlx_error)?;
        let birth_year: Option<String> =
            row.try_get("birth_year").map_err(sqlite::map_sqlx_error)?;
        let homeplanet_id: Option<i64> =
            row.try_get("homeplanet_id").map_err(sqlite::map_sqlx_error)?;
        let vehicle_id: Option<i64> = row.try_get("vehicle_id").map_err(sqlite::map_sqlx_error)?;

        let details = NewCharacter::new(
            Name::new(name)?,
            gender,
            birth_year,
            homeplanet_id.map(PlanetId::new),
            vehicle_id.map(VehicleId::new),
        )?;
        Ok(Character::new(CharacterId::new(id), details))
    }
}

/// Gets all characters ordered by their identifier.
pub(crate) async fn get_characters(ex: &mut Executor) -> DbResult<Vec<Character>> {
    let query_str = format!("SELECT {} FROM characters ORDER BY id", CHARACTER_COLUMNS);
    let mut characters = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let mut rows = sqlx::query(&query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                characters.push(Character::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let mut rows = sqlx::query(&query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                characters.push(Character::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(characters)
}

/// Gets the character identified by `id`.
pub(crate) async fn get_character(ex: &mut Executor, id: CharacterId) -> DbResult<Character> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!("SELECT {} FROM characters WHERE id = $1", CHARACTER_COLUMNS);
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Character::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!("SELECT {} FROM characters WHERE id = ?", CHARACTER_COLUMNS);
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Character::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Checks whether a character called `name` already exists.
pub(crate) async fn character_exists(ex: &mut Executor, name: &Name) -> DbResult<bool> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM characters WHERE name = $1";
            let row = sqlx::query(query_str)
                .bind(name.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM characters WHERE name = ?";
            let row = sqlx::query(query_str)
                .bind(name.as_str())
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

/// Creates a new character with the given `details` and returns it with its assigned identifier.
///
/// The referenced planet and vehicle, if any, must exist.
pub(crate) async fn create_character(
    ex: &mut Executor,
    details: NewCharacter,
) -> DbResult<Character> {
    let homeplanet_id = details.homeplanet_id().map(PlanetId::as_i64);
    let vehicle_id = details.vehicle_id().map(VehicleId::as_i64);

    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO characters (name, gender, birth_year, homeplanet_id, vehicle_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(details.name().as_str())
                .bind(details.gender().as_deref())
                .bind(details.birth_year().as_deref())
                .bind(homeplanet_id)
                .bind(vehicle_id)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO characters (name, gender, birth_year, homeplanet_id, vehicle_id)
                VALUES (?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(details.name().as_str())
                .bind(details.gender().as_deref())
                .bind(details.birth_year().as_deref())
                .bind(homeplanet_id)
                .bind(vehicle_id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(Character::new(CharacterId::new(id), details))
}

/// Deletes the character identified by `id`.
///
/// Favorites that reference the character must have been deleted beforehand.
pub(crate) async fn delete_character(ex: &mut Executor, id: CharacterId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM characters WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM characters WHERE id = ?";
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

/// Sets the reference in `column` to null for all characters that point to `id`.
///
/// Returns the number of modified characters.
async fn clear_references(ex: &mut Executor, column: &str, id: i64) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                format!("UPDATE characters SET {col} = NULL WHERE {col} = $1", col = column);
            let done = sqlx::query(&query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                format!("UPDATE characters SET {col} = NULL WHERE {col} = ?", col = column);
            let done = sqlx::query(&query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Detaches all characters from the planet `id`.
pub(crate) async fn clear_planet_references(ex: &mut Executor, id: PlanetId) -> DbResult<u64> {
    clear_references(ex, "homeplanet_id", id.as_i64()).await
}

/// Detaches all characters from the vehicle `id`.
pub(crate) async fn clear_vehicle_references(ex: &mut Executor, id: VehicleId) -> DbResult<u64> {
    clear_references(ex, "vehicle_id", id.as_i64()).await
}
