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

//! Database operations on vehicles.

use crate::model::{Name, NewVehicle, Vehicle, VehicleId};
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

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Vehicle {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let model: Option<String> = row.try_get("model").map_err(postgres::map_sqlx_error)?;
        let manufacturer: Option<String> =
            row.try_get("manufacturer").map_err(postgres::map_sqlx_error)?;

        let details = NewVehicle::new(Name::new(name)?, model, manufacturer)?;
        Ok(Vehicle::new(VehicleId::new(id), details))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Vehicle {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let model: Option<String> = row.try_get("model").map_err(sqlite::map_sqlx_error)?;
        let manufacturer: Option<String> =
            row.try_get("manufacturer").map_err(sqlite::map_sqlx_error)?;

        let details = NewVehicle::new(Name::new(name)?, model, manufacturer)?;
        Ok(Vehicle::new(VehicleId::new(id), details))
    }
}

/// Gets all vehicles ordered by their identifier.
pub(crate) async fn get_vehicles(ex: &mut Executor) -> DbResult<Vec<Vehicle>> {
    let query_str = "SELECT id, name, model, manufacturer FROM vehicles ORDER BY id";
    let mut vehicles = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                vehicles.push(Vehicle::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                vehicles.push(Vehicle::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(vehicles)
}

/// Gets the vehicle identified by `id`.
pub(crate) async fn get_vehicle(ex: &mut Executor, id: VehicleId) -> DbResult<Vehicle> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, model, manufacturer FROM vehicles WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Vehicle::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, model, manufacturer FROM vehicles WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Vehicle::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Checks whether a vehicle called `name` already exists.
pub(crate) async fn vehicle_exists(ex: &mut Executor, name: &Name) -> DbResult<bool> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM vehicles WHERE name = $1";
            let row = sqlx::query(query_str)
                .bind(name.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM vehicles WHERE name = ?";
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

/// Creates a new vehicle with the given `details` and returns it with its assigned identifier.
pub(crate) async fn create_vehicle(ex: &mut Executor, details: NewVehicle) -> DbResult<Vehicle> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO vehicles (name, model, manufacturer)
                VALUES ($1, $2, $3)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(details.name().as_str())
                .bind(details.model().as_deref())
                .bind(details.manufacturer().as_deref())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO vehicles (name, model, manufacturer) VALUES (?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(details.name().as_str())
                .bind(details.model().as_deref())
                .bind(details.manufacturer().as_deref())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(Vehicle::new(VehicleId::new(id), details))
}

/// Deletes the vehicle identified by `id`.
///
/// Favorites and characters that reference the vehicle must have been updated beforehand.
pub(crate) async fn delete_vehicle(ex: &mut Executor, id: VehicleId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM vehicles WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM vehicles WHERE id = ?";
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
