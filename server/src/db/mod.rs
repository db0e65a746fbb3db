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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Every operation is a free function that takes an `Executor`, so callers decide whether a group
//! of operations runs inside a transaction or not.  Cascading deletions are not delegated to the
//! database: the driver removes dependent rows explicitly before removing their owner.

#[cfg(feature = "postgres")]
use holocron_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use holocron_core::db::sqlite;
use holocron_core::db::{DbResult, Executor};

mod characters;
pub(crate) use characters::*;
mod favorites;
pub(crate) use favorites::*;
mod planets;
pub(crate) use planets::*;
#[cfg(test)]
mod tests;
mod users;
pub(crate) use users::*;
mod vehicles;
pub(crate) use vehicles::*;

/// Initializes the database schema if it does not exist yet.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}
