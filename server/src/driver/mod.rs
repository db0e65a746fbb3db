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

//! Business logic for the service.

use holocron_core::clocks::Clock;
use holocron_core::db::{Db, DbError};
use holocron_core::driver::DriverError;
use std::sync::Arc;

mod characters;
mod favorites;
mod planets;
#[cfg(test)]
pub(crate) mod testutils;
mod users;
mod vehicles;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}

/// Returns a mapper that turns `DbError::NotFound` into a `DriverError::NotFound` with `message`.
fn not_found<S: Into<String>>(message: S) -> impl FnOnce(DbError) -> DriverError {
    move |e| match e {
        DbError::NotFound => DriverError::NotFound(message.into()),
        e => e.into(),
    }
}

/// Returns a mapper that turns `DbError::AlreadyExists` into a `DriverError::AlreadyExists` with
/// `message`.
fn already_exists<S: Into<String>>(message: S) -> impl FnOnce(DbError) -> DriverError {
    move |e| match e {
        DbError::AlreadyExists => DriverError::AlreadyExists(message.into()),
        e => e.into(),
    }
}
