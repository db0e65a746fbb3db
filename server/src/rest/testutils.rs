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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use holocron_core::clocks::Clock;
use holocron_core::clocks::testutils::SettableClock;
use holocron_core::db::{Db, DbError, Executor};
use holocron_core::model::{EmailAddress, Username};
use std::sync::Arc;
use time::macros::datetime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, for direct manipulation.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the app.
    clock: Arc<SettableClock>,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app against an in-memory database with the schema already in place.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::from(holocron_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(SettableClock::new(datetime!(2023-12-01 05:50:20 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        let app = app(driver);
        Self { db, clock, app }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Gets the clock used by the app.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Creates an active user whose email address derives from `username`.
    pub(crate) async fn add_user(&self, username: &'static str) -> User {
        let details = NewUser::new(
            EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            Username::from(username),
            Password::new("the-password").unwrap(),
            true,
        );
        db::create_user(&mut self.ex().await, details).await.unwrap()
    }

    /// Creates a planet called `name`.
    pub(crate) async fn add_planet(&self, name: &'static str) -> Planet {
        let details = NewPlanet::new(Name::from(name), None).unwrap();
        db::create_planet(&mut self.ex().await, details).await.unwrap()
    }

    /// Creates a vehicle called `name`.
    pub(crate) async fn add_vehicle(&self, name: &'static str) -> Vehicle {
        let details = NewVehicle::new(Name::from(name), None, None).unwrap();
        db::create_vehicle(&mut self.ex().await, details).await.unwrap()
    }

    /// Creates a character called `name` that optionally references a planet and a vehicle.
    pub(crate) async fn add_character(
        &self,
        name: &'static str,
        homeplanet: Option<&Planet>,
        vehicle: Option<&Vehicle>,
    ) -> Character {
        let details = NewCharacter::new(
            Name::from(name),
            None,
            None,
            homeplanet.map(|p| *p.id()),
            vehicle.map(|v| *v.id()),
        )
        .unwrap();
        db::create_character(&mut self.ex().await, details).await.unwrap()
    }

    /// Marks `target` as a favorite of `user` at the current time.
    pub(crate) async fn add_favorite(&self, user: &User, target: FavoriteTarget) -> Favorite {
        let now = self.clock.now_utc();
        db::create_favorite(&mut self.ex().await, *user.id(), target, now).await.unwrap()
    }

    /// Gets the favorites of `user` straight from the database.
    pub(crate) async fn favorites_of(&self, user: &User) -> Vec<Favorite> {
        db::get_favorites(&mut self.ex().await, *user.id()).await.unwrap()
    }

    /// Checks if the user `id` exists by directly querying the database.
    pub(crate) async fn user_exists(&self, id: UserId) -> bool {
        match db::get_user(&mut self.ex().await, id).await {
            Ok(_) => true,
            Err(DbError::NotFound) => false,
            Err(e) => panic!("{:?}", e),
        }
    }
}
