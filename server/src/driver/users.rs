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

//! Operations on users.

use crate::db;
use crate::driver::{Driver, already_exists, not_found};
use crate::model::{NewUser, User, UserId};
use holocron_core::driver::{DriverError, DriverResult};
use log::info;

/// Message returned when the email address or username of a new user are taken.
const USER_EXISTS_MESSAGE: &str = "User with this email or username already exists";

impl Driver {
    /// Gets all registered users.
    pub(crate) async fn get_users(self) -> DriverResult<Vec<User>> {
        let users = db::get_users(&mut self.db.ex().await?).await?;
        Ok(users)
    }

    /// Gets the user identified by `id`.
    pub(crate) async fn get_user(self, id: UserId) -> DriverResult<User> {
        let user =
            db::get_user(&mut self.db.ex().await?, id).await.map_err(not_found("User not found"))?;
        Ok(user)
    }

    /// Registers a new user with the given `details`.
    pub(crate) async fn create_user(self, details: NewUser) -> DriverResult<User> {
        let mut tx = self.db.begin().await?;

        if db::user_exists(tx.ex(), details.email(), details.username()).await? {
            return Err(DriverError::AlreadyExists(USER_EXISTS_MESSAGE.to_owned()));
        }
        let user =
            db::create_user(tx.ex(), details).await.map_err(already_exists(USER_EXISTS_MESSAGE))?;

        tx.commit().await?;
        info!("Created user {} with id {}", user.username().as_str(), user.id());
        Ok(user)
    }

    /// Deletes the user identified by `id` along with all of their favorites.
    pub(crate) async fn delete_user(self, id: UserId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;

        let favorites = db::delete_user_favorites(tx.ex(), id).await?;
        db::delete_user(tx.ex(), id).await.map_err(not_found("User not found"))?;

        tx.commit().await?;
        info!("Deleted user {} and {} favorites", id, favorites);
        Ok(())
    }
}
