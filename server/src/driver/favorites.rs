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

//! Operations on the favorites of a user.

use crate::db;
use crate::driver::{Driver, already_exists, not_found};
use crate::model::{Favorite, FavoriteStatus, FavoriteTarget, UserId};
use holocron_core::clocks::Clock;
use holocron_core::db::Executor;
use holocron_core::driver::{DriverError, DriverResult};
use log::info;

/// Ensures that the user `user_id` and the entity `target` both exist.
async fn check_references(
    ex: &mut Executor,
    user_id: UserId,
    target: FavoriteTarget,
) -> DriverResult<()> {
    db::get_user(ex, user_id).await.map_err(not_found("User not found"))?;

    let result = match target {
        FavoriteTarget::Character(id) => db::get_character(ex, id).await.map(|_| ()),
        FavoriteTarget::Planet(id) => db::get_planet(ex, id).await.map(|_| ()),
        FavoriteTarget::Vehicle(id) => db::get_vehicle(ex, id).await.map(|_| ()),
    };
    result.map_err(not_found(format!("{} not found", target.kind().title())))
}

impl Driver {
    /// Gets all favorites of the user `user_id`.
    pub(crate) async fn get_favorites(self, user_id: UserId) -> DriverResult<Vec<Favorite>> {
        let mut tx = self.db.begin().await?;

        db::get_user(tx.ex(), user_id).await.map_err(not_found("User not found"))?;
        let favorites = db::get_favorites(tx.ex(), user_id).await?;

        tx.commit().await?;
        Ok(favorites)
    }

    /// Checks whether `target` is one of the favorites of the user `user_id`.
    pub(crate) async fn get_favorite_status(
        self,
        user_id: UserId,
        target: FavoriteTarget,
    ) -> DriverResult<FavoriteStatus> {
        let mut tx = self.db.begin().await?;

        check_references(tx.ex(), user_id, target).await?;
        let favorite = db::get_favorite(tx.ex(), user_id, target).await?;

        tx.commit().await?;
        Ok(FavoriteStatus::new(user_id, target, favorite.is_some()))
    }

    /// Adds `target` to the favorites of the user `user_id`.
    pub(crate) async fn add_favorite(
        self,
        user_id: UserId,
        target: FavoriteTarget,
    ) -> DriverResult<Favorite> {
        let mut tx = self.db.begin().await?;

        check_references(tx.ex(), user_id, target).await?;
        let exists_message = format!("{} already in favorites", target.kind().title());
        if db::get_favorite(tx.ex(), user_id, target).await?.is_some() {
            return Err(DriverError::AlreadyExists(exists_message));
        }
        let now = self.clock.now_utc();
        let favorite = db::create_favorite(tx.ex(), user_id, target, now)
            .await
            .map_err(already_exists(exists_message))?;

        tx.commit().await?;
        info!("User {} added {:?} to favorites", user_id, target);
        Ok(favorite)
    }

    /// Removes `target` from the favorites of the user `user_id`.
    pub(crate) async fn remove_favorite(
        self,
        user_id: UserId,
        target: FavoriteTarget,
    ) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;

        check_references(tx.ex(), user_id, target).await?;
        db::delete_favorite(tx.ex(), user_id, target)
            .await
            .map_err(not_found("Favorite not found"))?;

        tx.commit().await?;
        info!("User {} removed {:?} from favorites", user_id, target);
        Ok(())
    }
}
