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

//! Operations on planets.

use crate::db;
use crate::driver::{Driver, already_exists, not_found};
use crate::model::{FavoriteTarget, NewPlanet, Planet, PlanetId};
use holocron_core::driver::{DriverError, DriverResult};
use log::info;

impl Driver {
    /// Gets all planets.
    pub(crate) async fn get_planets(self) -> DriverResult<Vec<Planet>> {
        let planets = db::get_planets(&mut self.db.ex().await?).await?;
        Ok(planets)
    }

    /// Gets the planet identified by `id`.
    pub(crate) async fn get_planet(self, id: PlanetId) -> DriverResult<Planet> {
        let planet = db::get_planet(&mut self.db.ex().await?, id)
            .await
            .map_err(not_found("Planet not found"))?;
        Ok(planet)
    }

    /// Creates a new planet with the given `details`.
    pub(crate) async fn create_planet(self, details: NewPlanet) -> DriverResult<Planet> {
        let mut tx = self.db.begin().await?;

        if db::planet_exists(tx.ex(), details.name()).await? {
            return Err(DriverError::AlreadyExists("Planet already exists".to_owned()));
        }
        let planet = db::create_planet(tx.ex(), details)
            .await
            .map_err(already_exists("Planet already exists"))?;

        tx.commit().await?;
        info!("Created planet {} with id {}", planet.name().as_str(), planet.id());
        Ok(planet)
    }

    /// Deletes the planet identified by `id`.
    ///
    /// Characters born on the planet lose their reference to it and favorites pointing to the
    /// planet are removed.
    pub(crate) async fn delete_planet(self, id: PlanetId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;

        let characters = db::clear_planet_references(tx.ex(), id).await?;
        let favorites = db::delete_target_favorites(tx.ex(), FavoriteTarget::Planet(id)).await?;
        db::delete_planet(tx.ex(), id).await.map_err(not_found("Planet not found"))?;

        tx.commit().await?;
        info!(
            "Deleted planet {}, detached {} characters and removed {} favorites",
            id, characters, favorites
        );
        Ok(())
    }
}
