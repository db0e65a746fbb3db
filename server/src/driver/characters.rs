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

//! Operations on characters.

use crate::db;
use crate::driver::{Driver, already_exists, not_found};
use crate::model::{
    Character, CharacterDetails, CharacterId, FavoriteTarget, NewCharacter, Planet, PlanetId,
    Vehicle, VehicleId,
};
use holocron_core::db::Executor;
use holocron_core::driver::{DriverError, DriverResult};
use log::info;
use std::collections::HashMap;

/// Loads the entities referenced by `character` and bundles them together.
async fn resolve_references(
    ex: &mut Executor,
    character: Character,
) -> DriverResult<CharacterDetails> {
    let homeplanet = match character.homeplanet_id() {
        Some(id) => Some(db::get_planet(ex, *id).await?),
        None => None,
    };
    let vehicle = match character.vehicle_id() {
        Some(id) => Some(db::get_vehicle(ex, *id).await?),
        None => None,
    };
    Ok(CharacterDetails::new(character, homeplanet, vehicle))
}

impl Driver {
    /// Gets all characters along with the planets and vehicles they reference.
    pub(crate) async fn get_characters(self) -> DriverResult<Vec<CharacterDetails>> {
        let mut tx = self.db.begin().await?;

        let characters = db::get_characters(tx.ex()).await?;
        let planets: HashMap<PlanetId, Planet> =
            db::get_planets(tx.ex()).await?.into_iter().map(|p| (*p.id(), p)).collect();
        let vehicles: HashMap<VehicleId, Vehicle> =
            db::get_vehicles(tx.ex()).await?.into_iter().map(|v| (*v.id(), v)).collect();

        tx.commit().await?;

        let details = characters
            .into_iter()
            .map(|character| {
                let homeplanet = character.homeplanet_id().and_then(|id| planets.get(&id).cloned());
                let vehicle = character.vehicle_id().and_then(|id| vehicles.get(&id).cloned());
                CharacterDetails::new(character, homeplanet, vehicle)
            })
            .collect();
        Ok(details)
    }

    /// Gets the character identified by `id` along with the entities it references.
    pub(crate) async fn get_character(self, id: CharacterId) -> DriverResult<CharacterDetails> {
        let mut tx = self.db.begin().await?;

        let character =
            db::get_character(tx.ex(), id).await.map_err(not_found("Character not found"))?;
        let details = resolve_references(tx.ex(), character).await?;

        tx.commit().await?;
        Ok(details)
    }

    /// Creates a new character with the given `details`.
    ///
    /// The planet and vehicle referenced by the character, if any, must exist.
    pub(crate) async fn create_character(
        self,
        details: NewCharacter,
    ) -> DriverResult<CharacterDetails> {
        let mut tx = self.db.begin().await?;

        if db::character_exists(tx.ex(), details.name()).await? {
            return Err(DriverError::AlreadyExists("Character already exists".to_owned()));
        }
        let homeplanet = match details.homeplanet_id() {
            Some(id) => {
                Some(db::get_planet(tx.ex(), *id).await.map_err(not_found("Planet not found"))?)
            }
            None => None,
        };
        let vehicle = match details.vehicle_id() {
            Some(id) => {
                Some(db::get_vehicle(tx.ex(), *id).await.map_err(not_found("Vehicle not found"))?)
            }
            None => None,
        };
        let character = db::create_character(tx.ex(), details)
            .await
            .map_err(already_exists("Character already exists"))?;

        tx.commit().await?;
        info!("Created character {} with id {}", character.name().as_str(), character.id());
        Ok(CharacterDetails::new(character, homeplanet, vehicle))
    }

    /// Deletes the character identified by `id` and any favorites that point to it.
    pub(crate) async fn delete_character(self, id: CharacterId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;

        let favorites = db::delete_target_favorites(tx.ex(), FavoriteTarget::Character(id)).await?;
        db::delete_character(tx.ex(), id).await.map_err(not_found("Character not found"))?;

        tx.commit().await?;
        info!("Deleted character {} and removed {} favorites", id, favorites);
        Ok(())
    }
}
