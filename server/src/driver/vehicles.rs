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

//! Operations on vehicles.

use crate::db;
use crate::driver::{Driver, already_exists, not_found};
use crate::model::{FavoriteTarget, NewVehicle, Vehicle, VehicleId};
use holocron_core::driver::{DriverError, DriverResult};
use log::info;

impl Driver {
    /// Gets all vehicles.
    pub(crate) async fn get_vehicles(self) -> DriverResult<Vec<Vehicle>> {
        let vehicles = db::get_vehicles(&mut self.db.ex().await?).await?;
        Ok(vehicles)
    }

    /// Gets the vehicle identified by `id`.
    pub(crate) async fn get_vehicle(self, id: VehicleId) -> DriverResult<Vehicle> {
        let vehicle = db::get_vehicle(&mut self.db.ex().await?, id)
            .await
            .map_err(not_found("Vehicle not found"))?;
        Ok(vehicle)
    }

    /// Creates a new vehicle with the given `details`.
    pub(crate) async fn create_vehicle(self, details: NewVehicle) -> DriverResult<Vehicle> {
        let mut tx = self.db.begin().await?;

        if db::vehicle_exists(tx.ex(), details.name()).await? {
            return Err(DriverError::AlreadyExists("Vehicle already exists".to_owned()));
        }
        let vehicle = db::create_vehicle(tx.ex(), details)
            .await
            .map_err(already_exists("Vehicle already exists"))?;

        tx.commit().await?;
        info!("Created vehicle {} with id {}", vehicle.name().as_str(), vehicle.id());
        Ok(vehicle)
    }

    /// Deletes the vehicle identified by `id`.
    ///
    /// Characters that drive the vehicle lose their reference to it and favorites pointing to the
    /// vehicle are removed.
    pub(crate) async fn delete_vehicle(self, id: VehicleId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;

        let characters = db::clear_vehicle_references(tx.ex(), id).await?;
        let favorites = db::delete_target_favorites(tx.ex(), FavoriteTarget::Vehicle(id)).await?;
        db::delete_vehicle(tx.ex(), id).await.map_err(not_found("Vehicle not found"))?;

        tx.commit().await?;
        info!(
            "Deleted vehicle {}, detached {} characters and removed {} favorites",
            id, characters, favorites
        );
        Ok(())
    }
}
