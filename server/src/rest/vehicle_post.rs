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

//! API to create a new vehicle.

use crate::driver::Driver;
use crate::model::{Name, NewVehicle, Vehicle};
use crate::rest::non_empty;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use holocron_core::rest::{JsonBody, RestResult};
use serde::Deserialize;

/// Message sent to the server to create a vehicle.
#[derive(Deserialize)]
pub(crate) struct VehiclePostRequest {
    /// Name of the vehicle.
    name: Option<String>,

    /// Model of the vehicle.
    model: Option<String>,

    /// Manufacturer of the vehicle.
    manufacturer: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<VehiclePostRequest>,
) -> RestResult<(StatusCode, Json<Vehicle>)> {
    let name = Name::new(non_empty(request.name, "Vehicle name is required")?)?;
    let details = NewVehicle::new(name, request.model, request.manufacturer)?;
    let vehicle = driver.create_vehicle(details).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}
