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

//! API to create a new character.

use crate::driver::Driver;
use crate::model::{CharacterDetails, Name, NewCharacter, PlanetId, VehicleId};
use crate::rest::non_empty;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use holocron_core::rest::{JsonBody, RestResult};
use serde::Deserialize;

/// Message sent to the server to create a character.
#[derive(Deserialize)]
pub(crate) struct CharacterPostRequest {
    /// Name of the character.
    name: Option<String>,

    /// Gender of the character.
    gender: Option<String>,

    /// Birth year of the character.
    birth_year: Option<String>,

    /// Planet the character comes from.  Must exist if given.
    homeplanet_id: Option<PlanetId>,

    /// Vehicle the character drives.  Must exist if given.
    vehicle_id: Option<VehicleId>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<CharacterPostRequest>,
) -> RestResult<(StatusCode, Json<CharacterDetails>)> {
    let name = Name::new(non_empty(request.name, "Name is required")?)?;
    let details = NewCharacter::new(
        name,
        request.gender,
        request.birth_year,
        request.homeplanet_id,
        request.vehicle_id,
    )?;
    let character = driver.create_character(details).await?;
    Ok((StatusCode::CREATED, Json(character)))
}
