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

//! API to create a new planet.

use crate::driver::Driver;
use crate::model::{Name, NewPlanet, Planet};
use crate::rest::non_empty;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use holocron_core::rest::{JsonBody, RestResult};
use serde::Deserialize;

/// Message sent to the server to create a planet.
#[derive(Deserialize)]
pub(crate) struct PlanetPostRequest {
    /// Name of the planet.
    name: Option<String>,

    /// Free-form description of the planet's climate.
    climate: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<PlanetPostRequest>,
) -> RestResult<(StatusCode, Json<Planet>)> {
    let name = Name::new(non_empty(request.name, "Planet name is required")?)?;
    let details = NewPlanet::new(name, request.climate)?;
    let planet = driver.create_planet(details).await?;
    Ok((StatusCode::CREATED, Json(planet)))
}
