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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use holocron_core::model::{ModelError, ModelResult};
use serde::Serialize;
use tower_http::cors::CorsLayer;

mod character_delete;
mod character_get;
mod character_post;
mod characters_get;
mod favorite_delete;
mod favorite_get;
mod favorite_post;
mod favorites_get;
mod planet_delete;
mod planet_get;
mod planet_post;
mod planets_get;
#[cfg(test)]
mod testutils;
mod user_delete;
mod user_get;
mod user_post;
mod users_get;
mod vehicle_delete;
mod vehicle_get;
mod vehicle_post;
mod vehicles_get;

/// Confirmation returned by APIs that have no entity to return.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, serde::Deserialize, PartialEq))]
pub(crate) struct MessageResponse {
    /// Human-readable description of what happened.
    pub(crate) message: String,
}

impl MessageResponse {
    /// Creates a new response carrying `message`.
    pub(crate) fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into() }
    }
}

/// Extracts a required field from a request, treating empty strings as missing.
///
/// Returns `message` as the error when the field is not usable.
pub(crate) fn non_empty(value: Option<String>, message: &str) -> ModelResult<String> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ModelError(message.to_owned())),
    }
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/user", get(users_get::handler).post(user_post::handler))
        .route("/user/:user_id", get(user_get::handler).delete(user_delete::handler))
        .route("/user/:user_id/favorites", get(favorites_get::handler))
        .route(
            "/user/:user_id/favorites/:kind/:target_id",
            get(favorite_get::handler)
                .post(favorite_post::handler)
                .delete(favorite_delete::handler),
        )
        .route("/character", get(characters_get::handler).post(character_post::handler))
        .route(
            "/character/:character_id",
            get(character_get::handler).delete(character_delete::handler),
        )
        .route("/planet", get(planets_get::handler).post(planet_post::handler))
        .route("/planet/:planet_id", get(planet_get::handler).delete(planet_delete::handler))
        .route("/vehicle", get(vehicles_get::handler).post(vehicle_post::handler))
        .route("/vehicle/:vehicle_id", get(vehicle_get::handler).delete(vehicle_delete::handler))
        .layer(CorsLayer::permissive())
        .with_state(driver)
}
