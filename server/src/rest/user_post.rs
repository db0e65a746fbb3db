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

//! API to register a new user.

use crate::driver::Driver;
use crate::model::{NewUser, Password, User};
use crate::rest::non_empty;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use holocron_core::model::{EmailAddress, Username};
use holocron_core::rest::{JsonBody, RestResult};
use serde::Deserialize;

/// Message returned when any of the required fields of a user are missing.
const MISSING_FIELDS_MESSAGE: &str = "Email, username, and password are required";

/// Message sent to the server to register a user.
#[derive(Deserialize)]
pub(crate) struct UserPostRequest {
    /// Email address of the user.
    email: Option<String>,

    /// Username of the user.
    username: Option<String>,

    /// Password of the user.
    password: Option<String>,

    /// Whether the account starts as active.  Defaults to true.
    is_active: Option<bool>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<UserPostRequest>,
) -> RestResult<(StatusCode, Json<User>)> {
    let (email, username, password) = (
        non_empty(request.email, MISSING_FIELDS_MESSAGE),
        non_empty(request.username, MISSING_FIELDS_MESSAGE),
        non_empty(request.password, MISSING_FIELDS_MESSAGE),
    );
    let (email, username, password) = (email?, username?, password?);

    let details = NewUser::new(
        EmailAddress::new(email)?,
        Username::new(username)?,
        Password::new(password)?,
        request.is_active.unwrap_or(true),
    );
    let user = driver.create_user(details).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
