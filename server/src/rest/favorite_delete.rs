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

//! API to remove an entity from the favorites of a user.

use crate::driver::Driver;
use crate::model::{FavoriteKind, FavoriteTarget, UserId};
use crate::rest::MessageResponse;
use axum::Json;
use axum::extract::State;
use holocron_core::rest::{EmptyBody, PathParams, RestResult};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams((user_id, kind, target_id)): PathParams<(UserId, FavoriteKind, i64)>,
    _: EmptyBody,
) -> RestResult<Json<MessageResponse>> {
    let target = FavoriteTarget::new(kind, target_id);
    driver.remove_favorite(user_id, target).await?;
    Ok(Json(MessageResponse::new(format!("{} removed from favorites", kind.title()))))
}
