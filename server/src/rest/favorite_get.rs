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

//! API to check whether an entity is one of the favorites of a user.

use crate::driver::Driver;
use crate::model::{FavoriteKind, FavoriteStatus, FavoriteTarget, UserId};
use axum::Json;
use axum::extract::State;
use holocron_core::rest::{EmptyBody, PathParams, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams((user_id, kind, target_id)): PathParams<(UserId, FavoriteKind, i64)>,
    _: EmptyBody,
) -> RestResult<Json<FavoriteStatus>> {
    let target = FavoriteTarget::new(kind, target_id);
    let status = driver.get_favorite_status(user_id, target).await?;
    Ok(Json(status))
}
