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

//! API to add an entity to the favorites of a user.
//!
//! Any request body is ignored.

use crate::driver::Driver;
use crate::model::{Favorite, FavoriteKind, FavoriteTarget, UserId};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use holocron_core::rest::{PathParams, RestResult};

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams((user_id, kind, target_id)): PathParams<(UserId, FavoriteKind, i64)>,
) -> RestResult<(StatusCode, Json<Favorite>)> {
    let target = FavoriteTarget::new(kind, target_id);
    let favorite = driver.add_favorite(user_id, target).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use holocron_core::rest::testutils::OneShotBuilder;
    use serde_json::json;

    fn route(user_id: i64, kind: &str, target_id: i64) -> (http::Method, String) {
        (http::Method::POST, format!("/user/{}/favorites/{}/{}", user_id, kind, target_id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let user = context.add_user("luke").await;
        let xwing = context.add_vehicle("X-wing").await;

        let response =
            OneShotBuilder::new(context.app(), route(user.id().as_i64(), "vehicle", 1))
                .send_empty()
                .await
                .expect_status(http::StatusCode::CREATED)
                .expect_json::<serde_json::Value>()
                .await;
        assert_eq!(
            json!({
                "id": 1,
                "user_id": 1,
                "character_id": null,
                "planet_id": null,
                "vehicle_id": 1,
                "created_at": "2023-12-01T05:50:20Z",
            }),
            response
        );

        let favorites = context.favorites_of(&user).await;
        assert_eq!(1, favorites.len());
        assert_eq!(&FavoriteTarget::Vehicle(*xwing.id()), favorites[0].target());
    }

    #[tokio::test]
    async fn test_duplicate() {
        let context = TestContext::setup().await;

        let user = context.add_user("luke").await;
        let yoda = context.add_character("Yoda", None, None).await;
        let route = route(user.id().as_i64(), "character", yoda.id().as_i64());

        OneShotBuilder::new(context.app(), route.clone())
            .send_empty()
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Favorite>()
            .await;

        OneShotBuilder::new(context.app(), route)
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Character already in favorites$")
            .await;

        assert_eq!(1, context.favorites_of(&user).await.len());
    }

    #[tokio::test]
    async fn test_user_not_found() {
        let context = TestContext::setup().await;

        let hoth = context.add_planet("Hoth").await;

        OneShotBuilder::new(context.into_app(), route(3, "planet", hoth.id().as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^User not found$")
            .await;
    }

    #[tokio::test]
    async fn test_target_not_found() {
        let context = TestContext::setup().await;

        let user = context.add_user("luke").await;

        OneShotBuilder::new(context.app(), route(user.id().as_i64(), "planet", 10))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Planet not found$")
            .await;

        assert!(context.favorites_of(&user).await.is_empty());
    }

    #[tokio::test]
    async fn test_bad_target_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::POST, "/user/1/favorites/planet/x"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Cannot parse")
            .await;
    }

    #[tokio::test]
    async fn test_body_is_ignored() {
        let context = TestContext::setup().await;

        let user = context.add_user("luke").await;
        let hoth = context.add_planet("Hoth").await;

        OneShotBuilder::new(context.app(), route(user.id().as_i64(), "planet", 1))
            .send_json(json!({}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Favorite>()
            .await;

        OneShotBuilder::new(context.app(), route(user.id().as_i64(), "planet", 1))
            .send_text("ignored")
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Planet already in favorites$")
            .await;

        let favorites = context.favorites_of(&user).await;
        assert_eq!(1, favorites.len());
        assert_eq!(&FavoriteTarget::Planet(*hoth.id()), favorites[0].target());
    }
}
