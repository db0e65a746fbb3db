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

//! API to delete a user and all of their favorites.

use crate::driver::Driver;
use crate::model::UserId;
use crate::rest::MessageResponse;
use axum::Json;
use axum::extract::State;
use holocron_core::rest::{EmptyBody, PathParams, RestResult};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<UserId>,
    _: EmptyBody,
) -> RestResult<Json<MessageResponse>> {
    driver.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FavoriteTarget;
    use crate::rest::testutils::*;
    use axum::http;
    use holocron_core::rest::testutils::OneShotBuilder;
    use holocron_core::test_payload_must_be_empty;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::DELETE, format!("/user/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let luke = context.add_user("luke").await;
        let leia = context.add_user("leia").await;

        let response = OneShotBuilder::new(context.app(), route(luke.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<MessageResponse>()
            .await;
        assert_eq!(MessageResponse::new("User deleted successfully"), response);

        assert!(!context.user_exists(*luke.id()).await);
        assert!(context.user_exists(*leia.id()).await);
    }

    #[tokio::test]
    async fn test_cascades_to_favorites() {
        let context = TestContext::setup().await;

        let luke = context.add_user("luke").await;
        let leia = context.add_user("leia").await;
        let yoda = context.add_character("Yoda", None, None).await;
        context.add_favorite(&luke, FavoriteTarget::Character(*yoda.id())).await;
        let kept = context.add_favorite(&leia, FavoriteTarget::Character(*yoda.id())).await;

        OneShotBuilder::new(context.app(), route(luke.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<MessageResponse>()
            .await;

        assert!(context.favorites_of(&luke).await.is_empty());
        assert_eq!(vec![kept], context.favorites_of(&leia).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(1))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^User not found$")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
