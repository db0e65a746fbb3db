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

//! API to get the details of a user.

use crate::driver::Driver;
use crate::model::{User, UserId};
use axum::Json;
use axum::extract::State;
use holocron_core::rest::{EmptyBody, PathParams, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<UserId>,
    _: EmptyBody,
) -> RestResult<Json<User>> {
    let user = driver.get_user(id).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use holocron_core::rest::testutils::OneShotBuilder;
    use holocron_core::test_payload_must_be_empty;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/user/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        context.add_user("luke").await;
        let leia = context.add_user("leia").await;

        let response = OneShotBuilder::new(context.into_app(), route(leia.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<User>()
            .await;
        assert_eq!(leia, response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(17))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^User not found$")
            .await;
    }

    #[tokio::test]
    async fn test_bad_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::GET, "/user/luke"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Cannot parse")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
