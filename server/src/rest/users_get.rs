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

//! API to list all users.

use crate::driver::Driver;
use crate::model::User;
use axum::Json;
use axum::extract::State;
use holocron_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<Json<Vec<User>>> {
    let users = driver.get_users().await?;
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use holocron_core::rest::testutils::OneShotBuilder;
    use holocron_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/user".to_owned())
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<User>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_some() {
        let context = TestContext::setup().await;

        let user1 = context.add_user("luke").await;
        let user2 = context.add_user("leia").await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<User>>()
            .await;
        assert_eq!(vec![user1, user2], response);
    }

    #[tokio::test]
    async fn test_password_not_exposed() {
        let context = TestContext::setup().await;

        context.add_user("han").await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .take_body_as_text()
            .await;
        assert!(!response.contains("password"));
        assert!(!response.contains("the-password"));
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
