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

//! API to list all vehicles.

use crate::driver::Driver;
use crate::model::Vehicle;
use axum::Json;
use axum::extract::State;
use holocron_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<Json<Vec<Vehicle>>> {
    let vehicles = driver.get_vehicles().await?;
    Ok(Json(vehicles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use holocron_core::rest::testutils::OneShotBuilder;
    use holocron_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/vehicle".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Vehicle>>()
            .await;
        assert!(response.is_empty());

        let speeder = context.add_vehicle("Speeder").await;
        let xwing = context.add_vehicle("X-wing").await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Vehicle>>()
            .await;
        assert_eq!(vec![speeder, xwing], response);
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
