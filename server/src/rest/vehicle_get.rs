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

//! API to get the details of a vehicle.

use crate::driver::Driver;
use crate::model::{Vehicle, VehicleId};
use axum::Json;
use axum::extract::State;
use holocron_core::rest::{EmptyBody, PathParams, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<VehicleId>,
    _: EmptyBody,
) -> RestResult<Json<Vehicle>> {
    let vehicle = driver.get_vehicle(id).await?;
    Ok(Json(vehicle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use holocron_core::rest::testutils::OneShotBuilder;
    use holocron_core::test_payload_must_be_empty;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/vehicle/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let atat = context.add_vehicle("AT-AT").await;

        let response = OneShotBuilder::new(context.into_app(), route(atat.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<Vehicle>()
            .await;
        assert_eq!(atat, response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(9))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Vehicle not found$")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
