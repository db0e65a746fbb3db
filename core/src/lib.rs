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

//! Shared plumbing for the Holocron service.
//!
//! The service is structured in the following layers, and this crate provides the generic pieces
//! of each of them:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the application.
//!     There should be no logic in here other than construction-time validation.
//!
//! 1.  `db`: The persistence layer.  Services implement their queries as free functions that take
//!     an `Executor`, which abstracts over the supported database backends and over whether the
//!     queries run inside a transaction or not.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type that owns the
//!     database and coordinates multi-step operations inside a single transaction.
//!
//! 1.  `rest`: The HTTP layer.  Services provide an `axum::Router` whose handlers are backed by
//!     the `Driver`.
//!
//! There are result and error types in every layer, such as `DbResult` and `DbError`.  Errors float
//! to the top of the app using the `?` operator and are translated to HTTP status codes once
//! returned from the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
