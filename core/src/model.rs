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

//! Generic data types shared by services.

mod emailaddress;
pub use emailaddress::EmailAddress;
mod username;
pub use username::Username;

/// Model errors.  These are raised when a value fails construction-time validation.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Ensures that the value of `field` in `s` is not blank and fits in `max_length` characters.
///
/// This is the common validation applied to all free-form strings stored in the database.
pub fn validate_length(field: &str, s: &str, max_length: usize) -> ModelResult<()> {
    if s.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be empty", field)));
    }
    if s.chars().count() > max_length {
        return Err(ModelError(format!("{} is too long (max {} characters)", field, max_length)));
    }
    Ok(())
}
