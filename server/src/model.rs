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

//! High-level data types.

use derive_getters::Getters;
use holocron_core::model::{EmailAddress, ModelError, ModelResult, Username, validate_length};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use time::OffsetDateTime;

/// Maximum length of the name of characters, planets and vehicles.
const MAX_NAME_LENGTH: usize = 50;

/// Maximum length of a character's gender.
const MAX_GENDER_LENGTH: usize = 20;

/// Maximum length of a character's birth year.
const MAX_BIRTH_YEAR_LENGTH: usize = 15;

/// Maximum length of a planet's climate.
const MAX_CLIMATE_LENGTH: usize = 50;

/// Maximum length of a vehicle's model and manufacturer.
const MAX_VEHICLE_DETAIL_LENGTH: usize = 100;

/// Generates a newtype wrapper over the numeric identifier of an entity.
macro_rules! id_type [
    ( $name:ident, $what:literal ) => {
        #[doc = concat!("Identifier of ", $what, ".")]
        #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub(crate) struct $name(i64);

        impl $name {
            /// Creates a new identifier from its raw database value.
            pub(crate) fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database value of the identifier.
            pub(crate) fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    }
];

id_type!(UserId, "a user");
id_type!(CharacterId, "a character");
id_type!(PlanetId, "a planet");
id_type!(VehicleId, "a vehicle");
id_type!(FavoriteId, "a favorite");

/// Validates the optional free-form `value` of `field`, which cannot exceed `max_length`.
fn validate_optional(field: &str, value: &Option<String>, max_length: usize) -> ModelResult<()> {
    match value {
        Some(s) if s.chars().count() > max_length => Err(ModelError(format!(
            "{} is too long (max {} characters)",
            field, max_length
        ))),
        _ => Ok(()),
    }
}

/// The unique name of a character, planet or vehicle.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Name(String);

impl Name {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        validate_length("Name", &s, MAX_NAME_LENGTH)?;
        Ok(Self(s))
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Name::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
impl From<&'static str> for Name {
    fn from(name: &'static str) -> Self {
        Name::new(name).expect("Hardcoded names must be valid")
    }
}

/// A user's password.
///
/// Passwords are stored as given and are never serialized back to clients.
#[derive(Clone, PartialEq)]
pub(crate) struct Password(String);

impl Password {
    /// Creates a new password from an untrusted string `s`, making sure it is not empty.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Password cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the password.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(scrubbed)")
    }
}

/// Details to create a new user.
#[derive(Debug, Getters)]
pub(crate) struct NewUser {
    /// Email address of the user.  Must be unique.
    email: EmailAddress,

    /// Username of the user.  Must be unique.
    username: Username,

    /// Password of the user.
    password: Password,

    /// Whether the account is active.
    is_active: bool,
}

impl NewUser {
    /// Creates the details of a new user.
    pub(crate) fn new(
        email: EmailAddress,
        username: Username,
        password: Password,
        is_active: bool,
    ) -> Self {
        Self { email, username, password, is_active }
    }
}

/// A registered user.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct User {
    /// Identifier of the user.
    id: UserId,

    /// Email address of the user.
    email: EmailAddress,

    /// Username of the user.
    username: Username,

    /// Whether the account is active.
    is_active: bool,
}

impl User {
    /// Creates a user that has been assigned the identifier `id`.
    pub(crate) fn new(
        id: UserId,
        email: EmailAddress,
        username: Username,
        is_active: bool,
    ) -> Self {
        Self { id, email, username, is_active }
    }
}

/// Details to create a new planet.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct NewPlanet {
    /// Name of the planet.  Must be unique.
    name: Name,

    /// Free-form description of the planet's climate.
    climate: Option<String>,
}

impl NewPlanet {
    /// Creates the details of a new planet, validating the optional fields.
    pub(crate) fn new(name: Name, climate: Option<String>) -> ModelResult<Self> {
        validate_optional("Climate", &climate, MAX_CLIMATE_LENGTH)?;
        Ok(Self { name, climate })
    }
}

/// A planet.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Planet {
    /// Identifier of the planet.
    id: PlanetId,

    /// Name of the planet.
    name: Name,

    /// Free-form description of the planet's climate.
    climate: Option<String>,
}

impl Planet {
    /// Creates a planet from its `details` once it has been assigned the identifier `id`.
    pub(crate) fn new(id: PlanetId, details: NewPlanet) -> Self {
        Self { id, name: details.name, climate: details.climate }
    }
}

/// Details to create a new vehicle.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct NewVehicle {
    /// Name of the vehicle.  Must be unique.
    name: Name,

    /// Model of the vehicle.
    model: Option<String>,

    /// Manufacturer of the vehicle.
    manufacturer: Option<String>,
}

impl NewVehicle {
    /// Creates the details of a new vehicle, validating the optional fields.
    pub(crate) fn new(
        name: Name,
        model: Option<String>,
        manufacturer: Option<String>,
    ) -> ModelResult<Self> {
        validate_optional("Model", &model, MAX_VEHICLE_DETAIL_LENGTH)?;
        validate_optional("Manufacturer", &manufacturer, MAX_VEHICLE_DETAIL_LENGTH)?;
        Ok(Self { name, model, manufacturer })
    }
}

/// A vehicle.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Vehicle {
    /// Identifier of the vehicle.
    id: VehicleId,

    /// Name of the vehicle.
    name: Name,

    /// Model of the vehicle.
    model: Option<String>,

    /// Manufacturer of the vehicle.
    manufacturer: Option<String>,
}

impl Vehicle {
    /// Creates a vehicle from its `details` once it has been assigned the identifier `id`.
    pub(crate) fn new(id: VehicleId, details: NewVehicle) -> Self {
        Self { id, name: details.name, model: details.model, manufacturer: details.manufacturer }
    }
}

/// Details to create a new character.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct NewCharacter {
    /// Name of the character.  Must be unique.
    name: Name,

    /// Gender of the character.
    gender: Option<String>,

    /// Birth year of the character in whichever calendar the client likes.
    birth_year: Option<String>,

    /// Planet the character comes from.
    homeplanet_id: Option<PlanetId>,

    /// Vehicle the character drives.
    vehicle_id: Option<VehicleId>,
}

impl NewCharacter {
    /// Creates the details of a new character, validating the optional fields.
    pub(crate) fn new(
        name: Name,
        gender: Option<String>,
        birth_year: Option<String>,
        homeplanet_id: Option<PlanetId>,
        vehicle_id: Option<VehicleId>,
    ) -> ModelResult<Self> {
        validate_optional("Gender", &gender, MAX_GENDER_LENGTH)?;
        validate_optional("Birth year", &birth_year, MAX_BIRTH_YEAR_LENGTH)?;
        Ok(Self { name, gender, birth_year, homeplanet_id, vehicle_id })
    }
}

/// A character, with references to other entities by identifier.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Character {
    /// Identifier of the character.
    id: CharacterId,

    /// Name of the character.
    name: Name,

    /// Gender of the character.
    gender: Option<String>,

    /// Birth year of the character.
    birth_year: Option<String>,

    /// Planet the character comes from.
    homeplanet_id: Option<PlanetId>,

    /// Vehicle the character drives.
    vehicle_id: Option<VehicleId>,
}

impl Character {
    /// Creates a character from its `details` once it has been assigned the identifier `id`.
    pub(crate) fn new(id: CharacterId, details: NewCharacter) -> Self {
        Self {
            id,
            name: details.name,
            gender: details.gender,
            birth_year: details.birth_year,
            homeplanet_id: details.homeplanet_id,
            vehicle_id: details.vehicle_id,
        }
    }
}

/// A character along with the entities it references, as returned to clients.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct CharacterDetails {
    /// The character itself.
    #[serde(flatten)]
    character: Character,

    /// The planet the character comes from, if any.
    homeplanet: Option<Planet>,

    /// The vehicle the character drives, if any.
    vehicle: Option<Vehicle>,
}

impl CharacterDetails {
    /// Bundles a `character` with its referenced entities.
    pub(crate) fn new(
        character: Character,
        homeplanet: Option<Planet>,
        vehicle: Option<Vehicle>,
    ) -> Self {
        Self { character, homeplanet, vehicle }
    }
}

/// The kinds of entities that can be marked as favorites.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FavoriteKind {
    /// A character.
    Character,

    /// A planet.
    Planet,

    /// A vehicle.
    Vehicle,
}

impl FavoriteKind {
    /// Returns the name of the column that references entities of this kind.
    pub(crate) fn column(self) -> &'static str {
        match self {
            FavoriteKind::Character => "character_id",
            FavoriteKind::Planet => "planet_id",
            FavoriteKind::Vehicle => "vehicle_id",
        }
    }

    /// Returns the human-readable, capitalized name of this kind.
    pub(crate) fn title(self) -> &'static str {
        match self {
            FavoriteKind::Character => "Character",
            FavoriteKind::Planet => "Planet",
            FavoriteKind::Vehicle => "Vehicle",
        }
    }
}

/// The entity a favorite points to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FavoriteTarget {
    /// A favorite character.
    Character(CharacterId),

    /// A favorite planet.
    Planet(PlanetId),

    /// A favorite vehicle.
    Vehicle(VehicleId),
}

impl FavoriteTarget {
    /// Creates a target of the given `kind` pointing to the entity `id`.
    pub(crate) fn new(kind: FavoriteKind, id: i64) -> Self {
        match kind {
            FavoriteKind::Character => FavoriteTarget::Character(CharacterId::new(id)),
            FavoriteKind::Planet => FavoriteTarget::Planet(PlanetId::new(id)),
            FavoriteKind::Vehicle => FavoriteTarget::Vehicle(VehicleId::new(id)),
        }
    }

    /// Reconstructs a target from the three mutually-exclusive references of a favorite.
    pub(crate) fn from_references(
        character_id: Option<CharacterId>,
        planet_id: Option<PlanetId>,
        vehicle_id: Option<VehicleId>,
    ) -> ModelResult<Self> {
        match (character_id, planet_id, vehicle_id) {
            (Some(id), None, None) => Ok(FavoriteTarget::Character(id)),
            (None, Some(id), None) => Ok(FavoriteTarget::Planet(id)),
            (None, None, Some(id)) => Ok(FavoriteTarget::Vehicle(id)),
            _ => Err(ModelError("Favorite must reference exactly one entity".to_owned())),
        }
    }

    /// Returns the kind of the target.
    pub(crate) fn kind(self) -> FavoriteKind {
        match self {
            FavoriteTarget::Character(_) => FavoriteKind::Character,
            FavoriteTarget::Planet(_) => FavoriteKind::Planet,
            FavoriteTarget::Vehicle(_) => FavoriteKind::Vehicle,
        }
    }

    /// Returns the raw identifier of the target.
    pub(crate) fn id(self) -> i64 {
        match self {
            FavoriteTarget::Character(id) => id.as_i64(),
            FavoriteTarget::Planet(id) => id.as_i64(),
            FavoriteTarget::Vehicle(id) => id.as_i64(),
        }
    }
}

/// A user's mark of interest in one entity.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(into = "RawFavorite")]
#[cfg_attr(test, serde(try_from = "RawFavorite"))]
pub(crate) struct Favorite {
    /// Identifier of the favorite.
    id: FavoriteId,

    /// The user that owns the favorite.
    user_id: UserId,

    /// The entity the favorite points to.
    target: FavoriteTarget,

    /// When the favorite was created.
    created_at: OffsetDateTime,
}

impl Favorite {
    /// Creates a new favorite.
    pub(crate) fn new(
        id: FavoriteId,
        user_id: UserId,
        target: FavoriteTarget,
        created_at: OffsetDateTime,
    ) -> Self {
        Self { id, user_id, target, created_at }
    }
}

/// Wire representation of a `Favorite`, with one nullable reference per target kind.
#[derive(Deserialize, Serialize)]
struct RawFavorite {
    /// Identifier of the favorite.
    id: FavoriteId,

    /// The user that owns the favorite.
    user_id: UserId,

    /// The favorite character, if the target is a character.
    character_id: Option<CharacterId>,

    /// The favorite planet, if the target is a planet.
    planet_id: Option<PlanetId>,

    /// The favorite vehicle, if the target is a vehicle.
    vehicle_id: Option<VehicleId>,

    /// When the favorite was created, in RFC 3339 format.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<Favorite> for RawFavorite {
    fn from(favorite: Favorite) -> Self {
        let (mut character_id, mut planet_id, mut vehicle_id) = (None, None, None);
        match favorite.target {
            FavoriteTarget::Character(id) => character_id = Some(id),
            FavoriteTarget::Planet(id) => planet_id = Some(id),
            FavoriteTarget::Vehicle(id) => vehicle_id = Some(id),
        }
        RawFavorite {
            id: favorite.id,
            user_id: favorite.user_id,
            character_id,
            planet_id,
            vehicle_id,
            created_at: favorite.created_at,
        }
    }
}

impl TryFrom<RawFavorite> for Favorite {
    type Error = ModelError;

    fn try_from(raw: RawFavorite) -> ModelResult<Self> {
        let target =
            FavoriteTarget::from_references(raw.character_id, raw.planet_id, raw.vehicle_id)?;
        Ok(Favorite::new(raw.id, raw.user_id, target, raw.created_at))
    }
}

/// Whether a user has marked an entity as a favorite.
#[derive(Debug, PartialEq)]
pub(crate) struct FavoriteStatus {
    /// The user being queried.
    user_id: UserId,

    /// The entity being queried.
    target: FavoriteTarget,

    /// Whether the entity is one of the user's favorites.
    is_favorite: bool,
}

impl FavoriteStatus {
    /// Creates a new status report.
    pub(crate) fn new(user_id: UserId, target: FavoriteTarget, is_favorite: bool) -> Self {
        Self { user_id, target, is_favorite }
    }
}

impl Serialize for FavoriteStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("is_favorite", &self.is_favorite)?;
        map.serialize_entry("user_id", &self.user_id)?;
        map.serialize_entry(self.target.kind().column(), &self.target.id())?;
        map.end()
    }
}
