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

//! Database tests shared by all implementations.

use crate::db::*;
use crate::model::*;
use holocron_core::db::{Db, DbError};
use holocron_core::model::{EmailAddress, Username};
use std::sync::Arc;
use time::macros::datetime;

/// Creates a user whose email and username derive from `name`.
async fn add_user(ex: &mut Executor, name: &str) -> User {
    let details = NewUser::new(
        EmailAddress::new(format!("{}@example.com", name)).unwrap(),
        Username::new(name).unwrap(),
        Password::new("secret").unwrap(),
        true,
    );
    create_user(ex, details).await.unwrap()
}

async fn add_planet(ex: &mut Executor, name: &'static str) -> Planet {
    create_planet(ex, NewPlanet::new(Name::from(name), None).unwrap()).await.unwrap()
}

async fn add_vehicle(ex: &mut Executor, name: &'static str) -> Vehicle {
    create_vehicle(ex, NewVehicle::new(Name::from(name), None, None).unwrap()).await.unwrap()
}

async fn add_character(
    ex: &mut Executor,
    name: &'static str,
    homeplanet_id: Option<PlanetId>,
    vehicle_id: Option<VehicleId>,
) -> Character {
    let details =
        NewCharacter::new(Name::from(name), None, None, homeplanet_id, vehicle_id).unwrap();
    create_character(ex, details).await.unwrap()
}

pub(crate) async fn test_users_lifecycle(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_users(&mut ex).await.unwrap().is_empty());

    let user1 = add_user(&mut ex, "luke").await;
    let user2 = add_user(&mut ex, "leia").await;
    assert_ne!(user1.id(), user2.id());
    assert_eq!(vec![user1.clone(), user2.clone()], get_users(&mut ex).await.unwrap());
    assert_eq!(user2, get_user(&mut ex, *user2.id()).await.unwrap());

    delete_user(&mut ex, *user1.id()).await.unwrap();
    assert_eq!(vec![user2], get_users(&mut ex).await.unwrap());
    assert_eq!(DbError::NotFound, get_user(&mut ex, *user1.id()).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_user(&mut ex, *user1.id()).await.unwrap_err());
}

pub(crate) async fn test_users_inactive(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let details = NewUser::new(
        EmailAddress::from("han@example.com"),
        Username::from("han"),
        Password::new("falcon").unwrap(),
        false,
    );
    let user = create_user(&mut ex, details).await.unwrap();
    assert!(!user.is_active());
    assert!(!get_user(&mut ex, *user.id()).await.unwrap().is_active());
}

pub(crate) async fn test_users_exists(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let email = EmailAddress::from("luke@example.com");
    let username = Username::from("luke");
    assert!(!user_exists(&mut ex, &email, &username).await.unwrap());

    add_user(&mut ex, "luke").await;
    assert!(user_exists(&mut ex, &email, &username).await.unwrap());
    assert!(
        user_exists(&mut ex, &EmailAddress::from("other@example.com"), &username).await.unwrap()
    );
    assert!(user_exists(&mut ex, &email, &Username::from("other")).await.unwrap());
    assert!(
        !user_exists(&mut ex, &EmailAddress::from("other@example.com"), &Username::from("Luke"))
            .await
            .unwrap()
    );
}

pub(crate) async fn test_users_duplicate(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    add_user(&mut ex, "luke").await;
    let details = NewUser::new(
        EmailAddress::from("luke@example.com"),
        Username::from("skywalker"),
        Password::new("secret").unwrap(),
        true,
    );
    assert_eq!(DbError::AlreadyExists, create_user(&mut ex, details).await.unwrap_err());
}

pub(crate) async fn test_planets_lifecycle(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_planets(&mut ex).await.unwrap().is_empty());
    assert!(!planet_exists(&mut ex, &Name::from("Tatooine")).await.unwrap());

    let details = NewPlanet::new(Name::from("Tatooine"), Some("arid".to_owned())).unwrap();
    let tatooine = create_planet(&mut ex, details).await.unwrap();
    let hoth = add_planet(&mut ex, "Hoth").await;
    assert_eq!(&Some("arid".to_owned()), tatooine.climate());
    assert_eq!(&None, hoth.climate());
    assert!(planet_exists(&mut ex, &Name::from("Tatooine")).await.unwrap());

    assert_eq!(vec![tatooine.clone(), hoth.clone()], get_planets(&mut ex).await.unwrap());
    assert_eq!(tatooine, get_planet(&mut ex, *tatooine.id()).await.unwrap());

    delete_planet(&mut ex, *tatooine.id()).await.unwrap();
    assert_eq!(vec![hoth], get_planets(&mut ex).await.unwrap());
    assert_eq!(DbError::NotFound, get_planet(&mut ex, *tatooine.id()).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_planet(&mut ex, *tatooine.id()).await.unwrap_err());
}

pub(crate) async fn test_planets_duplicate(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    add_planet(&mut ex, "Hoth").await;
    let details = NewPlanet::new(Name::from("Hoth"), Some("frozen".to_owned())).unwrap();
    assert_eq!(DbError::AlreadyExists, create_planet(&mut ex, details).await.unwrap_err());
}

pub(crate) async fn test_vehicles_lifecycle(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_vehicles(&mut ex).await.unwrap().is_empty());
    assert!(!vehicle_exists(&mut ex, &Name::from("X-wing")).await.unwrap());

    let details = NewVehicle::new(
        Name::from("X-wing"),
        Some("T-65B".to_owned()),
        Some("Incom Corporation".to_owned()),
    )
    .unwrap();
    let xwing = create_vehicle(&mut ex, details).await.unwrap();
    let speeder = add_vehicle(&mut ex, "Speeder").await;
    assert_eq!(&Some("T-65B".to_owned()), xwing.model());
    assert_eq!(&Some("Incom Corporation".to_owned()), xwing.manufacturer());
    assert!(vehicle_exists(&mut ex, &Name::from("X-wing")).await.unwrap());

    assert_eq!(vec![xwing.clone(), speeder.clone()], get_vehicles(&mut ex).await.unwrap());
    assert_eq!(speeder, get_vehicle(&mut ex, *speeder.id()).await.unwrap());

    delete_vehicle(&mut ex, *xwing.id()).await.unwrap();
    assert_eq!(vec![speeder], get_vehicles(&mut ex).await.unwrap());
    assert_eq!(DbError::NotFound, get_vehicle(&mut ex, *xwing.id()).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_vehicle(&mut ex, *xwing.id()).await.unwrap_err());
}

pub(crate) async fn test_characters_lifecycle(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_characters(&mut ex).await.unwrap().is_empty());
    assert!(!character_exists(&mut ex, &Name::from("Luke Skywalker")).await.unwrap());

    let tatooine = add_planet(&mut ex, "Tatooine").await;
    let speeder = add_vehicle(&mut ex, "Speeder").await;
    let details = NewCharacter::new(
        Name::from("Luke Skywalker"),
        Some("male".to_owned()),
        Some("19BBY".to_owned()),
        Some(*tatooine.id()),
        Some(*speeder.id()),
    )
    .unwrap();
    let luke = create_character(&mut ex, details).await.unwrap();
    let yoda = add_character(&mut ex, "Yoda", None, None).await;
    assert_eq!(&Some(*tatooine.id()), luke.homeplanet_id());
    assert_eq!(&Some(*speeder.id()), luke.vehicle_id());
    assert!(character_exists(&mut ex, &Name::from("Luke Skywalker")).await.unwrap());

    assert_eq!(vec![luke.clone(), yoda.clone()], get_characters(&mut ex).await.unwrap());
    assert_eq!(luke, get_character(&mut ex, *luke.id()).await.unwrap());

    delete_character(&mut ex, *luke.id()).await.unwrap();
    assert_eq!(vec![yoda], get_characters(&mut ex).await.unwrap());
    assert_eq!(DbError::NotFound, get_character(&mut ex, *luke.id()).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_character(&mut ex, *luke.id()).await.unwrap_err());
}

pub(crate) async fn test_characters_missing_references(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let details =
        NewCharacter::new(Name::from("Rey"), None, None, Some(PlanetId::new(123)), None).unwrap();
    assert_eq!(DbError::NotFound, create_character(&mut ex, details).await.unwrap_err());

    let details =
        NewCharacter::new(Name::from("Rey"), None, None, None, Some(VehicleId::new(5))).unwrap();
    assert_eq!(DbError::NotFound, create_character(&mut ex, details).await.unwrap_err());

    assert!(get_characters(&mut ex).await.unwrap().is_empty());
}

pub(crate) async fn test_characters_clear_references(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let tatooine = add_planet(&mut ex, "Tatooine").await;
    let naboo = add_planet(&mut ex, "Naboo").await;
    let speeder = add_vehicle(&mut ex, "Speeder").await;
    let luke = add_character(&mut ex, "Luke", Some(*tatooine.id()), Some(*speeder.id())).await;
    let anakin = add_character(&mut ex, "Anakin", Some(*tatooine.id()), None).await;
    let padme = add_character(&mut ex, "Padme", Some(*naboo.id()), Some(*speeder.id())).await;

    assert_eq!(2, clear_planet_references(&mut ex, *tatooine.id()).await.unwrap());
    assert_eq!(0, clear_planet_references(&mut ex, *tatooine.id()).await.unwrap());
    delete_planet(&mut ex, *tatooine.id()).await.unwrap();

    let luke = get_character(&mut ex, *luke.id()).await.unwrap();
    assert_eq!(&None, luke.homeplanet_id());
    assert_eq!(&Some(*speeder.id()), luke.vehicle_id());
    assert_eq!(&None, get_character(&mut ex, *anakin.id()).await.unwrap().homeplanet_id());
    assert_eq!(padme, get_character(&mut ex, *padme.id()).await.unwrap());

    assert_eq!(2, clear_vehicle_references(&mut ex, *speeder.id()).await.unwrap());
    delete_vehicle(&mut ex, *speeder.id()).await.unwrap();

    assert_eq!(&None, get_character(&mut ex, *luke.id()).await.unwrap().vehicle_id());
    let padme = get_character(&mut ex, *padme.id()).await.unwrap();
    assert_eq!(&Some(*naboo.id()), padme.homeplanet_id());
    assert_eq!(&None, padme.vehicle_id());
}

pub(crate) async fn test_favorites_lifecycle(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let user = add_user(&mut ex, "luke").await;
    let yoda = add_character(&mut ex, "Yoda", None, None).await;
    let dagobah = add_planet(&mut ex, "Dagobah").await;
    let xwing = add_vehicle(&mut ex, "X-wing").await;

    assert!(get_favorites(&mut ex, *user.id()).await.unwrap().is_empty());

    let target1 = FavoriteTarget::Character(*yoda.id());
    let target2 = FavoriteTarget::Planet(*dagobah.id());
    let target3 = FavoriteTarget::Vehicle(*xwing.id());
    assert_eq!(None, get_favorite(&mut ex, *user.id(), target1).await.unwrap());

    let fav1 = create_favorite(&mut ex, *user.id(), target1, datetime!(2023-12-01 10:00:00 UTC))
        .await
        .unwrap();
    let fav2 =
        create_favorite(&mut ex, *user.id(), target2, datetime!(2023-12-01 10:00:05.123 UTC))
            .await
            .unwrap();
    let fav3 = create_favorite(&mut ex, *user.id(), target3, datetime!(2023-12-02 08:30:00 UTC))
        .await
        .unwrap();
    assert_eq!(&target2, fav2.target());
    assert_eq!(&datetime!(2023-12-01 10:00:05.123 UTC), fav2.created_at());

    assert_eq!(
        vec![fav1.clone(), fav2.clone(), fav3.clone()],
        get_favorites(&mut ex, *user.id()).await.unwrap()
    );
    assert_eq!(Some(fav2.clone()), get_favorite(&mut ex, *user.id(), target2).await.unwrap());

    delete_favorite(&mut ex, *user.id(), target2).await.unwrap();
    assert_eq!(None, get_favorite(&mut ex, *user.id(), target2).await.unwrap());
    assert_eq!(vec![fav1, fav3], get_favorites(&mut ex, *user.id()).await.unwrap());
    assert_eq!(
        DbError::NotFound,
        delete_favorite(&mut ex, *user.id(), target2).await.unwrap_err()
    );
}

pub(crate) async fn test_favorites_same_id_different_kinds(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let user = add_user(&mut ex, "luke").await;
    let yoda = add_character(&mut ex, "Yoda", None, None).await;
    let dagobah = add_planet(&mut ex, "Dagobah").await;
    assert_eq!(yoda.id().as_i64(), dagobah.id().as_i64());

    let now = datetime!(2023-12-01 10:00:00 UTC);
    create_favorite(&mut ex, *user.id(), FavoriteTarget::Character(*yoda.id()), now)
        .await
        .unwrap();

    let planet = FavoriteTarget::Planet(*dagobah.id());
    assert_eq!(None, get_favorite(&mut ex, *user.id(), planet).await.unwrap());
    create_favorite(&mut ex, *user.id(), planet, now).await.unwrap();
    assert_eq!(2, get_favorites(&mut ex, *user.id()).await.unwrap().len());
}

pub(crate) async fn test_favorites_duplicate(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let user = add_user(&mut ex, "luke").await;
    let hoth = add_planet(&mut ex, "Hoth").await;
    let target = FavoriteTarget::Planet(*hoth.id());

    let now = datetime!(2023-12-01 10:00:00 UTC);
    create_favorite(&mut ex, *user.id(), target, now).await.unwrap();
    assert_eq!(
        DbError::AlreadyExists,
        create_favorite(&mut ex, *user.id(), target, now).await.unwrap_err()
    );

    let other = add_user(&mut ex, "leia").await;
    create_favorite(&mut ex, *other.id(), target, now).await.unwrap();
}

pub(crate) async fn test_favorites_missing_references(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let user = add_user(&mut ex, "luke").await;
    let hoth = add_planet(&mut ex, "Hoth").await;
    let now = datetime!(2023-12-01 10:00:00 UTC);

    assert_eq!(
        DbError::NotFound,
        create_favorite(&mut ex, UserId::new(999), FavoriteTarget::Planet(*hoth.id()), now)
            .await
            .unwrap_err()
    );
    assert_eq!(
        DbError::NotFound,
        create_favorite(&mut ex, *user.id(), FavoriteTarget::Vehicle(VehicleId::new(1)), now)
            .await
            .unwrap_err()
    );
}

pub(crate) async fn test_favorites_bulk_deletions(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let luke = add_user(&mut ex, "luke").await;
    let leia = add_user(&mut ex, "leia").await;
    let hoth = add_planet(&mut ex, "Hoth").await;
    let endor = add_planet(&mut ex, "Endor").await;
    let now = datetime!(2023-12-01 10:00:00 UTC);

    for user in [&luke, &leia] {
        for planet in [&hoth, &endor] {
            let target = FavoriteTarget::Planet(*planet.id());
            create_favorite(&mut ex, *user.id(), target, now).await.unwrap();
        }
    }

    assert_eq!(
        2,
        delete_target_favorites(&mut ex, FavoriteTarget::Planet(*hoth.id())).await.unwrap()
    );
    let favorites = get_favorites(&mut ex, *luke.id()).await.unwrap();
    assert_eq!(1, favorites.len());
    assert_eq!(&FavoriteTarget::Planet(*endor.id()), favorites[0].target());

    assert_eq!(1, delete_user_favorites(&mut ex, *luke.id()).await.unwrap());
    assert!(get_favorites(&mut ex, *luke.id()).await.unwrap().is_empty());
    assert_eq!(1, get_favorites(&mut ex, *leia.id()).await.unwrap().len());
    assert_eq!(0, delete_user_favorites(&mut ex, *luke.id()).await.unwrap());
}

pub(crate) async fn test_init_schema_is_idempotent(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let user = add_user(&mut ex, "luke").await;
    init_schema(&mut ex).await.unwrap();
    assert_eq!(vec![user], get_users(&mut ex).await.unwrap());
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta])? ) => {
        holocron_core::db::testutils::generate_tests!(
            $( #[$extra], )?
            $setup,
            $crate::db::tests,
            test_users_lifecycle,
            test_users_inactive,
            test_users_exists,
            test_users_duplicate,
            test_planets_lifecycle,
            test_planets_duplicate,
            test_vehicles_lifecycle,
            test_characters_lifecycle,
            test_characters_missing_references,
            test_characters_clear_references,
            test_favorites_lifecycle,
            test_favorites_same_id_different_kinds,
            test_favorites_duplicate,
            test_favorites_missing_references,
            test_favorites_bulk_deletions,
            test_init_schema_is_idempotent
        );
    }
];

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use holocron_core::db::postgres::testutils;

    generate_db_tests!(
        {
            let db = Arc::new(testutils::setup().await);
            init_schema(&mut db.ex().await.unwrap()).await.unwrap();
            let db: Arc<dyn Db + Send + Sync> = db;
            db
        },
        #[ignore = "Requires environment configuration and is expensive"]
    );
}

mod sqlite {
    use super::*;
    use holocron_core::db::sqlite::testutils;

    generate_db_tests!({
        let db = Arc::new(testutils::setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let db: Arc<dyn Db + Send + Sync> = db;
        db
    });
}
