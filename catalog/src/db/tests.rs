// Cocktail catalog
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

//! Tests for the database layer.

use crate::db::*;
use crate::model::*;
use cocktails_core::db::testutils::setup;
use cocktails_core::db::{Db, DbError, Executor, PoolExecutor, SqliteDb};
use cocktails_core::model::EmailAddress;

/// Opens a fresh database with the schema already in place.
async fn setup_db() -> (SqliteDb, PoolExecutor) {
    let db = setup().await;
    let mut ex = db.ex().await.unwrap();
    init_schema(&mut ex).await.unwrap();
    (db, ex)
}

/// Releases the executor and closes the database.
async fn teardown(db: SqliteDb, ex: PoolExecutor) {
    drop(ex);
    db.close().await;
}

/// Stores an entity with `fields` under a new identifier and returns the identifier.
async fn put<T: Table>(ex: &mut Executor, fields: &T) -> Id {
    let id = Id::generate();
    T::insert(ex, &id, fields).await.unwrap();
    id
}

/// Creates the attributes of an ingredient.
fn ingredient(name: &str, unit: Option<&str>) -> IngredientFields {
    IngredientFields::new(Name::new(name).unwrap(), unit.map(str::to_owned))
}

/// Creates the attributes of a user.
fn user(email: &str) -> UserFields {
    UserFields::new(
        EmailAddress::new(email).unwrap(),
        Name::new("Some user").unwrap(),
        HashedPassword::new("some hash"),
    )
}

/// Creates the attributes of a cocktail.
fn cocktail(name: &str, user_id: Option<&Id>) -> CocktailFields {
    CocktailFields::new(
        Name::new(name).unwrap(),
        Some("A description".to_owned()),
        None,
        Some("Shake well".to_owned()),
        user_id.cloned(),
    )
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let (db, mut ex) = setup_db().await;
    let id = put(&mut ex, &ingredient("Lime", None)).await;
    init_schema(&mut ex).await.unwrap();
    assert!(exists(&mut ex, "ingredients", &id).await.unwrap());
    teardown(db, ex).await;
}

#[tokio::test]
async fn test_insert_and_get() {
    let (db, mut ex) = setup_db().await;

    let fields = ingredient("Lime", Some("ml"));
    let id = put(&mut ex, &fields).await;

    let record = get::<IngredientFields>(&mut ex, &id).await.unwrap();
    assert_eq!(Record::new(id, fields), record);

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_get_not_found() {
    let (db, mut ex) = setup_db().await;

    put(&mut ex, &ingredient("Lime", None)).await;
    assert_eq!(
        DbError::NotFound,
        get::<IngredientFields>(&mut ex, &Id::new("unknown").unwrap()).await.unwrap_err()
    );

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_list_in_insertion_order() {
    let (db, mut ex) = setup_db().await;

    assert!(list::<IngredientFields>(&mut ex, &Page::default()).await.unwrap().is_empty());

    let mut exp = vec![];
    for name in ["Rum", "Lime", "Sugar", "Mint"] {
        let fields = ingredient(name, None);
        let id = put(&mut ex, &fields).await;
        exp.push(Record::new(id, fields));
    }

    let records = list::<IngredientFields>(&mut ex, &Page::default()).await.unwrap();
    assert_eq!(exp, records);

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_list_paginated() {
    let (db, mut ex) = setup_db().await;

    let mut ids = vec![];
    for name in ["Rum", "Lime", "Sugar", "Mint"] {
        ids.push(put(&mut ex, &ingredient(name, None)).await);
    }

    let ids_of = |records: Vec<Ingredient>| {
        records.into_iter().map(|r| r.id().clone()).collect::<Vec<Id>>()
    };

    let records = list::<IngredientFields>(&mut ex, &Page { skip: 1, limit: Some(2) }).await;
    assert_eq!(ids[1..3].to_vec(), ids_of(records.unwrap()));

    let records = list::<IngredientFields>(&mut ex, &Page { skip: 3, limit: None }).await;
    assert_eq!(ids[3..].to_vec(), ids_of(records.unwrap()));

    let records = list::<IngredientFields>(&mut ex, &Page { skip: 10, limit: None }).await;
    assert!(records.unwrap().is_empty());

    let records = list::<IngredientFields>(&mut ex, &Page { skip: 0, limit: Some(0) }).await;
    assert!(records.unwrap().is_empty());

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let (db, mut ex) = setup_db().await;

    let id = put(&mut ex, &ingredient("Lime", Some("ml"))).await;
    let other_id = put(&mut ex, &ingredient("Rum", Some("ml"))).await;

    let new_fields = ingredient("Lime juice", None);
    IngredientFields::update(&mut ex, &id, &new_fields).await.unwrap();

    assert_eq!(
        Record::new(id.clone(), new_fields),
        get::<IngredientFields>(&mut ex, &id).await.unwrap()
    );
    assert_eq!(
        Record::new(other_id.clone(), ingredient("Rum", Some("ml"))),
        get::<IngredientFields>(&mut ex, &other_id).await.unwrap()
    );

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_update_not_found() {
    let (db, mut ex) = setup_db().await;

    assert_eq!(
        DbError::NotFound,
        IngredientFields::update(&mut ex, &Id::generate(), &ingredient("Lime", None))
            .await
            .unwrap_err()
    );

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_delete() {
    let (db, mut ex) = setup_db().await;

    let id1 = put(&mut ex, &ingredient("Lime", None)).await;
    let id2 = put(&mut ex, &ingredient("Rum", None)).await;

    delete::<IngredientFields>(&mut ex, &id1).await.unwrap();
    assert!(!exists(&mut ex, "ingredients", &id1).await.unwrap());
    assert!(exists(&mut ex, "ingredients", &id2).await.unwrap());

    assert_eq!(DbError::NotFound, delete::<IngredientFields>(&mut ex, &id1).await.unwrap_err());

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_users_email_is_unique() {
    let (db, mut ex) = setup_db().await;

    let id = put(&mut ex, &user("a@example.com")).await;
    let other_id = put(&mut ex, &user("b@example.com")).await;

    assert_eq!(
        DbError::AlreadyExists,
        UserFields::insert(&mut ex, &Id::generate(), &user("a@example.com")).await.unwrap_err()
    );
    assert_eq!(
        DbError::AlreadyExists,
        UserFields::update(&mut ex, &other_id, &user("a@example.com")).await.unwrap_err()
    );

    // Rewriting a user with its own email is not a conflict.
    UserFields::update(&mut ex, &id, &user("a@example.com")).await.unwrap();

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_cocktail_with_and_without_creator() {
    let (db, mut ex) = setup_db().await;

    let user_id = put(&mut ex, &user("a@example.com")).await;

    let owned = cocktail("Mojito", Some(&user_id));
    let owned_id = put(&mut ex, &owned).await;
    let orphan = cocktail("Daiquiri", None);
    let orphan_id = put(&mut ex, &orphan).await;

    assert_eq!(
        Record::new(owned_id.clone(), owned),
        get::<CocktailFields>(&mut ex, &owned_id).await.unwrap()
    );
    assert_eq!(
        Record::new(orphan_id.clone(), orphan),
        get::<CocktailFields>(&mut ex, &orphan_id).await.unwrap()
    );

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_delete_leaves_dangling_references() {
    let (db, mut ex) = setup_db().await;

    let cocktail_id = put(&mut ex, &cocktail("Mojito", None)).await;
    let lime_id = put(&mut ex, &ingredient("Lime", None)).await;
    let line = CocktailIngredientFields::new(cocktail_id.clone(), lime_id, 30.0);
    let line_id = put(&mut ex, &line).await;

    delete::<CocktailFields>(&mut ex, &cocktail_id).await.unwrap();

    assert!(!exists(&mut ex, "cocktails", &cocktail_id).await.unwrap());
    assert_eq!(
        Record::new(line_id.clone(), line),
        get::<CocktailIngredientFields>(&mut ex, &line_id).await.unwrap()
    );

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_duplicate_favorites_are_distinct() {
    let (db, mut ex) = setup_db().await;

    let user_id = put(&mut ex, &user("a@example.com")).await;
    let cocktail_id = put(&mut ex, &cocktail("Mojito", None)).await;

    let favorite = FavoriteFields::new(user_id, cocktail_id);
    let id1 = put(&mut ex, &favorite).await;
    let id2 = put(&mut ex, &favorite).await;
    assert_ne!(id1, id2);

    assert_eq!(2, list::<FavoriteFields>(&mut ex, &Page::default()).await.unwrap().len());

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_link_tables_round_trip() {
    let (db, mut ex) = setup_db().await;

    let user_id = put(&mut ex, &user("a@example.com")).await;
    let cocktail_id = put(&mut ex, &cocktail("Mojito", None)).await;
    let ingredient_id = put(&mut ex, &ingredient("Mint", None)).await;

    let pantry = UserIngredientFields::new(user_id.clone(), ingredient_id);
    let pantry_id = put(&mut ex, &pantry).await;
    assert_eq!(
        Record::new(pantry_id.clone(), pantry),
        get::<UserIngredientFields>(&mut ex, &pantry_id).await.unwrap()
    );

    let rating = RatingFields::new(user_id, cocktail_id, 4.5);
    let rating_id = put(&mut ex, &rating).await;
    assert_eq!(
        Record::new(rating_id.clone(), rating),
        get::<RatingFields>(&mut ex, &rating_id).await.unwrap()
    );

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_cocktail_ingredients_helpers() {
    let (db, mut ex) = setup_db().await;

    let mojito_id = put(&mut ex, &cocktail("Mojito", None)).await;
    let daiquiri_id = put(&mut ex, &cocktail("Daiquiri", None)).await;
    let rum_id = put(&mut ex, &ingredient("Rum", Some("ml"))).await;
    let lime_id = put(&mut ex, &ingredient("Lime", Some("ml"))).await;

    let line1 = CocktailIngredientFields::new(mojito_id.clone(), rum_id.clone(), 45.0);
    let line1_id = put(&mut ex, &line1).await;
    let other = CocktailIngredientFields::new(daiquiri_id.clone(), rum_id, 60.0);
    put(&mut ex, &other).await;
    let line2 = CocktailIngredientFields::new(mojito_id.clone(), lime_id, 30.0);
    let line2_id = put(&mut ex, &line2).await;

    assert_eq!(
        vec![Record::new(line1_id, line1), Record::new(line2_id, line2)],
        list_cocktail_ingredients(&mut ex, &mojito_id).await.unwrap()
    );

    assert_eq!(2, delete_cocktail_ingredients(&mut ex, &mojito_id).await.unwrap());
    assert!(list_cocktail_ingredients(&mut ex, &mojito_id).await.unwrap().is_empty());
    assert_eq!(1, list_cocktail_ingredients(&mut ex, &daiquiri_id).await.unwrap().len());
    assert_eq!(0, delete_cocktail_ingredients(&mut ex, &mojito_id).await.unwrap());

    teardown(db, ex).await;
}

#[tokio::test]
async fn test_corrupt_row_is_data_integrity_error() {
    let (db, mut ex) = setup_db().await;

    sqlx::query("INSERT INTO ingredients (id, name, unit) VALUES ('bad', '   ', NULL)")
        .execute(&mut *ex)
        .await
        .unwrap();

    match get::<IngredientFields>(&mut ex, &Id::new("bad").unwrap()).await {
        Err(DbError::DataIntegrityError(e)) => assert!(e.contains("Name cannot be empty")),
        e => panic!("{:?}", e),
    }

    teardown(db, ex).await;
}
