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

//! API to list the entities of one kind.

use crate::db::Table;
use crate::driver::Driver;
use crate::model::Page;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use cocktails_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler<T: Table>(
    State(driver): State<Driver>,
    query: Result<Query<Page>, QueryRejection>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let Query(page) = query?;
    let records = driver.list::<T>(page).await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use cocktails_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/ingredients".to_owned())
    }

    fn ids_of(records: Vec<Ingredient>) -> Vec<Id> {
        records.into_iter().map(|r| r.id().clone()).collect()
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Ingredient>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_all_in_insertion_order() {
        let context = TestContext::setup().await;

        let mut exp = vec![];
        for name in ["Rum", "Lime", "Mint"] {
            let fields = IngredientFields::new(Name::new(name).unwrap(), Some("ml".to_owned()));
            let id = context.insert(fields.clone()).await;
            exp.push(Record::new(id, fields));
        }

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Ingredient>>()
            .await;
        assert_eq!(exp, response);
    }

    #[tokio::test]
    async fn test_paginated() {
        let context = TestContext::setup().await;

        let mut ids = vec![];
        for name in ["Rum", "Lime", "Mint", "Sugar"] {
            ids.push(context.create_ingredient(name).await);
        }

        let response = OneShotBuilder::new(context.app(), route())
            .with_query(Page { skip: 1, limit: Some(2) })
            .send_empty()
            .await
            .expect_json::<Vec<Ingredient>>()
            .await;
        assert_eq!(ids[1..3].to_vec(), ids_of(response));

        let response = OneShotBuilder::new(context.app(), route())
            .with_query(Page { skip: 3, limit: None })
            .send_empty()
            .await
            .expect_json::<Vec<Ingredient>>()
            .await;
        assert_eq!(ids[3..].to_vec(), ids_of(response));
    }

    #[tokio::test]
    async fn test_bad_query() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("skip", "-1")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Failed to deserialize query string")
            .await;
    }

    #[tokio::test]
    async fn test_every_kind() {
        let context = TestContext::setup().await;

        let user_id = context.create_user("a@example.com").await;
        let cocktail_id = context.create_cocktail("Mojito").await;
        let ingredient_id = context.create_ingredient("Mint").await;
        context
            .insert(CocktailIngredientFields::new(cocktail_id.clone(), ingredient_id.clone(), 5.0))
            .await;
        context.insert(FavoriteFields::new(user_id.clone(), cocktail_id.clone())).await;
        context.insert(UserIngredientFields::new(user_id.clone(), ingredient_id)).await;
        context.insert(RatingFields::new(user_id, cocktail_id, 4.0)).await;

        for path in [
            "/users",
            "/cocktails",
            "/ingredients",
            "/cocktail-ingredients",
            "/favorites",
            "/user-ingredients",
            "/ratings",
        ] {
            let response = OneShotBuilder::new(context.app(), (http::Method::GET, path))
                .send_empty()
                .await
                .expect_json::<Vec<serde_json::Value>>()
                .await;
            assert_eq!(1, response.len(), "Unexpected contents for {}", path);
        }
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
