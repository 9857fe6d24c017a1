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

//! API to create a cocktail along with its ingredient lines.

use crate::driver::Driver;
use crate::model::CocktailCreate;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use cocktails_core::rest::{JsonBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<CocktailCreate>,
) -> Result<impl IntoResponse, RestError> {
    let cocktail = driver.create_cocktail(request.fields, request.ingredients).await?;
    Ok((http::StatusCode::CREATED, Json(cocktail)))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use cocktails_core::rest::testutils::*;
    use serde_json::json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/cocktails".to_owned())
    }

    #[tokio::test]
    async fn test_without_ingredients() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(json!({"name": "Mojito", "description": "Fresh"}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Cocktail>()
            .await;
        let exp_fields = CocktailFields::new(
            Name::new("Mojito").unwrap(),
            Some("Fresh".to_owned()),
            None,
            None,
            None,
        );
        assert_eq!(&exp_fields, response.fields());

        assert_eq!(vec![response.id().clone()], context.ids::<CocktailFields>().await);
        assert!(context.ids::<CocktailIngredientFields>().await.is_empty());
    }

    #[tokio::test]
    async fn test_with_ingredients() {
        let context = TestContext::setup().await;

        let user_id = context.create_user("a@example.com").await;
        let rum_id = context.create_ingredient("Rum").await;
        let lime_id = context.create_ingredient("Lime").await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(json!({
                "name": "Daiquiri",
                "user_id": user_id,
                "ingredients": [
                    {"ingredient_id": rum_id, "quantity": 60},
                    {"ingredient_id": lime_id, "quantity": 22.5}
                ]
            }))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!("Daiquiri", response["name"]);
        assert_eq!(json!(user_id), response["user_id"]);
        assert!(response.get("ingredients").is_none());

        let line_ids = context.ids::<CocktailIngredientFields>().await;
        assert_eq!(2, line_ids.len());
        let line = context.get::<CocktailIngredientFields>(&line_ids[1]).await.unwrap();
        assert_eq!(response["id"], json!(line.fields().cocktail_id()));
        assert_eq!(&lime_id, line.fields().ingredient_id());
        assert_eq!(22.5, *line.fields().quantity());
    }

    #[tokio::test]
    async fn test_unknown_ingredient_stores_nothing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({
                "name": "Daiquiri",
                "ingredients": [{"ingredient_id": "ghost", "quantity": 1}]
            }))
            .await
            .expect_status(http::StatusCode::UNPROCESSABLE_ENTITY)
            .expect_error("Ingredient ghost does not exist")
            .await;

        assert!(context.ids::<CocktailFields>().await.is_empty());
        assert!(context.ids::<CocktailIngredientFields>().await.is_empty());
    }

    #[tokio::test]
    async fn test_validation_error() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"description": "No name"}))
            .await
            .expect_status(http::StatusCode::UNPROCESSABLE_ENTITY)
            .expect_error("missing field `name`")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
