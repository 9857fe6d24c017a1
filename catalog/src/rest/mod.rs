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

//! Entry point to the REST server.

use crate::db::Table;
use crate::driver::Driver;
use crate::model::{
    CocktailFields, CocktailIngredientFields, FavoriteFields, IngredientFields, RatingFields,
    UserFields, UserIngredientFields,
};
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;

mod cocktail_ingredients_get;
mod cocktail_put;
mod cocktails_post;
mod entities_get;
mod entities_post;
mod entity_delete;
mod entity_get;
mod entity_put;
#[cfg(test)]
mod testutils;

/// Adds the list/get/create/update/delete APIs for the entities of type `T` under `path`.
fn resource<T: Table>(router: Router<Driver>, path: &str) -> Router<Driver> {
    router.route(path, get(entities_get::handler::<T>).post(entities_post::handler::<T>)).route(
        &format!("{}/:id", path),
        get(entity_get::handler::<T>)
            .put(entity_put::handler::<T>)
            .delete(entity_delete::handler::<T>),
    )
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    let router = Router::new()
        .route(
            "/cocktails",
            get(entities_get::handler::<CocktailFields>).post(cocktails_post::handler),
        )
        .route(
            "/cocktails/:id",
            get(entity_get::handler::<CocktailFields>)
                .put(cocktail_put::handler)
                .delete(entity_delete::handler::<CocktailFields>),
        )
        .route("/cocktails/:id/ingredients", get(cocktail_ingredients_get::handler));
    let router = resource::<UserFields>(router, "/users");
    let router = resource::<IngredientFields>(router, "/ingredients");
    let router = resource::<CocktailIngredientFields>(router, "/cocktail-ingredients");
    let router = resource::<FavoriteFields>(router, "/favorites");
    let router = resource::<UserIngredientFields>(router, "/user-ingredients");
    let router = resource::<RatingFields>(router, "/ratings");
    router.layer(CorsLayer::permissive()).with_state(driver)
}
