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

//! Operations on cocktails that also touch their ingredient lines.

use crate::db::{self, Table};
use crate::driver::Driver;
use crate::driver::resources::{insert_checked, not_found, update_checked};
use crate::model::{
    Cocktail, CocktailFields, CocktailIngredient, CocktailIngredientFields, Id, RecipeItem,
};
use cocktails_core::db::Executor;
use cocktails_core::driver::DriverResult;
use log::debug;

/// Adds the ingredient lines in `items` to the cocktail `cocktail_id`.
async fn add_recipe(
    ex: &mut Executor,
    cocktail_id: &Id,
    items: Vec<RecipeItem>,
) -> DriverResult<()> {
    for item in items {
        let fields =
            CocktailIngredientFields::new(cocktail_id.clone(), item.ingredient_id, item.quantity);
        insert_checked(ex, fields).await?;
    }
    Ok(())
}

impl Driver {
    /// Creates a new cocktail with `fields` and, if given, its ingredient lines.
    ///
    /// Either everything is stored or nothing is.
    pub(crate) async fn create_cocktail(
        self,
        fields: CocktailFields,
        ingredients: Option<Vec<RecipeItem>>,
    ) -> DriverResult<Cocktail> {
        let mut tx = self.db.begin().await?;
        let cocktail = insert_checked(tx.ex(), fields).await?;
        if let Some(items) = ingredients {
            add_recipe(tx.ex(), cocktail.id(), items).await?;
        }
        tx.commit().await?;
        Ok(cocktail)
    }

    /// Replaces the cocktail `id` with `fields`.  If `ingredients` are given, they replace all
    /// existing ingredient lines of the cocktail; otherwise the existing lines are kept.
    pub(crate) async fn update_cocktail(
        self,
        id: Id,
        fields: CocktailFields,
        ingredients: Option<Vec<RecipeItem>>,
    ) -> DriverResult<Cocktail> {
        let mut tx = self.db.begin().await?;
        let cocktail = update_checked(tx.ex(), id, fields).await?;
        if let Some(items) = ingredients {
            let removed = db::delete_cocktail_ingredients(tx.ex(), cocktail.id()).await?;
            debug!("Replacing {} ingredient lines of cocktail {}", removed, cocktail.id());
            add_recipe(tx.ex(), cocktail.id(), items).await?;
        }
        tx.commit().await?;
        Ok(cocktail)
    }

    /// Gets the ingredient lines of the cocktail `id`.
    pub(crate) async fn get_cocktail_ingredients(
        self,
        id: Id,
    ) -> DriverResult<Vec<CocktailIngredient>> {
        let mut tx = self.db.begin().await?;
        if !db::exists(tx.ex(), CocktailFields::TABLE, &id).await? {
            return Err(not_found::<CocktailFields>(&id));
        }
        let lines = db::list_cocktail_ingredients(tx.ex(), &id).await?;
        tx.commit().await?;
        Ok(lines)
    }
}
