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

//! Storage of the ingredient lines of cocktails.

use crate::db::{Reference, Table, expect_one_row};
use crate::model::{
    CocktailFields, CocktailIngredient, CocktailIngredientFields, Id, IngredientFields,
};
use async_trait::async_trait;
use cocktails_core::db::{DbResult, Executor, map_sqlx_error};
use futures::TryStreamExt;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

#[async_trait]
impl Table for CocktailIngredientFields {
    const TABLE: &'static str = "cocktail_ingredients";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let cocktail_id: String = row.try_get("cocktail_id").map_err(map_sqlx_error)?;
        let ingredient_id: String = row.try_get("ingredient_id").map_err(map_sqlx_error)?;
        let quantity: f64 = row.try_get("quantity").map_err(map_sqlx_error)?;

        Ok(CocktailIngredientFields::new(
            Id::new(cocktail_id)?,
            Id::new(ingredient_id)?,
            quantity,
        ))
    }

    fn references(&self) -> Vec<Reference<'_>> {
        vec![
            Reference::to::<CocktailFields>(self.cocktail_id()),
            Reference::to::<IngredientFields>(self.ingredient_id()),
        ]
    }

    async fn insert(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "
            INSERT INTO cocktail_ingredients (id, cocktail_id, ingredient_id, quantity)
            VALUES (?, ?, ?, ?)
        ";
        let done = sqlx::query(query_str)
            .bind(id.as_str())
            .bind(fields.cocktail_id().as_str())
            .bind(fields.ingredient_id().as_str())
            .bind(*fields.quantity())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }

    async fn update(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "
            UPDATE cocktail_ingredients
            SET cocktail_id = ?, ingredient_id = ?, quantity = ?
            WHERE id = ?
        ";
        let done = sqlx::query(query_str)
            .bind(fields.cocktail_id().as_str())
            .bind(fields.ingredient_id().as_str())
            .bind(*fields.quantity())
            .bind(id.as_str())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }
}

/// Gets the ingredient lines of the cocktail `cocktail_id` in insertion order.
pub(crate) async fn list_cocktail_ingredients(
    ex: &mut Executor,
    cocktail_id: &Id,
) -> DbResult<Vec<CocktailIngredient>> {
    let query_str = "SELECT * FROM cocktail_ingredients WHERE cocktail_id = ? ORDER BY rowid";
    let mut rows = sqlx::query(query_str).bind(cocktail_id.as_str()).fetch(ex);

    let mut lines = vec![];
    while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
        let id: String = row.try_get("id").map_err(map_sqlx_error)?;
        lines.push(CocktailIngredient::new(
            Id::new(id)?,
            CocktailIngredientFields::from_row(&row)?,
        ));
    }
    Ok(lines)
}

/// Deletes all ingredient lines of the cocktail `cocktail_id` and returns how many there were.
pub(crate) async fn delete_cocktail_ingredients(
    ex: &mut Executor,
    cocktail_id: &Id,
) -> DbResult<u64> {
    let query_str = "DELETE FROM cocktail_ingredients WHERE cocktail_id = ?";
    let done = sqlx::query(query_str)
        .bind(cocktail_id.as_str())
        .execute(ex)
        .await
        .map_err(map_sqlx_error)?;
    Ok(done.rows_affected())
}
