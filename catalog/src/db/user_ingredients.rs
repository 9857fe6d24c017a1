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

//! Storage of the ingredients in users' pantries.

use crate::db::{Reference, Table, expect_one_row};
use crate::model::{Id, IngredientFields, UserFields, UserIngredientFields};
use async_trait::async_trait;
use cocktails_core::db::{DbResult, Executor, map_sqlx_error};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

#[async_trait]
impl Table for UserIngredientFields {
    const TABLE: &'static str = "user_ingredients";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let user_id: String = row.try_get("user_id").map_err(map_sqlx_error)?;
        let ingredient_id: String = row.try_get("ingredient_id").map_err(map_sqlx_error)?;

        Ok(UserIngredientFields::new(Id::new(user_id)?, Id::new(ingredient_id)?))
    }

    fn references(&self) -> Vec<Reference<'_>> {
        vec![
            Reference::to::<UserFields>(self.user_id()),
            Reference::to::<IngredientFields>(self.ingredient_id()),
        ]
    }

    async fn insert(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "INSERT INTO user_ingredients (id, user_id, ingredient_id) VALUES (?, ?, ?)";
        let done = sqlx::query(query_str)
            .bind(id.as_str())
            .bind(fields.user_id().as_str())
            .bind(fields.ingredient_id().as_str())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }

    async fn update(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "UPDATE user_ingredients SET user_id = ?, ingredient_id = ? WHERE id = ?";
        let done = sqlx::query(query_str)
            .bind(fields.user_id().as_str())
            .bind(fields.ingredient_id().as_str())
            .bind(id.as_str())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }
}
