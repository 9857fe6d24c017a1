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

//! Storage of ingredients.

use crate::db::{Table, expect_one_row};
use crate::model::{Id, IngredientFields, Name};
use async_trait::async_trait;
use cocktails_core::db::{DbResult, Executor, map_sqlx_error};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

#[async_trait]
impl Table for IngredientFields {
    const TABLE: &'static str = "ingredients";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let unit: Option<String> = row.try_get("unit").map_err(map_sqlx_error)?;

        Ok(IngredientFields::new(Name::new(name)?, unit))
    }

    async fn insert(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "INSERT INTO ingredients (id, name, unit) VALUES (?, ?, ?)";
        let done = sqlx::query(query_str)
            .bind(id.as_str())
            .bind(fields.name().as_str())
            .bind(fields.unit().as_deref())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }

    async fn update(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "UPDATE ingredients SET name = ?, unit = ? WHERE id = ?";
        let done = sqlx::query(query_str)
            .bind(fields.name().as_str())
            .bind(fields.unit().as_deref())
            .bind(id.as_str())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }
}
