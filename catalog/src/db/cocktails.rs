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

//! Storage of cocktails.

use crate::db::{Reference, Table, bind_id, expect_one_row};
use crate::model::{CocktailFields, Id, Name, UserFields};
use async_trait::async_trait;
use cocktails_core::db::{DbResult, Executor, map_sqlx_error};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

#[async_trait]
impl Table for CocktailFields {
    const TABLE: &'static str = "cocktails";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let description: Option<String> = row.try_get("description").map_err(map_sqlx_error)?;
        let image: Option<String> = row.try_get("image").map_err(map_sqlx_error)?;
        let recipe: Option<String> = row.try_get("recipe").map_err(map_sqlx_error)?;
        let user_id: Option<String> = row.try_get("user_id").map_err(map_sqlx_error)?;

        Ok(CocktailFields::new(
            Name::new(name)?,
            description,
            image,
            recipe,
            user_id.map(Id::new).transpose()?,
        ))
    }

    fn references(&self) -> Vec<Reference<'_>> {
        self.user_id().iter().map(Reference::to::<UserFields>).collect()
    }

    async fn insert(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "
            INSERT INTO cocktails (id, name, description, image, recipe, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
        ";
        let done = sqlx::query(query_str)
            .bind(id.as_str())
            .bind(fields.name().as_str())
            .bind(fields.description().as_deref())
            .bind(fields.image().as_deref())
            .bind(fields.recipe().as_deref())
            .bind(bind_id(fields.user_id()))
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }

    async fn update(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "
            UPDATE cocktails
            SET name = ?, description = ?, image = ?, recipe = ?, user_id = ?
            WHERE id = ?
        ";
        let done = sqlx::query(query_str)
            .bind(fields.name().as_str())
            .bind(fields.description().as_deref())
            .bind(fields.image().as_deref())
            .bind(fields.recipe().as_deref())
            .bind(bind_id(fields.user_id()))
            .bind(id.as_str())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }
}
