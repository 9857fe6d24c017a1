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

//! Storage of users.

use crate::db::{Table, expect_one_row};
use crate::model::{HashedPassword, Id, Name, UserFields};
use async_trait::async_trait;
use cocktails_core::db::{DbResult, Executor, map_sqlx_error};
use cocktails_core::model::EmailAddress;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

#[async_trait]
impl Table for UserFields {
    const TABLE: &'static str = "users";

    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let email: String = row.try_get("email").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let password: String = row.try_get("password").map_err(map_sqlx_error)?;

        Ok(UserFields::new(
            EmailAddress::new(email)?,
            Name::new(name)?,
            HashedPassword::new(password),
        ))
    }

    async fn insert(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "INSERT INTO users (id, email, name, password) VALUES (?, ?, ?, ?)";
        let done = sqlx::query(query_str)
            .bind(id.as_str())
            .bind(fields.email().as_str())
            .bind(fields.name().as_str())
            .bind(fields.password().as_str())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }

    async fn update(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()> {
        let query_str = "UPDATE users SET email = ?, name = ?, password = ? WHERE id = ?";
        let done = sqlx::query(query_str)
            .bind(fields.email().as_str())
            .bind(fields.name().as_str())
            .bind(fields.password().as_str())
            .bind(id.as_str())
            .execute(ex)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected())
    }
}
