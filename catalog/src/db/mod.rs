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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Every entity type is backed by its own table, described by an implementation of the `Table`
//! trait.  The generic operations in this module work on any of them.

use crate::model::{Entity, Id, Page, Record};
use async_trait::async_trait;
use cocktails_core::db::{DbError, DbResult, Executor, map_sqlx_error, run_schema};
use futures::TryStreamExt;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

mod cocktail_ingredients;
pub(crate) use cocktail_ingredients::{delete_cocktail_ingredients, list_cocktail_ingredients};
mod cocktails;
mod favorites;
mod ingredients;
mod ratings;
#[cfg(test)]
mod tests;
mod user_ingredients;
mod users;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    run_schema(ex, include_str!("sqlite.sql")).await
}

/// A reference held by an entity to another entity.
pub(crate) struct Reference<'a> {
    /// Table that holds the referenced entity.
    pub(crate) table: &'static str,

    /// Kind of the referenced entity, for messages.
    pub(crate) kind: &'static str,

    /// Identifier of the referenced entity.
    pub(crate) id: &'a Id,
}

impl<'a> Reference<'a> {
    /// Creates a reference to the entity of type `T` identified by `id`.
    pub(crate) fn to<T: Table>(id: &'a Id) -> Self {
        Self { table: T::TABLE, kind: T::KIND, id }
    }
}

/// Storage details of an entity type.
#[async_trait]
pub(crate) trait Table: Entity {
    /// Name of the table that holds the entities.
    const TABLE: &'static str;

    /// Decodes the attributes of an entity from a `row`, validating them.
    fn from_row(row: &SqliteRow) -> DbResult<Self>;

    /// Returns the references that these attributes hold to other entities.
    fn references(&self) -> Vec<Reference<'_>> {
        vec![]
    }

    /// Stores a new entity identified by `id` with the given `fields`.
    async fn insert(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()>;

    /// Replaces all attributes of the existing entity `id` with `fields`.
    async fn update(ex: &mut Executor, id: &Id, fields: &Self) -> DbResult<()>;
}

/// Checks that a write touched exactly one row, treating zero rows as a missing entity.
pub(crate) fn expect_one_row(rows_affected: u64) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Write affected more than one row".to_owned())),
    }
}

/// Converts an optional identifier into a value to bind to a query.
pub(crate) fn bind_id(id: &Option<Id>) -> Option<&str> {
    id.as_ref().map(Id::as_str)
}

/// Decodes a full record of type `T` from a `row`.
fn decode<T: Table>(row: &SqliteRow) -> DbResult<Record<T>> {
    let id: String = row.try_get("id").map_err(map_sqlx_error)?;
    Ok(Record::new(Id::new(id)?, T::from_row(row)?))
}

/// Gets the entities of type `T` in insertion order, restricted to `page`.
pub(crate) async fn list<T: Table>(ex: &mut Executor, page: &Page) -> DbResult<Vec<Record<T>>> {
    let query_str = format!("SELECT * FROM {} ORDER BY rowid LIMIT ? OFFSET ?", T::TABLE);
    let mut rows = sqlx::query(&query_str)
        .bind(page.limit.map(i64::from).unwrap_or(-1))
        .bind(i64::from(page.skip))
        .fetch(ex);

    let mut records = vec![];
    while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
        records.push(decode::<T>(&row)?);
    }
    Ok(records)
}

/// Gets the entity of type `T` identified by `id`.
pub(crate) async fn get<T: Table>(ex: &mut Executor, id: &Id) -> DbResult<Record<T>> {
    let query_str = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
    let maybe_row = sqlx::query(&query_str)
        .bind(id.as_str())
        .fetch_optional(ex)
        .await
        .map_err(map_sqlx_error)?;
    match maybe_row {
        None => Err(DbError::NotFound),
        Some(row) => decode::<T>(&row),
    }
}

/// Checks whether `table` holds an entity identified by `id`.
pub(crate) async fn exists(ex: &mut Executor, table: &str, id: &Id) -> DbResult<bool> {
    let query_str = format!("SELECT 1 FROM {} WHERE id = ?", table);
    let maybe_row = sqlx::query(&query_str)
        .bind(id.as_str())
        .fetch_optional(ex)
        .await
        .map_err(map_sqlx_error)?;
    Ok(maybe_row.is_some())
}

/// Deletes the entity of type `T` identified by `id`.  Entities that refer to it are left as is.
pub(crate) async fn delete<T: Table>(ex: &mut Executor, id: &Id) -> DbResult<()> {
    let query_str = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
    let done =
        sqlx::query(&query_str).bind(id.as_str()).execute(ex).await.map_err(map_sqlx_error)?;
    expect_one_row(done.rows_affected())
}
