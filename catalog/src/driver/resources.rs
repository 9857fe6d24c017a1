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

//! Operations that apply to every entity type.

use crate::db::{self, Reference, Table};
use crate::driver::Driver;
use crate::model::{Id, Page, Record};
use cocktails_core::db::{DbError, Executor};
use cocktails_core::driver::{DriverError, DriverResult};
use log::debug;

/// Builds the error returned when the entity of type `T` identified by `id` does not exist.
pub(super) fn not_found<T: Table>(id: &Id) -> DriverError {
    DriverError::NotFound(format!("{} {} not found", T::KIND, id))
}

/// Converts `e` into a driver error, reporting a missing entity of type `T` identified by `id`.
fn map_not_found<T: Table>(e: DbError, id: &Id) -> DriverError {
    match e {
        DbError::NotFound => not_found::<T>(id),
        e => e.into(),
    }
}

/// Ensures that all entities in `references` exist.
async fn check_references(ex: &mut Executor, references: &[Reference<'_>]) -> DriverResult<()> {
    for reference in references {
        if !db::exists(ex, reference.table, reference.id).await? {
            return Err(DriverError::InvalidInput(format!(
                "{} {} does not exist",
                reference.kind, reference.id
            )));
        }
    }
    Ok(())
}

/// Stores a new entity with `fields` after validating its references.
pub(super) async fn insert_checked<T: Table>(
    ex: &mut Executor,
    fields: T,
) -> DriverResult<Record<T>> {
    check_references(ex, &fields.references()).await?;
    let id = Id::generate();
    T::insert(ex, &id, &fields).await?;
    debug!("Created {} {}", T::KIND, id);
    Ok(Record::new(id, fields))
}

/// Replaces the entity `id` with `fields` after validating that it exists and its references.
pub(super) async fn update_checked<T: Table>(
    ex: &mut Executor,
    id: Id,
    fields: T,
) -> DriverResult<Record<T>> {
    if !db::exists(ex, T::TABLE, &id).await? {
        return Err(not_found::<T>(&id));
    }
    check_references(ex, &fields.references()).await?;
    T::update(ex, &id, &fields).await.map_err(|e| map_not_found::<T>(e, &id))?;
    debug!("Updated {} {}", T::KIND, id);
    Ok(Record::new(id, fields))
}

impl Driver {
    /// Gets all entities of type `T` within `page`.
    pub(crate) async fn list<T: Table>(self, page: Page) -> DriverResult<Vec<Record<T>>> {
        let mut ex = self.db.ex().await?;
        let records = db::list::<T>(&mut ex, &page).await?;
        Ok(records)
    }

    /// Gets the entity of type `T` identified by `id`.
    pub(crate) async fn get<T: Table>(self, id: Id) -> DriverResult<Record<T>> {
        let mut ex = self.db.ex().await?;
        db::get::<T>(&mut ex, &id).await.map_err(|e| map_not_found::<T>(e, &id))
    }

    /// Creates a new entity of type `T` from a client-provided `payload`.
    pub(crate) async fn create<T: Table>(self, payload: T::Payload) -> DriverResult<Record<T>> {
        let fields = T::prepare(payload)?;

        let mut tx = self.db.begin().await?;
        let record = insert_checked(tx.ex(), fields).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Replaces all attributes of the entity of type `T` identified by `id` with the ones in a
    /// client-provided `payload`.
    pub(crate) async fn update<T: Table>(
        self,
        id: Id,
        payload: T::Payload,
    ) -> DriverResult<Record<T>> {
        let fields = T::prepare(payload)?;

        let mut tx = self.db.begin().await?;
        let record = update_checked(tx.ex(), id, fields).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Deletes the entity of type `T` identified by `id`.  Entities that refer to the deleted one
    /// are left untouched.
    pub(crate) async fn delete<T: Table>(self, id: Id) -> DriverResult<()> {
        let mut ex = self.db.ex().await?;
        db::delete::<T>(&mut ex, &id)
            .await
            .map_err(|e| map_not_found::<T>(e, &id))?;
        debug!("Deleted {} {}", T::KIND, id);
        Ok(())
    }
}
