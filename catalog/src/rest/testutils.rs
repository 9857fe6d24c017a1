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

//! Test utilities for the REST API.

use crate::db::{self, Table};
use crate::driver::testutils::TestContext as DriverTestContext;
use crate::model::{Id, Page, Record};
use crate::rest::app;
use axum::Router;
use cocktails_core::db::DbError;

/// State of a running test.
pub(crate) struct TestContext {
    /// The driver-level test context, which owns the database.
    context: DriverTestContext,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the REST API on top of an in-memory database with the schema in place.
    pub(crate) async fn setup() -> Self {
        let context = DriverTestContext::setup().await;
        let app = app(context.driver());
        Self { context, app }
    }

    /// Initializes the REST API on top of a database that can never be reached.
    pub(crate) fn setup_unavailable() -> Self {
        let context = DriverTestContext::setup_unavailable();
        let app = app(context.driver());
        Self { context, app }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Stores an entity with `fields` directly in the database and returns its identifier.
    pub(crate) async fn insert<T: Table>(&self, fields: T) -> Id {
        self.context.insert(fields).await
    }

    /// Fetches the entity `id` of type `T` directly from the database, if it exists.
    pub(crate) async fn get<T: Table>(&self, id: &Id) -> Option<Record<T>> {
        let mut ex = self.context.ex().await;
        match db::get::<T>(&mut ex, id).await {
            Ok(record) => Some(record),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Failed to get {} {}: {}", T::KIND, id, e),
        }
    }

    /// Returns the identifiers of all entities of type `T` in insertion order.
    pub(crate) async fn ids<T: Table>(&self) -> Vec<Id> {
        let mut ex = self.context.ex().await;
        let records = db::list::<T>(&mut ex, &Page::default()).await.unwrap();
        records.into_iter().map(|r| r.id().clone()).collect()
    }

    /// Syntactic sugar to create a user with `email`.
    pub(crate) async fn create_user(&self, email: &str) -> Id {
        self.context.create_user(email).await
    }

    /// Syntactic sugar to create a cocktail named `name` without a creator.
    pub(crate) async fn create_cocktail(&self, name: &str) -> Id {
        self.context.create_cocktail(name).await
    }

    /// Syntactic sugar to create an ingredient named `name` without a unit.
    pub(crate) async fn create_ingredient(&self, name: &str) -> Id {
        self.context.create_ingredient(name).await
    }
}
