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

//! Test utilities for the business layer.

use crate::db::{self, Table};
use crate::driver::Driver;
use crate::model::*;
use cocktails_core::db::testutils::{UnavailableDb, setup};
use cocktails_core::db::{Db, PoolExecutor};
use cocktails_core::model::EmailAddress;
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver, for direct access.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database with the schema in place.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Initializes the driver using a database that can never be reached.
    pub(crate) fn setup_unavailable() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(UnavailableDb);
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> PoolExecutor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Stores an entity with `fields` directly in the database and returns its identifier.
    pub(crate) async fn insert<T: Table>(&self, fields: T) -> Id {
        let id = Id::generate();
        let mut ex = self.ex().await;
        T::insert(&mut ex, &id, &fields).await.unwrap();
        id
    }

    /// Syntactic sugar to create a user with `email`.
    pub(crate) async fn create_user(&self, email: &str) -> Id {
        self.insert(UserFields::new(
            EmailAddress::new(email).unwrap(),
            Name::new("Test user").unwrap(),
            HashedPassword::new("not a real hash"),
        ))
        .await
    }

    /// Syntactic sugar to create a cocktail named `name` without a creator.
    pub(crate) async fn create_cocktail(&self, name: &str) -> Id {
        self.insert(CocktailFields::new(Name::new(name).unwrap(), None, None, None, None)).await
    }

    /// Syntactic sugar to create an ingredient named `name` without a unit.
    pub(crate) async fn create_ingredient(&self, name: &str) -> Id {
        self.insert(IngredientFields::new(Name::new(name).unwrap(), None)).await
    }
}
