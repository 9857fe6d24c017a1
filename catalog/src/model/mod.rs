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

//! High-level data types.

use cocktails_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::{Constructor, Display};
use serde::de::{DeserializeOwned, Visitor};
use serde::{Deserialize, Serialize};

mod cocktail;
pub(crate) use cocktail::{Cocktail, CocktailCreate, CocktailFields, RecipeItem};
mod ingredient;
pub(crate) use ingredient::{Ingredient, IngredientFields};
mod links;
pub(crate) use links::{
    CocktailIngredient, CocktailIngredientFields, Favorite, FavoriteFields, Rating, RatingFields,
    UserIngredient, UserIngredientFields,
};
mod passwords;
pub(crate) use passwords::{HashedPassword, Password};
mod user;
pub(crate) use user::{NewUser, User, UserFields};

/// Maximum length of names, in characters.
pub(crate) const MAX_NAME_LENGTH: usize = 256;

/// Opaque identifier of any stored entity.
///
/// Identifiers are generated when entities are created and are never reassigned.  Identifiers
/// received from clients are not checked for any format: unknown values simply do not match any
/// entity.
#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct Id(String);

impl Id {
    /// Generates a new unique identifier.
    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Creates an identifier from an untrusted string `s`.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Id cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the identifier.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Visitor to deserialize an `Id` from a string.
struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = Id;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str(r#"an entity identifier"#)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Id::new(v).map_err(|e| E::custom(format!("{}", e)))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Id::new(v).map_err(|e| E::custom(format!("{}", e)))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(IdVisitor)
    }
}

/// Human-readable name of a user, cocktail or ingredient.  Surrounding whitespace is dropped.
#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Name(String);

impl Name {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        let s = s.trim();
        if s.is_empty() {
            return Err(ModelError("Name cannot be empty".to_owned()));
        }
        if s.chars().count() > MAX_NAME_LENGTH {
            return Err(ModelError("Name is too long".to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Visitor to deserialize a `Name` from a string.
struct NameVisitor;

impl Visitor<'_> for NameVisitor {
    type Value = Name;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str(r#"a non-empty name"#)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Name::new(v).map_err(|e| E::custom(format!("{}", e)))
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(NameVisitor)
    }
}

/// Pagination parameters for list operations.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct Page {
    /// Number of leading entities to skip.
    #[serde(default)]
    pub(crate) skip: u32,

    /// Maximum number of entities to return, or all of them if not set.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) limit: Option<u32>,
}

/// Behavior shared by the mutable attributes of every entity type.
pub(crate) trait Entity: Serialize + Send + Sync + Sized + 'static {
    /// Human-readable name of the entity type, for messages.
    const KIND: &'static str;

    /// Representation of the entity's attributes as received from clients on writes.
    type Payload: DeserializeOwned + Send + 'static;

    /// Converts a client-provided `payload` into storable attributes.
    fn prepare(payload: Self::Payload) -> ModelResult<Self>;
}

/// A stored entity: its identifier paired with its attributes.
///
/// Records serialize as a flat object with the `id` next to the attributes.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Record<T> {
    /// Identifier of the entity.
    id: Id,

    /// Mutable attributes of the entity.
    #[serde(flatten)]
    fields: T,
}
