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

//! The `Cocktail` entity and its recipe.

use crate::model::{Entity, Id, Name, Record};
use cocktails_core::model::ModelResult;
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Mutable attributes of a cocktail.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct CocktailFields {
    /// Name of the cocktail.
    name: Name,

    /// Free-form description of the cocktail.
    description: Option<String>,

    /// Reference to a picture of the cocktail, typically a URL.
    image: Option<String>,

    /// Free-form preparation instructions.
    recipe: Option<String>,

    /// Identifier of the user that created the cocktail, if any.
    user_id: Option<Id>,
}

impl Entity for CocktailFields {
    const KIND: &'static str = "Cocktail";

    type Payload = Self;

    fn prepare(payload: Self) -> ModelResult<Self> {
        Ok(payload)
    }
}

/// A stored cocktail.
pub(crate) type Cocktail = Record<CocktailFields>;

/// One ingredient line of a cocktail as provided while writing the cocktail.
#[derive(Constructor, Deserialize)]
#[cfg_attr(test, derive(Clone, Debug, Serialize))]
pub(crate) struct RecipeItem {
    /// Identifier of the ingredient.
    pub(crate) ingredient_id: Id,

    /// Amount of the ingredient, in the ingredient's unit.
    pub(crate) quantity: f64,
}

/// Payload to create or replace a cocktail along with its ingredient lines.
///
/// When `ingredients` is absent, the ingredient lines of the cocktail are left untouched.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug, Serialize))]
pub(crate) struct CocktailCreate {
    /// Attributes of the cocktail itself.
    #[serde(flatten)]
    pub(crate) fields: CocktailFields,

    /// Ingredient lines of the cocktail.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) ingredients: Option<Vec<RecipeItem>>,
}
