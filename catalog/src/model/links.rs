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

//! Entities that relate other entities to each other.
//!
//! None of these enforce uniqueness: the same pair of entities can be related more than once.

use crate::model::{Entity, Id, Record};
use cocktails_core::model::ModelResult;
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Generates the `Entity` implementation for a type whose payload is itself.
macro_rules! entity_with_self_payload [
    ( $t:ty, $kind:expr ) => {
        impl Entity for $t {
            const KIND: &'static str = $kind;

            type Payload = Self;

            fn prepare(payload: Self) -> ModelResult<Self> {
                Ok(payload)
            }
        }
    }
];

/// An ingredient line of a cocktail.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct CocktailIngredientFields {
    /// Identifier of the cocktail this line belongs to.
    cocktail_id: Id,

    /// Identifier of the ingredient.
    ingredient_id: Id,

    /// Amount of the ingredient, in the ingredient's unit.  Not range checked.
    quantity: f64,
}

entity_with_self_payload!(CocktailIngredientFields, "CocktailIngredient");

/// A stored cocktail ingredient line.
pub(crate) type CocktailIngredient = Record<CocktailIngredientFields>;

/// A cocktail marked as favorite by a user.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct FavoriteFields {
    /// Identifier of the user.
    user_id: Id,

    /// Identifier of the cocktail.
    cocktail_id: Id,
}

entity_with_self_payload!(FavoriteFields, "Favorite");

/// A stored favorite.
pub(crate) type Favorite = Record<FavoriteFields>;

/// An ingredient present in a user's pantry.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct UserIngredientFields {
    /// Identifier of the user.
    user_id: Id,

    /// Identifier of the ingredient.
    ingredient_id: Id,
}

entity_with_self_payload!(UserIngredientFields, "UserIngredient");

/// A stored pantry entry.
pub(crate) type UserIngredient = Record<UserIngredientFields>;

/// A score given by a user to a cocktail.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct RatingFields {
    /// Identifier of the user.
    user_id: Id,

    /// Identifier of the cocktail.
    cocktail_id: Id,

    /// The score.  Not range checked.
    rating: f64,
}

entity_with_self_payload!(RatingFields, "Rating");

/// A stored rating.
pub(crate) type Rating = Record<RatingFields>;
