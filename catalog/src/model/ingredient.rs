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

//! The `Ingredient` entity.

use crate::model::{Entity, Name, Record};
use cocktails_core::model::ModelResult;
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Mutable attributes of an ingredient.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct IngredientFields {
    /// Name of the ingredient.
    name: Name,

    /// Label of the unit in which quantities of this ingredient are measured.
    unit: Option<String>,
}

impl Entity for IngredientFields {
    const KIND: &'static str = "Ingredient";

    type Payload = Self;

    fn prepare(payload: Self) -> ModelResult<Self> {
        Ok(payload)
    }
}

/// A stored ingredient.
pub(crate) type Ingredient = Record<IngredientFields>;
