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

//! The `User` entity.

use crate::model::{Entity, HashedPassword, Name, Password, Record};
use cocktails_core::model::{EmailAddress, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Mutable attributes of a user as stored.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct UserFields {
    /// Email address of the user.  Unique across users.
    email: EmailAddress,

    /// Display name of the user.
    name: Name,

    /// Hashed password of the user.  Never leaves the service.
    #[serde(skip_serializing)]
    password: HashedPassword,
}

/// Payload to create or replace a user.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct NewUser {
    /// Email address of the user.
    pub(crate) email: EmailAddress,

    /// Display name of the user.
    pub(crate) name: Name,

    /// Password of the user in plain text.
    pub(crate) password: Password,
}

impl Entity for UserFields {
    const KIND: &'static str = "User";

    type Payload = NewUser;

    fn prepare(payload: NewUser) -> ModelResult<Self> {
        Ok(UserFields::new(payload.email, payload.name, payload.password.hash()?))
    }
}

/// A stored user.
pub(crate) type User = Record<UserFields>;
