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

//! The `EmailAddress` data type.

use crate::model::{ModelError, ModelResult};
use serde::de::Visitor;
use serde::{Deserialize, Serialize};

/// Maximum length of email addresses, in bytes.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Represents a correctly-formatted email address.
///
/// Email addresses are compared and stored exactly as given by the user, so two addresses that
/// only differ in case are distinct.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a new email address from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.trim().is_empty() {
            return Err(ModelError("Email address cannot be empty".to_owned()));
        }
        if s.len() > MAX_EMAIL_LENGTH {
            return Err(ModelError("Email address is too long".to_owned()));
        }

        // Fully validating email addresses is futile, so only reject values that clearly are not
        // addresses at all.
        if !s.contains('@') || s.contains(' ') {
            return Err(ModelError(format!("Email does not look like a valid address '{}'", s)));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the email address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Visitor to deserialize an `EmailAddress` from a string.
struct EmailAddressVisitor;

impl Visitor<'_> for EmailAddressVisitor {
    type Value = EmailAddress;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str(r#"an email address"#)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        EmailAddress::new(v).map_err(|e| E::custom(format!("{}", e)))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        EmailAddress::new(v).map_err(|e| E::custom(format!("{}", e)))
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(EmailAddressVisitor)
    }
}
