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

//! The `Password` and `HashedPassword` data types.

use cocktails_core::model::{ModelError, ModelResult};
use serde::Deserialize;
use std::fmt;

/// Maximum length of a password, in bytes, as imposed by bcrypt.
const MAX_PASSWORD_LENGTH: usize = 56;

/// Cost factor for bcrypt hashes.
const HASH_COST: u32 = 10;

/// An opaque type to hold a password, protecting it from leaking into logs.
///
/// Passwords are only ever received from clients: there is no way to serialize them back.
#[derive(Deserialize, PartialEq)]
#[serde(try_from = "String")]
#[cfg_attr(test, derive(Clone))]
pub(crate) struct Password(String);

impl Password {
    /// Creates a new password from a literal string.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Password cannot be empty".to_owned()));
        }
        if s.len() > MAX_PASSWORD_LENGTH {
            return Err(ModelError("Password is too long".to_owned()));
        }
        Ok(Password(s))
    }

    /// Hashes the password.  Consumes the password because there is no context in which keeping
    /// the password alive once we have generated its hash is correct.
    pub(crate) fn hash(self) -> ModelResult<HashedPassword> {
        let hashed = bcrypt::hash(self.0, HASH_COST)
            .map_err(|e| ModelError(format!("Password error: {}", e)))?;
        Ok(HashedPassword::new(hashed))
    }

    /// Verifies if this password matches a given `hash`.
    #[cfg(test)]
    pub(crate) fn verify(self, hash: &HashedPassword) -> ModelResult<bool> {
        bcrypt::verify(self.0, hash.as_str())
            .map_err(|e| ModelError(format!("Password error: {}", e)))
    }
}

impl TryFrom<String> for Password {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Password::new(s)
    }
}

#[cfg(test)]
impl From<&'static str> for Password {
    /// Creates a new password from a hardcoded string, which must be valid.
    fn from(s: &'static str) -> Self {
        Password::new(s).expect("Hardcoded passwords must be valid")
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed password")
    }
}

/// An opaque type to hold a hashed password, protecting it from leaking into logs.
#[derive(Clone, PartialEq)]
pub(crate) struct HashedPassword(String);

impl HashedPassword {
    /// Creates a new hashed password from a literal string.
    pub(crate) fn new<S: Into<String>>(s: S) -> Self {
        HashedPassword(s.into())
    }

    /// Returns a string view of the hash.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed hash")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_ok() {
        assert_eq!(Password::from("foo"), Password::new("foo").unwrap());
        assert!(Password::new("x".repeat(MAX_PASSWORD_LENGTH)).is_ok());
    }

    #[test]
    fn test_password_error() {
        assert_eq!(
            ModelError("Password cannot be empty".to_owned()),
            Password::new("").unwrap_err()
        );
        assert_eq!(
            ModelError("Password is too long".to_owned()),
            Password::new(
                "this password is way too long to be valid because of bcrypt restrictions"
            )
            .unwrap_err()
        );
    }

    #[test]
    fn test_password_de() {
        assert_eq!(Password::from("secret"), serde_json::from_str(r#""secret""#).unwrap());
        let err = serde_json::from_str::<Password>(r#""""#).unwrap_err();
        assert!(err.to_string().contains("Password cannot be empty"));
    }

    #[test]
    fn test_password_hash_and_verify() {
        let password1 = Password::from("first password");
        let password2 = Password::from("second password");
        let hash1 = password1.clone().hash().unwrap();
        let hash2 = password2.clone().hash().unwrap();

        assert!(hash1.as_str().starts_with("$2b$10$"));
        assert!(hash2.as_str().starts_with("$2b$10$"));
        assert!(hash1 != hash2);

        assert!(password1.clone().verify(&hash1).unwrap());
        assert!(!password2.clone().verify(&hash1).unwrap());
        assert!(!password1.verify(&hash2).unwrap());
        assert!(password2.verify(&hash2).unwrap());
    }

    #[test]
    fn test_debug_is_scrubbed() {
        let password = Password::from("the secret");
        let hash = password.clone().hash().unwrap();
        assert_eq!("scrubbed password", format!("{:?}", password));
        assert_eq!("scrubbed hash", format!("{:?}", hash));
    }
}
