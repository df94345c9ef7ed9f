//! Wish record and its validated creation input

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ValidationError;

/// Primary identity of a wish, assigned by the store
pub type WishId = i64;

/// A persisted wish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wish {
    pub id: WishId,
    pub name: String,
    pub wish: String,
    pub created_at: DateTime<Utc>,
}

/// Validated wisher name (non-empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishName(String);

impl WishName {
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated wish content (non-empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishText(String);

impl WishText {
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "wish" });
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Input accepted by [`crate::store::WishStore::create`].
///
/// # Example
/// ```
/// use wishctl_server::models::NewWish;
///
/// assert!(NewWish::new("Alice", "world peace").is_ok());
/// assert!(NewWish::new("", "world peace").is_err());
/// assert!(NewWish::new("Alice", "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWish {
    pub name: WishName,
    pub wish: WishText,
}

impl NewWish {
    pub fn new(name: impl Into<String>, wish: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: WishName::new(name)?,
            wish: WishText::new(wish)?,
        })
    }
}
