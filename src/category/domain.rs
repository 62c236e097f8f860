//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId, validation::validate_name};

/// A validated category name, between 3 and 50 characters after trimming.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidField] if `name` is too short or too long.
    pub fn new(name: &str) -> Result<Self, Error> {
        validate_name("nome", name).map(Self)
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is a valid name, e.g. because
    /// it was read back from the database.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// A category for grouping transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    #[serde(rename = "codigo")]
    pub id: CategoryId,
    /// The name of the category.
    #[serde(rename = "nome")]
    pub name: CategoryName,
}

/// Request body for creating a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryForm {
    /// The unvalidated name.
    #[serde(rename = "nome")]
    pub name: String,
}
