//! Core person domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId, validation::validate_name};

/// Database identifier for a person.
pub type PersonId = DatabaseId;

/// A validated person name, between 3 and 50 characters after trimming.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Create a person name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidField] if `name` is too short or too long.
    pub fn new(name: &str) -> Result<Self, Error> {
        validate_name("nome", name).map(Self)
    }

    /// Create a person name without validation.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PersonName::new(&value)
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A postal address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(default)]
pub struct Address {
    /// The street name.
    #[serde(rename = "logradouro")]
    pub street: Option<String>,
    /// The house or building number.
    #[serde(rename = "numero")]
    pub number: Option<String>,
    /// Extra details such as an apartment number.
    #[serde(rename = "complemento")]
    pub complement: Option<String>,
    /// The neighbourhood.
    #[serde(rename = "bairro")]
    pub district: Option<String>,
    /// The postal code (CEP).
    #[serde(rename = "cep")]
    pub postal_code: Option<String>,
    /// The city.
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    /// The state, usually a two letter abbreviation.
    #[serde(rename = "estado")]
    pub state: Option<String>,
}

/// Someone who pays or receives money.
///
/// Only active people can have new transactions recorded against them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Person {
    /// The ID of the person.
    #[serde(rename = "codigo")]
    pub id: PersonId,
    /// The person's name.
    #[serde(rename = "nome")]
    pub name: PersonName,
    /// Whether new transactions may be recorded against this person.
    #[serde(rename = "ativo")]
    pub active: bool,
    /// Where the person lives.
    #[serde(rename = "endereco")]
    pub address: Address,
}

/// The data for creating a person, or replacing an existing person's data.
///
/// This is also the request body for the create and update endpoints, so the
/// name is unvalidated until [NewPerson::validate] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPerson {
    /// The unvalidated name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Whether the person is active.
    #[serde(rename = "ativo")]
    pub active: bool,
    /// The address, empty when omitted.
    #[serde(rename = "endereco", default)]
    pub address: Address,
}

impl NewPerson {
    /// Create a person without an address.
    pub fn build(name: &str, active: bool) -> Self {
        Self {
            name: name.to_owned(),
            active,
            address: Address::default(),
        }
    }

    /// Set the address.
    pub fn address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Check the name, returning it with the rest of the data.
    ///
    /// # Errors
    /// Returns [Error::InvalidField] if the name is invalid.
    pub(crate) fn validate(self) -> Result<(PersonName, bool, Address), Error> {
        let name = PersonName::new(&self.name)?;

        Ok((name, self.active, self.address))
    }
}
