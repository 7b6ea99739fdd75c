//! Wire <-> entity mapping.
//!
//! The two directions are separate traits and are implemented by separate types:
//! a dump schema only ever serializes entities, a load schema only ever validates
//! input and builds unpersisted entities.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

pub mod product;

pub use product::{ProductCreateRequest, ProductCreateSchema, ProductResponse, ProductSchema};

/// Key used for errors that concern the whole input rather than one field.
pub const SCHEMA_FIELD: &str = "_schema";

pub const REQUIRED: &str = "required";
pub const NULL_NOT_ALLOWED: &str = "Field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer.";
pub const EMPTY_NOT_ALLOWED: &str = "Field may not be empty.";
pub const INVALID_INPUT_TYPE: &str = "Invalid input type.";

/// Field name -> human readable messages. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Entity -> wire mapping with a fixed field whitelist.
pub trait DumpSchema<T> {
    type Output: Serialize;

    fn dump(&self, entity: &T) -> Self::Output;

    /// "many" mode: preserves input order.
    fn dump_many(&self, entities: &[T]) -> Vec<Self::Output> {
        entities.iter().map(|entity| self.dump(entity)).collect()
    }
}

/// Wire -> entity mapping. Reports every field error at once and never persists.
pub trait LoadSchema<T> {
    fn load(&self, input: &JsonValue) -> Result<T, ValidationErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("name", REQUIRED);
        errors.add("inventory", REQUIRED);
        errors.add("inventory", "second");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inventory": ["required", "second"],
                "name": ["required"]
            })
        );
    }

    #[test]
    fn display_lists_every_field() {
        let mut errors = ValidationErrors::single("name", REQUIRED);
        errors.add("inventory", NOT_AN_INTEGER);
        assert_eq!(
            errors.to_string(),
            "inventory: Not a valid integer.; name: required"
        );
    }
}
