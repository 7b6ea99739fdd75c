use super::{
    DumpSchema, LoadSchema, ValidationErrors, EMPTY_NOT_ALLOWED, INVALID_INPUT_TYPE,
    NOT_AN_INTEGER, NOT_A_STRING, NULL_NOT_ALLOWED, REQUIRED, SCHEMA_FIELD,
};
use crate::domain::model::Product;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use utoipa::ToSchema;

pub const NEGATIVE_INVENTORY: &str = "Invalid negative inventory.";

/// Wire shape of a product. These three fields are the only ones ever exposed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ProductResponse {
    pub id: Option<i64>,
    pub name: String,
    pub inventory: i64,
}

/// Documented body of `POST /product`. Parsing goes through [`ProductCreateSchema`].
#[derive(Deserialize, Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProductCreateRequest {
    pub name: String,
    /// Must be zero or greater.
    pub inventory: i64,
}

/// Serializes products.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductSchema;

impl DumpSchema<Product> for ProductSchema {
    type Output = ProductResponse;

    fn dump(&self, entity: &Product) -> ProductResponse {
        ProductResponse {
            id: entity.id,
            name: entity.name.clone(),
            inventory: entity.inventory,
        }
    }
}

/// Validates create input and builds an unpersisted [`Product`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCreateSchema;

impl LoadSchema<Product> for ProductCreateSchema {
    fn load(&self, input: &JsonValue) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(fields) = input.as_object() else {
            errors.add(SCHEMA_FIELD, INVALID_INPUT_TYPE);
            return Err(errors);
        };

        let name = required(fields, "name", &mut errors).and_then(|v| {
            let Some(s) = v.as_str() else {
                errors.add("name", NOT_A_STRING);
                return None;
            };
            if s.trim().is_empty() {
                errors.add("name", EMPTY_NOT_ALLOWED);
                return None;
            }
            Some(s.to_string())
        });

        let inventory = required(fields, "inventory", &mut errors)
            .and_then(|v| match coerce_integer(v) {
                Ok(n) => Some(n),
                Err(msg) => {
                    errors.add("inventory", msg);
                    None
                }
            })
            .and_then(|n| {
                if n < 0 {
                    errors.add("inventory", NEGATIVE_INVENTORY);
                    return None;
                }
                Some(n)
            });

        match (name, inventory) {
            (Some(name), Some(inventory)) if errors.is_empty() => Ok(Product::new(name, inventory)),
            _ => Err(errors),
        }
    }
}

fn required<'a>(
    fields: &'a Map<String, JsonValue>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a JsonValue> {
    match fields.get(name) {
        None => {
            errors.add(name, REQUIRED);
            None
        }
        Some(JsonValue::Null) => {
            errors.add(name, NULL_NOT_ALLOWED);
            None
        }
        Some(v) => Some(v),
    }
}

/// Accepts JSON integers, integral floats and decimal strings (e.g. `"1440"` -> 1440).
fn coerce_integer(v: &JsonValue) -> Result<i64, &'static str> {
    if let Some(n) = v.as_i64() {
        return Ok(n);
    }
    if let Some(f) = v.as_f64() {
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            return Ok(f as i64);
        }
        return Err(NOT_AN_INTEGER);
    }
    if let Some(s) = v.as_str() {
        return s.trim().parse::<i64>().map_err(|_| NOT_AN_INTEGER);
    }
    Err(NOT_AN_INTEGER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Entity;
    use serde_json::json;

    #[test]
    fn loads_valid_input_without_id() {
        let product = ProductCreateSchema
            .load(&json!({"name": "Lamp", "inventory": 3}))
            .unwrap();
        assert_eq!(product, Product::new("Lamp", 3));
        assert_eq!(product.id, None);
    }

    #[test]
    fn ignores_unknown_fields_and_client_ids() {
        let product = ProductCreateSchema
            .load(&json!({"id": 99, "name": "Lamp", "inventory": 0, "color": "red"}))
            .unwrap();
        assert_eq!(product.id, None);
        assert_eq!(product.inventory, 0);
    }

    #[test]
    fn reports_all_missing_fields_together() {
        let errors = ProductCreateSchema.load(&json!({})).unwrap_err();
        assert_eq!(errors.field("name"), Some(&["required".to_string()][..]));
        assert_eq!(errors.field("inventory"), Some(&["required".to_string()][..]));
    }

    #[test]
    fn rejects_negative_inventory() {
        let errors = ProductCreateSchema
            .load(&json!({"name": "Lamp", "inventory": -1}))
            .unwrap_err();
        assert_eq!(
            errors.field("inventory"),
            Some(&[NEGATIVE_INVENTORY.to_string()][..])
        );
        assert!(errors.field("name").is_none());
    }

    #[test]
    fn coerces_inventory_strings_and_integral_floats() {
        let product = ProductCreateSchema
            .load(&json!({"name": "Lamp", "inventory": "12"}))
            .unwrap();
        assert_eq!(product.inventory, 12);

        let product = ProductCreateSchema
            .load(&json!({"name": "Lamp", "inventory": 4.0}))
            .unwrap();
        assert_eq!(product.inventory, 4);
    }

    #[test]
    fn non_integer_inventory_skips_the_negative_check() {
        for bad in [json!("many"), json!(1.5), json!(true), json!([1])] {
            let errors = ProductCreateSchema
                .load(&json!({"name": "Lamp", "inventory": bad}))
                .unwrap_err();
            assert_eq!(
                errors.field("inventory"),
                Some(&[NOT_AN_INTEGER.to_string()][..])
            );
        }
    }

    #[test]
    fn negative_string_inventory_is_coerced_then_rejected() {
        let errors = ProductCreateSchema
            .load(&json!({"name": "Lamp", "inventory": "-4"}))
            .unwrap_err();
        assert_eq!(
            errors.field("inventory"),
            Some(&[NEGATIVE_INVENTORY.to_string()][..])
        );
    }

    #[test]
    fn collects_errors_across_fields() {
        let errors = ProductCreateSchema
            .load(&json!({"name": "  ", "inventory": -2}))
            .unwrap_err();
        assert_eq!(errors.field("name"), Some(&[EMPTY_NOT_ALLOWED.to_string()][..]));
        assert_eq!(
            errors.field("inventory"),
            Some(&[NEGATIVE_INVENTORY.to_string()][..])
        );
    }

    #[test]
    fn null_and_wrong_types() {
        let errors = ProductCreateSchema
            .load(&json!({"name": 5, "inventory": null}))
            .unwrap_err();
        assert_eq!(errors.field("name"), Some(&[NOT_A_STRING.to_string()][..]));
        assert_eq!(
            errors.field("inventory"),
            Some(&[NULL_NOT_ALLOWED.to_string()][..])
        );
    }

    #[test]
    fn non_object_input() {
        let errors = ProductCreateSchema.load(&json!([1, 2])).unwrap_err();
        assert_eq!(
            errors.field(SCHEMA_FIELD),
            Some(&[INVALID_INPUT_TYPE.to_string()][..])
        );
    }

    #[test]
    fn dump_many_keeps_order_and_whitelist() {
        let products = vec![
            Product::new("A", 1).with_id(1),
            Product::new("B", 2).with_id(2),
        ];
        let dumped = serde_json::to_value(ProductSchema.dump_many(&products)).unwrap();
        assert_eq!(
            dumped,
            json!([
                {"id": 1, "name": "A", "inventory": 1},
                {"id": 2, "name": "B", "inventory": 2}
            ])
        );
    }
}
