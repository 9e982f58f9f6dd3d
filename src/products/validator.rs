//! # Product Validator
//!
//! Turns an untrusted JSON body into a [`NewProduct`] or [`ProductChanges`].
//!
//! Validation semantics:
//! - Every field is checked and every failure is reported
//! - Unknown keys and a client-supplied `id` are ignored
//! - Numeric fields accept their string spellings (`"10"`, `"99.90"`)
//! - Validation is pure; nothing is written

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use super::decimal_text::DecimalText;
use super::model::{Category, NewProduct, ProductChanges};

/// Maximum product name length, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Largest storable quantity
pub const MAX_QUANTITY: i128 = 2_147_483_647;

/// Price column precision
const PRICE_MAX_DIGITS: u32 = 10;
const PRICE_DECIMAL_PLACES: u32 = 2;

const NON_FIELD_ERRORS: &str = "non_field_errors";

const MSG_REQUIRED: &str = "This field is required.";
const MSG_NULL: &str = "This field may not be null.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_NOT_STRING: &str = "Not a valid string.";
const MSG_INVALID_INTEGER: &str = "A valid integer is required.";
const MSG_INVALID_NUMBER: &str = "A valid number is required.";
const MSG_QUANTITY_NOT_POSITIVE: &str = "Quantity must be a positive integer.";
const MSG_PRICE_NOT_POSITIVE: &str = "Price must be a positive value.";

/// Field name to error messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of every failing field, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Validate a body for create or full replace.
///
/// `name`, `quantity`, `category` and `price` are required;
/// `description` defaults to empty.
pub fn validate_new(payload: &Value) -> Result<NewProduct, FieldErrors> {
    let mut reader = FieldReader::new(payload)?;

    let name = reader.field("name", true, parse_name);
    let description = reader.field("description", false, parse_description);
    let quantity = reader.field("quantity", true, parse_quantity);
    let category = reader.field("category", true, parse_category);
    let price = reader.field("price", true, parse_price);

    match (name, quantity, category, price) {
        (Some(name), Some(quantity), Some(category), Some(price)) if reader.errors.is_empty() => {
            Ok(NewProduct {
                name,
                description: description.unwrap_or_default(),
                quantity,
                category,
                price,
            })
        }
        _ => Err(reader.errors),
    }
}

/// Validate a body for partial update. Only submitted fields are checked.
pub fn validate_changes(payload: &Value) -> Result<ProductChanges, FieldErrors> {
    let mut reader = FieldReader::new(payload)?;

    let changes = ProductChanges {
        name: reader.field("name", false, parse_name),
        description: reader.field("description", false, parse_description),
        quantity: reader.field("quantity", false, parse_quantity),
        category: reader.field("category", false, parse_category),
        price: reader.field("price", false, parse_price),
    };

    if reader.errors.is_empty() {
        Ok(changes)
    } else {
        Err(reader.errors)
    }
}

/// Walks the fields of a body, collecting errors as it goes
struct FieldReader<'a> {
    body: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    fn new(payload: &'a Value) -> Result<Self, FieldErrors> {
        match payload.as_object() {
            Some(body) => Ok(Self {
                body,
                errors: FieldErrors::new(),
            }),
            None => {
                let mut errors = FieldErrors::new();
                errors.add(
                    NON_FIELD_ERRORS,
                    format!(
                        "Invalid data. Expected a dictionary, but got {}.",
                        json_type_name(payload)
                    ),
                );
                Err(errors)
            }
        }
    }

    fn field<T>(
        &mut self,
        name: &str,
        required: bool,
        parse: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Option<T> {
        let outcome = match self.body.get(name) {
            None if required => Err(MSG_REQUIRED.to_string()),
            None => return None,
            Some(Value::Null) => Err(MSG_NULL.to_string()),
            Some(value) => parse(value),
        };

        match outcome {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.add(name, message);
                None
            }
        }
    }
}

/// Coerce a scalar to text; structured values are rejected
fn as_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(MSG_NOT_STRING.to_string()),
    }
}

fn parse_name(value: &Value) -> Result<String, String> {
    let name = as_text(value)?;
    if name.is_empty() {
        return Err(MSG_BLANK.to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_NAME_LENGTH
        ));
    }
    Ok(name)
}

fn parse_description(value: &Value) -> Result<String, String> {
    as_text(value)
}

fn parse_category(value: &Value) -> Result<Category, String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if raw.is_empty() {
        return Err(MSG_BLANK.to_string());
    }
    Category::parse(&raw).ok_or_else(|| format!("\"{}\" is not a valid choice.", raw))
}

fn parse_quantity(value: &Value) -> Result<u32, String> {
    let quantity = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i128::from(i)
            } else if let Some(u) = n.as_u64() {
                i128::from(u)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e18 => f as i128,
                    _ => return Err(MSG_INVALID_INTEGER.to_string()),
                }
            }
        }
        Value::String(s) => parse_integer_text(s.trim())?,
        _ => return Err(MSG_INVALID_INTEGER.to_string()),
    };

    if quantity <= 0 {
        return Err(MSG_QUANTITY_NOT_POSITIVE.to_string());
    }
    if quantity > MAX_QUANTITY {
        return Err(format!(
            "Ensure this value is less than or equal to {}.",
            MAX_QUANTITY
        ));
    }
    u32::try_from(quantity).map_err(|_| MSG_INVALID_INTEGER.to_string())
}

/// Integers may carry an all-zero fraction (`"10.00"`)
fn parse_integer_text(text: &str) -> Result<i128, String> {
    let whole = match text.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
        Some(_) => return Err(MSG_INVALID_INTEGER.to_string()),
        None => text,
    };
    whole
        .parse::<i128>()
        .map_err(|_| MSG_INVALID_INTEGER.to_string())
}

fn parse_price(value: &Value) -> Result<Decimal, String> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(MSG_INVALID_NUMBER.to_string()),
    };

    let text = DecimalText::parse(&raw).ok_or_else(|| MSG_INVALID_NUMBER.to_string())?;
    check_precision(&text)?;

    if text.is_zero() || text.is_negative() {
        return Err(MSG_PRICE_NOT_POSITIVE.to_string());
    }

    let mut price = text
        .to_decimal()
        .ok_or_else(|| MSG_INVALID_NUMBER.to_string())?;
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}

/// Enforce the price column's digit limits on the submitted text
fn check_precision(text: &DecimalText) -> Result<(), String> {
    let max_whole = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;

    if text.total_digits() > u64::from(PRICE_MAX_DIGITS) {
        return Err(format!(
            "Ensure that there are no more than {} digits in total.",
            PRICE_MAX_DIGITS
        ));
    }
    if text.decimal_places() > u64::from(PRICE_DECIMAL_PLACES) {
        return Err(format!(
            "Ensure that there are no more than {} decimal places.",
            PRICE_DECIMAL_PLACES
        ));
    }
    if text.whole_digits() > u64::from(max_whole) {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            max_whole
        ));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
