//! Total validation of raw JSON objects.
//!
//! `serde` stops at the first bad field, so schemas here read fields one at a
//! time through a [`FieldReader`], which records every violation into a
//! single [`ValidationErrors`] before the entity is built.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::schema::{FieldReader, Schema};
//!
//! struct Contact { name: String, age: i64 }
//!
//! impl Schema for Contact {
//!     fn from_object(raw: &Map<String, Value>) -> Result<Self, ValidationErrors> {
//!         let mut r = FieldReader::new(raw);
//!         let name = r.required_text("name");
//!         let age = r.integer_or("age", 0);
//!         let age = r.ensure_min("age", age, 0);
//!         r.finish(|| Some(Contact { name: name?, age: age? }))
//!     }
//! }
//! ```

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::{borrow::Cow, fmt::Display, str::FromStr};
use validator::{ValidateUrl, ValidationError, ValidationErrors};

/// Field key used when the input is not a JSON object at all
pub const BODY_FIELD: &str = "body";

/// A type that can be built from an untrusted JSON object.
pub trait Schema: Sized {
    /// Validate `raw`, reporting every violating field at once
    fn from_object(raw: &Map<String, Value>) -> Result<Self, ValidationErrors>;

    fn from_value(raw: &Value) -> Result<Self, ValidationErrors> {
        match raw {
            Value::Object(object) => Self::from_object(object),
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add(BODY_FIELD, field_error("type", "expected a JSON object"));
                Err(errors)
            }
        }
    }
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Integral value of a JSON number; `5.0` counts, `5.5` does not
fn as_integer(n: &Number) -> Option<i64> {
    if let Some(v) = n.as_i64() {
        return Some(v);
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}

fn is_http_url(value: &str) -> bool {
    (value.starts_with("http://") || value.starts_with("https://"))
        && value.validate_url()
}

/// Reads typed fields out of a JSON object, collecting failures.
///
/// Every reader returns `None` when the field is unusable and records why.
/// Optional readers also return `None` for an absent field, so only
/// [`FieldReader::finish`] decides whether the entity can be built.
pub struct FieldReader<'a> {
    raw: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(raw: &'a Map<String, Value>) -> Self {
        Self {
            raw,
            errors: ValidationErrors::new(),
        }
    }

    /// Record a violation against `field`
    pub fn fail(
        &mut self,
        field: &'static str,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) {
        self.errors.add(field, field_error(code, message));
    }

    fn required(&mut self, field: &'static str) {
        self.fail(field, "required", "field required");
    }

    /// Non-empty text; absent, null or `""` fails. Whitespace counts as text.
    pub fn required_text(&mut self, field: &'static str) -> Option<String> {
        match self.raw.get(field) {
            None | Some(Value::Null) => {
                self.required(field);
                None
            }
            Some(Value::String(s)) if s.is_empty() => {
                self.fail(field, "length", "must not be empty");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.fail(field, "type", "expected a string");
                None
            }
        }
    }

    /// Text that may be absent or null
    pub fn optional_text(&mut self, field: &'static str) -> Option<String> {
        match self.raw.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.fail(field, "type", "expected a string");
                None
            }
        }
    }

    /// Text defaulting to `default` when absent; an explicit null stays `None`
    pub fn optional_text_or(&mut self, field: &'static str, default: &str) -> Option<String> {
        if self.raw.contains_key(field) {
            self.optional_text(field)
        } else {
            Some(default.to_string())
        }
    }

    /// Optional text that must parse as an http(s) URL
    pub fn optional_url(&mut self, field: &'static str) -> Option<String> {
        let value = self.optional_text(field)?;
        if is_http_url(&value) {
            Some(value)
        } else {
            self.fail(field, "url", "must be a valid http or https URL");
            None
        }
    }

    /// Any JSON number, integers included
    pub fn required_number(&mut self, field: &'static str) -> Option<f64> {
        match self.raw.get(field) {
            None | Some(Value::Null) => {
                self.required(field);
                None
            }
            Some(Value::Number(n)) => n.as_f64(),
            Some(_) => {
                self.fail(field, "type", "expected a number");
                None
            }
        }
    }

    /// Integer defaulting to `default` when absent
    pub fn integer_or(&mut self, field: &'static str, default: i64) -> Option<i64> {
        match self.raw.get(field) {
            None => Some(default),
            Some(Value::Number(n)) => {
                let value = as_integer(n);
                if value.is_none() {
                    self.fail(field, "type", "expected an integer");
                }
                value
            }
            Some(_) => {
                self.fail(field, "type", "expected an integer");
                None
            }
        }
    }

    /// Boolean defaulting to `default` when absent
    pub fn bool_or(&mut self, field: &'static str, default: bool) -> Option<bool> {
        match self.raw.get(field) {
            None => Some(default),
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.fail(field, "type", "expected a boolean");
                None
            }
        }
    }

    /// One of `allowed`, parsed with `E`'s `FromStr`
    pub fn required_enum<E: FromStr>(
        &mut self,
        field: &'static str,
        allowed: &'static [&'static str],
    ) -> Option<E> {
        match self.raw.get(field) {
            None | Some(Value::Null) => {
                self.required(field);
                None
            }
            Some(Value::String(s)) => self.parse_choice(field, s, allowed),
            Some(_) => {
                self.fail(field, "type", "expected a string");
                None
            }
        }
    }

    /// Like [`FieldReader::required_enum`], defaulting when absent
    pub fn enum_or<E: FromStr>(
        &mut self,
        field: &'static str,
        default: E,
        allowed: &'static [&'static str],
    ) -> Option<E> {
        match self.raw.get(field) {
            None => Some(default),
            Some(Value::String(s)) => self.parse_choice(field, s, allowed),
            Some(_) => {
                self.fail(field, "type", "expected a string");
                None
            }
        }
    }

    fn parse_choice<E: FromStr>(
        &mut self,
        field: &'static str,
        value: &str,
        allowed: &'static [&'static str],
    ) -> Option<E> {
        match value.parse::<E>() {
            Ok(parsed) if allowed.contains(&value) => Some(parsed),
            _ => {
                let mut err = field_error("enum", format!("must be one of: {}", allowed.join(", ")));
                err.add_param(Cow::Borrowed("allowed"), &allowed);
                err.add_param(Cow::Borrowed("value"), &value);
                self.errors.add(field, err);
                None
            }
        }
    }

    /// Reject values below `min`, passing others through
    pub fn ensure_min<T>(&mut self, field: &'static str, value: Option<T>, min: T) -> Option<T>
    where
        T: PartialOrd + Display + Serialize + Copy,
    {
        match value {
            Some(v) if v < min => {
                let mut err = field_error(
                    "range",
                    format!("must be greater than or equal to {}", min),
                );
                err.add_param(Cow::Borrowed("min"), &min);
                err.add_param(Cow::Borrowed("value"), &v);
                self.errors.add(field, err);
                None
            }
            other => other,
        }
    }

    /// Build the entity if no violation was recorded
    ///
    /// Required readers always record a failure when they return `None`, so
    /// `build` only returns `None` when the error set is already non-empty.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or(self.errors)
    }
}
