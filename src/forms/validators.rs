//! Validator functions and validation error sets
//!
//! A validator is a pure function over an immutable control. It returns
//! `None` when the control passes, or the set of errors it found.

use super::control::Control;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// A single named validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    MinLength {
        required_length: usize,
        actual_length: usize,
    },
    MaxLength {
        required_length: usize,
        actual_length: usize,
    },
    Email,
    Match,
    Range,
}

impl ValidationError {
    /// Key the error is stored under
    pub fn key(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength { .. } => "minlength",
            Self::MaxLength { .. } => "maxlength",
            Self::Email => "email",
            Self::Match => "match",
            Self::Range => "range",
        }
    }
}

/// Ordered set of validation errors, at most one per key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: ValidationError) -> Self {
        Self(vec![error])
    }

    /// Insert an error, replacing an existing one with the same key in place
    pub fn insert(&mut self, error: ValidationError) {
        match self.0.iter_mut().find(|e| e.key() == error.key()) {
            Some(existing) => *existing = error,
            None => self.0.push(error),
        }
    }

    /// Merge another set into this one; later entries win per key
    pub fn merge(&mut self, other: ValidationErrors) {
        for error in other.0 {
            self.insert(error);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Error keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(ValidationError::key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

type ValidateFn = dyn Fn(&Control) -> Option<ValidationErrors> + Send + Sync;

/// A named validator attached to a control
#[derive(Clone)]
pub struct Validator {
    name: &'static str,
    check: Arc<ValidateFn>,
}

impl Validator {
    /// Wrap a validation function under a name
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&Control) -> Option<ValidationErrors> + Send + Sync + 'static,
    {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn validate(&self, control: &Control) -> Option<ValidationErrors> {
        (self.check)(control)
    }

    /// Rejects null and empty text
    pub fn required() -> Self {
        Self::new("required", |control| {
            let value = control.field_value()?;
            value
                .is_empty_input()
                .then(|| ValidationErrors::single(ValidationError::Required))
        })
    }

    /// Rejects text shorter than `min` characters; empty values pass
    pub fn min_length(min: usize) -> Self {
        Self::new("minlength", move |control| {
            let value = control.field_value()?;
            if value.is_empty_input() {
                return None;
            }
            let actual = value.text_len()?;
            (actual < min).then(|| {
                ValidationErrors::single(ValidationError::MinLength {
                    required_length: min,
                    actual_length: actual,
                })
            })
        })
    }

    /// Rejects text longer than `max` characters
    pub fn max_length(max: usize) -> Self {
        Self::new("maxlength", move |control| {
            let actual = control.field_value()?.text_len()?;
            (actual > max).then(|| {
                ValidationErrors::single(ValidationError::MaxLength {
                    required_length: max,
                    actual_length: actual,
                })
            })
        })
    }

    /// Rejects non-empty values that are not a well-formed email address
    pub fn email() -> Self {
        Self::new("email", |control| {
            let value = control.field_value()?;
            if value.is_empty_input() {
                return None;
            }
            let ok = match value {
                super::FieldValue::Text(s) => is_valid_email(s),
                _ => false,
            };
            (!ok).then(|| ValidationErrors::single(ValidationError::Email))
        })
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

/// Run every validator and merge their errors
pub fn run_validators(validators: &[Validator], control: &Control) -> Option<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for validator in validators {
        if let Some(found) = validator.validate(control) {
            errors.merge(found);
        }
    }
    (!errors.is_empty()).then_some(errors)
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Address length is capped at 254 and the local part at 64
fn is_valid_email(value: &str) -> bool {
    if value.is_empty() || value.len() > 254 {
        return false;
    }
    match value.find('@') {
        Some(at) if (1..=64).contains(&at) => EMAIL_PATTERN.is_match(value),
        _ => false,
    }
}
