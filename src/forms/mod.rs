//! Form model layer
//!
//! A form is a tree of [`Control`]s (fields, groups and arrays). Validators
//! are pure functions attached to controls; validity is recomputed bottom-up
//! on every mutation made through [`Form`].

mod control;
mod error;
mod form;
mod validators;
mod value;

pub use control::{ArrayControl, Control, FieldControl, GroupControl, Status};
pub use error::FormError;
pub use form::Form;
pub use validators::{run_validators, ValidationError, ValidationErrors, Validator};
pub use value::FieldValue;
