//! In-memory form model for creating and editing records.
//!
//! One parameterized model serves every entity form; a schema describes
//! which fields a given entity requires before submission.

pub mod model;
pub mod payload;
pub mod validate;

pub use model::{FieldPath, FieldValue, FormError, FormModel, ListEntry};
pub use validate::{validate, FormSchema, ValidationError};
