//! Payload validation shared by the write handlers.

mod validation;
pub use validation::{whole_i32, FieldKind, FieldRule, RequestValidator, Schema};
