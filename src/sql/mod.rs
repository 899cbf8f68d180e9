//! Safe SQL builder: identifiers from static table definitions only, values as parameters.

mod builder;
pub use builder::*;
