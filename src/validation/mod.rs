//! Project validation before optimization.

mod validate;

pub use validate::{validate_config, validate_project, ValidationResult};
