//! Utility functions for code generation and URL validation.
//!
//! - [`code_generator`] - Random short codes and custom alias validation
//! - [`url_validator`] - Absolute URL validation

pub mod code_generator;
pub mod url_validator;
