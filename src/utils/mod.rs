//! Utility functions for code generation, input validation and error mapping.
//!
//! - [`code_generator`] - Random short code generation and reserved codes
//! - [`link_validator`] - Validation of link creation input
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod link_validator;
