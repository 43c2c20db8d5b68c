//! # elms-validate
//!
//! Rule-based validation of a completed ELMS value tree.
//!
//! Failures are data, never errors: [`validate`] always returns a
//! [`ValidationResult`] and the caller decides how to present it, typically
//! via [`format_errors`].

pub mod report;
pub mod rules;

pub use report::{ValidationError, ValidationResult, format_errors, report_schema};
pub use rules::{Validator, validate};
