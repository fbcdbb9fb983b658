//! Domain model for classes, lectures and their slide notes.
//!
//! # Responsibility
//! - Define canonical records and the input shapes used to create/patch them.
//! - Own timestamp stamping rules and write-path validation.
//!
//! # Invariants
//! - Every record is identified by a generated UUID that is never reused.
//! - `created_at` never changes after creation.
//! - `updated_at` strictly increases on every mutation.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod class;
pub mod lecture;
pub mod notes;
pub mod pdf;
pub mod timestamp;

/// Write-path validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `name` is empty after trimming.
    EmptyName,
    /// Slide numbers are 1-based; `0` is rejected.
    InvalidSlideNumber(u32),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidSlideNumber(slide) => {
                write!(f, "slide number {slide} is invalid; slides start at 1")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}
