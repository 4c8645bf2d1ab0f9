//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic, recoverable failures live here. Anything else (a
/// duplicate id, a broken invariant) is a defect and is asserted instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Incoming data failed a field constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No entity of the given kind exists with this id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// The rule a field violated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// The field must be supplied and cannot be null.
    Required,
    /// Shorter than the given number of characters.
    MinLength(usize),
    /// Longer than the given number of characters.
    MaxLength(usize),
    /// Zero or negative where a strictly positive number is required.
    NotPositive,
    /// NaN or infinite.
    NotFinite,
}

impl Constraint {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::MinLength(_) => "min_length",
            Constraint::MaxLength(_) => "max_length",
            Constraint::NotPositive => "not_positive",
            Constraint::NotFinite => "not_finite",
        }
    }
}

impl core::fmt::Display for Constraint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Constraint::Required => f.write_str("is required"),
            Constraint::MinLength(n) => write!(f, "must be at least {n} characters"),
            Constraint::MaxLength(n) => write!(f, "must be at most {n} characters"),
            Constraint::NotPositive => f.write_str("must be greater than 0"),
            Constraint::NotFinite => f.write_str("must be a finite number"),
        }
    }
}

/// A single field failing a single constraint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field} {constraint} (got {value})")]
pub struct ValidationError {
    pub field: &'static str,
    pub constraint: Constraint,
    /// The offending input, rendered as text.
    pub value: String,
}

impl ValidationError {
    pub fn new(field: &'static str, constraint: Constraint, value: impl Into<String>) -> Self {
        Self {
            field,
            constraint,
            value: value.into(),
        }
    }

    /// Field was missing or explicitly null.
    pub fn required(field: &'static str) -> Self {
        Self::new(field, Constraint::Required, "null")
    }
}
