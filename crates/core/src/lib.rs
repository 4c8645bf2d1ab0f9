//! `itemstore-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod patch;

pub use entity::Entity;
pub use error::{Constraint, DomainError, DomainResult, ValidationError};
pub use id::IdSequence;
pub use patch::Patch;
