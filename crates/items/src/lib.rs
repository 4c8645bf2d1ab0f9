//! Item domain module.
//!
//! Field validation, id assignment, partial updates and pagination for the
//! `Item` resource, implemented as deterministic in-memory logic (no IO, no
//! HTTP).

pub mod item;
pub mod store;
pub mod validation;

pub use item::{CreateItem, InvalidItemId, Item, ItemId, UpdateItem};
pub use store::ItemStore;
