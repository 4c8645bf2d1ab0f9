use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use itemstore_core::{Entity, Patch};

/// Item identifier: a positive integer assigned by the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// `None` for 0; ids are strictly positive.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Text that is not a positive integer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid item id: {0:?}")]
pub struct InvalidItemId(pub String);

impl FromStr for ItemId {
    type Err = InvalidItemId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(ItemId::new)
            .ok_or_else(|| InvalidItemId(s.to_string()))
    }
}

/// A stored item.
///
/// Only [`crate::ItemStore`] constructs or mutates these, so every instance
/// satisfies the field constraints in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    description: Option<String>,
    price: f64,
}

impl Item {
    pub(crate) fn from_valid(id: ItemId, req: CreateItem) -> Self {
        Self {
            id,
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }

    /// Apply an already-validated update. `Absent` fields are left alone.
    pub(crate) fn apply(&mut self, update: UpdateItem) {
        if let Patch::Set(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description.into_option() {
            self.description = description;
        }
        if let Patch::Set(price) = update.price {
            self.price = price;
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for creating an item. `id` is never part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

impl CreateItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update: every field is optional and presence-sensitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateItem {
    pub name: Patch<String>,
    pub description: Patch<String>,
    pub price: Patch<f64>,
}

impl UpdateItem {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Set(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Patch::Set(description.into());
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Patch::Null;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Patch::Set(price);
        self
    }
}
