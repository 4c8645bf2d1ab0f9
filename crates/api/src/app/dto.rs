use serde::{Deserialize, Serialize};

use itemstore_core::{Patch, ValidationError};
use itemstore_items::{CreateItem, UpdateItem};

// -------------------------
// Request DTOs
// -------------------------

/// `name` and `price` are optional here so that a missing field surfaces as
/// a validation error naming the field, not as a body parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl TryFrom<CreateItemRequest> for CreateItem {
    type Error = ValidationError;

    fn try_from(body: CreateItemRequest) -> Result<Self, Self::Error> {
        let name = body.name.ok_or_else(|| ValidationError::required("name"))?;
        let price = body.price.ok_or_else(|| ValidationError::required("price"))?;
        Ok(CreateItem {
            name,
            description: body.description,
            price,
        })
    }
}

/// Unknown keys (including `id`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub price: Patch<f64>,
}

impl From<UpdateItemRequest> for UpdateItem {
    fn from(body: UpdateItemRequest) -> Self {
        UpdateItem {
            name: body.name,
            description: body.description,
            price: body.price,
        }
    }
}

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// A validated page window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl ListItemsQuery {
    /// Apply defaults and reject out-of-range bounds (nothing is clamped).
    pub fn page(&self) -> Result<Page, String> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if skip < 0 {
            return Err(format!("skip must be >= 0 (got {skip})"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(format!("limit must be between 1 and {MAX_LIMIT} (got {limit})"));
        }

        Ok(Page {
            // Past-the-end offsets just produce an empty page.
            skip: usize::try_from(skip).unwrap_or(usize::MAX),
            limit: limit as usize,
        })
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
