//! Field constraints for incoming item data.
//!
//! Everything here is pure: no store access, no side effects. Successful
//! checks return the normalized value (surrounding whitespace trimmed), which
//! is what gets stored.

use itemstore_core::{Constraint, Patch, ValidationError};

use crate::item::{CreateItem, UpdateItem};

pub const NAME_MIN_CHARS: usize = 1;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// How much of an overlong value is echoed back in the error.
const EXCERPT_CHARS: usize = 32;

fn excerpt(value: &str, len: usize) -> String {
    let head: String = value.chars().take(EXCERPT_CHARS).collect();
    format!("{head:?}... ({len} characters)")
}

pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len < NAME_MIN_CHARS {
        return Err(ValidationError::new(
            "name",
            Constraint::MinLength(NAME_MIN_CHARS),
            format!("{raw:?}"),
        ));
    }
    if len > NAME_MAX_CHARS {
        return Err(ValidationError::new(
            "name",
            Constraint::MaxLength(NAME_MAX_CHARS),
            excerpt(name, len),
        ));
    }
    Ok(name.to_string())
}

/// Empty descriptions are allowed.
pub fn validate_description(raw: &str) -> Result<String, ValidationError> {
    let description = raw.trim();
    let len = description.chars().count();
    if len > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::new(
            "description",
            Constraint::MaxLength(DESCRIPTION_MAX_CHARS),
            excerpt(description, len),
        ));
    }
    Ok(description.to_string())
}

pub fn validate_price(price: f64) -> Result<f64, ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::new("price", Constraint::NotFinite, price.to_string()));
    }
    if price <= 0.0 {
        return Err(ValidationError::new("price", Constraint::NotPositive, price.to_string()));
    }
    Ok(price)
}

/// Check every field of a create request, returning the normalized request.
pub fn validate_create(req: CreateItem) -> Result<CreateItem, ValidationError> {
    let name = validate_name(&req.name)?;
    let description = req
        .description
        .as_deref()
        .map(validate_description)
        .transpose()?;
    let price = validate_price(req.price)?;

    Ok(CreateItem {
        name,
        description,
        price,
    })
}

/// Check only the fields present in an update request.
///
/// `name` and `price` cannot be cleared, so `Null` on either is rejected as
/// [`Constraint::Required`]. `Null` on `description` passes through.
pub fn validate_update(req: UpdateItem) -> Result<UpdateItem, ValidationError> {
    let name = match req.name {
        Patch::Absent => Patch::Absent,
        Patch::Null => return Err(ValidationError::required("name")),
        Patch::Set(raw) => Patch::Set(validate_name(&raw)?),
    };
    let description = match req.description {
        Patch::Set(raw) => Patch::Set(validate_description(&raw)?),
        other => other,
    };
    let price = match req.price {
        Patch::Absent => Patch::Absent,
        Patch::Null => return Err(ValidationError::required("price")),
        Patch::Set(p) => Patch::Set(validate_price(p)?),
    };

    Ok(UpdateItem {
        name,
        description,
        price,
    })
}
