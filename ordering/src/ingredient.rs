//! Ingredient catalog entries and their builder placements.
//!
//! Field names follow the upstream wire format, so a catalog payload
//! deserializes directly into [`Ingredient`] values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned catalog identifier, carried verbatim from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IngredientId(pub String);

impl IngredientId {
    /// Create an id from any string-ish value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IngredientId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Category of a catalog ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    /// Brackets the burger; priced twice in a composed order.
    Bun,
    /// Sauce layer.
    Sauce,
    /// Everything else between the buns.
    #[serde(rename = "main")]
    Filling,
}

/// One catalog entry as served by the ingredients endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Catalog identifier.
    #[serde(rename = "_id")]
    pub id: IngredientId,
    /// Display name.
    pub name: String,
    /// Category; drives builder slot routing.
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    /// Unit price. Buns count twice in an order total.
    pub price: u64,
    /// Nutrition: calories per serving.
    pub calories: u32,
    /// Nutrition: proteins per serving.
    pub proteins: u32,
    /// Nutrition: fat per serving.
    pub fat: u32,
    /// Nutrition: carbohydrates per serving.
    pub carbohydrates: u32,
    /// Full-size image URL.
    pub image: String,
    /// Mobile image URL.
    pub image_mobile: String,
    /// Large image URL.
    pub image_large: String,
}

impl Ingredient {
    /// Whether this entry belongs in the bun slot.
    pub fn is_bun(&self) -> bool {
        self.kind == IngredientKind::Bun
    }
}

/// Identity of one placement inside the builder.
///
/// Distinct from [`IngredientId`]: the same catalog entry can appear several
/// times in a draft, and each occurrence gets its own placement id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementId(pub u64);

/// A catalog ingredient placed into the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedIngredient {
    /// Stable identity of this placement within the draft.
    pub placement: PlacementId,
    /// The catalog entry that was placed.
    pub ingredient: Ingredient,
}
