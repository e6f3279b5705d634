//! Domain DTOs for the recipe and pantry API.
//!
//! # Design
//! Every type serializes with camelCase field names, which is what the HTTP
//! surface exposes. The server crate stores and returns these types directly;
//! only the row mapping lives on the persistence side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pantry record: one normalized ingredient and whether it is on hand.
///
/// Entries with `has_item == false` make up the shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PantryEntry {
    pub id: Uuid,
    pub ingredient: String,
    pub has_item: bool,
    pub created_at: DateTime<Utc>,
}

impl PantryEntry {
    /// Builds a fresh entry. The caller is responsible for passing an already
    /// normalized key.
    pub fn new(ingredient: impl Into<String>, has_item: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            ingredient: ingredient.into(),
            has_item,
            created_at: Utc::now(),
        }
    }
}

/// Request payload for creating or replacing a pantry entry by ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPantryEntry {
    pub ingredient: String,
    #[serde(default)]
    pub has_item: bool,
}

/// Request payload for flipping availability of an existing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailability {
    pub has_item: bool,
}

/// A stored recipe. `ingredients` is the raw comma-separated text as typed by
/// the user; it is normalized only when reconciled against the pantry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub meal_type: String,
    pub ingredients: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub meal_type: String,
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
}

/// Request payload for updating an existing recipe. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl UpdateRecipe {
    /// Applies the present fields onto `recipe`.
    pub fn apply_to(self, recipe: &mut Recipe) {
        if let Some(name) = self.name {
            recipe.name = name;
        }
        if let Some(meal_type) = self.meal_type {
            recipe.meal_type = meal_type;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
    }
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileSummary {
    /// Every ingredient visited, duplicates included.
    pub processed_count: usize,
    /// Ingredients that were new to the pantry and got recorded as missing.
    pub added_to_shopping_list: usize,
    /// The normalized input sequence, in input order.
    pub ingredients: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: Uuid::nil(),
            name: "Omelete".to_string(),
            meal_type: "café da manhã".to_string(),
            ingredients: "2 ovos, sal".to_string(),
            instructions: "Bata e frite.".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pantry_entry_serializes_camel_case() {
        let entry = PantryEntry::new("sal", false);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["ingredient"], "sal");
        assert_eq!(json["hasItem"], false);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("has_item").is_none());
    }

    #[test]
    fn upsert_defaults_has_item_to_false() {
        let input: UpsertPantryEntry = serde_json::from_str(r#"{"ingredient":"Sal"}"#).unwrap();
        assert_eq!(input.ingredient, "Sal");
        assert!(!input.has_item);
    }

    #[test]
    fn new_recipe_rejects_missing_ingredients() {
        let result: Result<NewRecipe, _> = serde_json::from_str(r#"{"name":"Sopa"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_recipe_optional_fields_default_to_empty() {
        let input: NewRecipe =
            serde_json::from_str(r#"{"name":"Sopa","ingredients":"água, sal"}"#).unwrap();
        assert!(input.meal_type.is_empty());
        assert!(input.instructions.is_empty());
    }

    #[test]
    fn update_recipe_applies_only_present_fields() {
        let mut target = recipe();
        let update: UpdateRecipe = serde_json::from_str(r#"{"name":"Omelete simples"}"#).unwrap();
        update.apply_to(&mut target);
        assert_eq!(target.name, "Omelete simples");
        assert_eq!(target.ingredients, "2 ovos, sal");
        assert_eq!(target.meal_type, "café da manhã");
    }

    #[test]
    fn summary_uses_wire_field_names() {
        let summary = ReconcileSummary {
            processed_count: 2,
            added_to_shopping_list: 1,
            ingredients: vec!["arroz".to_string(), "feijão".to_string()],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["processedCount"], 2);
        assert_eq!(json["addedToShoppingList"], 1);
        assert_eq!(json["ingredients"][1], "feijão");
    }
}
