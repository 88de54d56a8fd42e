//! Catalog Data Types
//!
//! `Recipe` is the immutable record handed to the rest of the service. The remaining
//! structures mirror TheMealDB's JSON and only exist to be converted into it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Highest ingredient slot TheMealDB fills (`strIngredient1` .. `strIngredient20`).
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// A recipe as exposed by the service. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    /// Lower-cased.
    pub tags: Vec<String>,
}

impl Recipe {
    pub fn from_meal(meal: Meal) -> Self {
        let ingredients = meal.ingredients();
        let tags = meal
            .str_tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(|tag| tag.trim().to_lowercase())
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: meal.id_meal,
            name: meal.str_meal.unwrap_or_default(),
            thumbnail_url: meal.str_meal_thumb.unwrap_or_default(),
            category: meal.str_category.unwrap_or_default(),
            area: meal.str_area.unwrap_or_default(),
            instructions: meal.str_instructions.unwrap_or_default(),
            ingredients,
            tags,
        }
    }
}

/// One of the four dimensions a term is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Category,
    Area,
    Ingredient,
    Name,
}

impl Facet {
    /// Canonical lookup order for a single term.
    pub const ALL: [Facet; 4] = [Facet::Category, Facet::Area, Facet::Ingredient, Facet::Name];
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Category => "category",
            Facet::Area => "area",
            Facet::Ingredient => "ingredient",
            Facet::Name => "name",
        };
        f.write_str(name)
    }
}

/// A short list of each facet's values, for populating query builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownOptions {
    pub categories: Vec<String>,
    pub areas: Vec<String>,
    pub ingredients: Vec<String>,
}

// --- Upstream wire format ---

/// Envelope of every TheMealDB response. `meals` is `null` when nothing matched.
#[derive(Debug, Deserialize)]
pub struct MealDbResponse<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealDbResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

/// A meal record. Filter endpoints only fill id, name and thumbnail.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id_meal: String,
    #[serde(default)]
    pub str_meal: Option<String>,
    #[serde(default)]
    pub str_meal_thumb: Option<String>,
    #[serde(default)]
    pub str_category: Option<String>,
    #[serde(default)]
    pub str_area: Option<String>,
    #[serde(default)]
    pub str_instructions: Option<String>,
    #[serde(default)]
    pub str_tags: Option<String>,
    /// Numbered `strIngredientN` / `strMeasureN` slots and anything else.
    #[serde(flatten)]
    pub slots: HashMap<String, serde_json::Value>,
}

impl Meal {
    /// Non-blank ingredients in slot order, trimmed.
    pub fn ingredients(&self) -> Vec<String> {
        (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                self.slots
                    .get(&format!("strIngredient{}", slot))
                    .and_then(serde_json::Value::as_str)
            })
            .map(str::trim)
            .filter(|ingredient| !ingredient.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    #[serde(default)]
    pub str_category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaEntry {
    #[serde(default)]
    pub str_area: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntry {
    #[serde(default)]
    pub str_ingredient: Option<String>,
}
