//! Vocabulary Translator
//!
//! Renders a query as a SQL `SELECT` over the relational recipe store. The `WHERE`
//! clause is the raw query text with domain vocabulary replaced by predicates, applied
//! as an ordered table of whole-word, case-insensitive substitutions.
//!
//! `AND`, `OR` and parentheses pass through untouched and act as the SQL boolean
//! operators. Unknown words pass through verbatim; nothing is ever rejected.
//!
//! The table is applied in order over the evolving text, so later rows can rewrite the
//! output of earlier ones (`vegan` is both a category and a dietary keyword). That
//! cascade is part of the rendered output and is kept as is.

use regex::Regex;
use std::sync::LazyLock;

const SQL_HEAD: &str = "SELECT r.*, c.CategoryName, a.AreaName
FROM Recipes r
LEFT JOIN Categories c ON r.CategoryId = c.Id
LEFT JOIN Areas a ON r.AreaId = a.Id
LEFT JOIN RecipeIngredients ri ON r.Id = ri.RecipeId
LEFT JOIN Ingredients i ON ri.IngredientId = i.Id
WHERE ";

const SQL_TAIL: &str = "\nGROUP BY r.Id\nORDER BY r.Name;";

pub const AREAS: &[&str] = &[
    "american",
    "british",
    "canadian",
    "chinese",
    "croatian",
    "dutch",
    "egyptian",
    "filipino",
    "french",
    "greek",
    "indian",
    "irish",
    "italian",
    "jamaican",
    "japanese",
    "kenyan",
    "malaysian",
    "mexican",
    "moroccan",
    "polish",
    "portuguese",
    "russian",
    "spanish",
    "thai",
    "tunisian",
    "turkish",
    "ukrainian",
    "vietnamese",
];

pub const INGREDIENTS: &[&str] = &[
    "chicken",
    "salmon",
    "beef",
    "pork",
    "avocado",
    "lime",
    "rice",
    "onions",
    "garlic",
    "tomatoes",
    "potatoes",
    "carrots",
    "mushrooms",
    "peppers",
    "cheese",
    "butter",
];

pub const CATEGORIES: &[&str] = &[
    "breakfast",
    "dessert",
    "goat",
    "lamb",
    "miscellaneous",
    "pasta",
    "seafood",
    "side",
    "starter",
    "vegan",
    "vegetarian",
];

/// Single-keyword predicates applied after the vocabulary lists.
pub const ATTRIBUTES: &[(&str, &str)] = &[
    ("vegetarian", "r.IsVegetarian = 1"),
    ("vegan", "r.IsVegan = 1"),
    ("gluten_free", "r.IsGlutenFree = 1"),
    ("quick", "r.CookTimeMinutes <= 30"),
    ("easy", "r.DifficultyLevel = 'Easy'"),
];

/// One row of the translation table.
pub struct Substitution {
    pub pattern: Regex,
    /// Replacement template; `${1}` is the matched word with its original casing.
    pub replacement: String,
}

impl Substitution {
    fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement: replacement.to_string(),
        }
    }

    fn vocabulary(words: &[&str], replacement: &str) -> Self {
        Self::new(&format!(r"(?i)\b({})\b", words.join("|")), replacement)
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// The substitutions in application order.
pub static TRANSLATION_TABLE: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    let mut table = vec![
        Substitution::vocabulary(AREAS, "a.AreaName = '${1}'"),
        Substitution::vocabulary(INGREDIENTS, "i.IngredientName LIKE '%${1}%'"),
        Substitution::vocabulary(CATEGORIES, "c.CategoryName = '${1}'"),
    ];

    for (keyword, predicate) in ATTRIBUTES {
        // Literal predicates: escape '$' so the template engine leaves them alone.
        table.push(Substitution::new(
            &format!(r"(?i)\b{}\b", keyword),
            &predicate.replace('$', "$$"),
        ));
    }

    // NOT normalization: collapse the whitespace after NOT to one space.
    table.push(Substitution::new(r"(?i)NOT\s+\(", "NOT ("));
    table.push(Substitution::new(r"(?i)NOT\s+([^(]\S+)", "NOT ${1}"));

    table
});

/// Builds the full SQL statement for a query. Empty input yields an empty string.
pub fn to_sql(query: &str) -> String {
    if query.trim().is_empty() {
        return String::new();
    }

    format!("{}{}{}", SQL_HEAD, where_clause(query), SQL_TAIL)
}

/// Converts a boolean query into the body of a `WHERE` clause.
pub fn where_clause(query: &str) -> String {
    if query.trim().is_empty() {
        return "1=1".to_string();
    }

    TRANSLATION_TABLE
        .iter()
        .fold(query.to_string(), |clause, substitution| {
            substitution.apply(&clause)
        })
}
