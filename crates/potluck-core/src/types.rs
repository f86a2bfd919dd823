use serde::{Deserialize, Serialize};

/// A recipe document as produced by the crawler.
///
/// Field names follow the crawler's JSON output (`imageLink`), so the same
/// serde shape reads crawl files and round-trips through the store. Ids are
/// assigned sequentially per crawl page: dense-ish, monotonic, but not
/// contiguous. They are a sampling key only and are never shown to users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u32,

    pub name: String,

    /// Source URL, rendered behind the "View" button.
    pub link: String,

    /// Falls back to `name` at render time when absent.
    #[serde(default)]
    pub description: Option<String>,

    /// When absent, no image accessory is rendered.
    #[serde(default)]
    pub image_link: Option<String>,

    #[serde(default)]
    pub ingredients: Vec<String>,

    /// Not rendered by the current message layout; reserved.
    #[serde(default)]
    pub directions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_crawler_output_shape() {
        let json = r#"{
            "id": 42,
            "name": "Garlic Soup",
            "link": "https://example.com/recipes/garlic-soup",
            "description": "A soup of garlic.",
            "imageLink": "https://example.com/img/garlic.jpg",
            "ingredients": ["garlic", "water"],
            "directions": ["peel", "boil"]
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, 42);
        assert_eq!(recipe.image_link.as_deref(), Some("https://example.com/img/garlic.jpg"));
        assert_eq!(recipe.ingredients.len(), 2);
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{"id": 1, "name": "Toast", "link": "https://example.com/toast"}"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(recipe.description.is_none());
        assert!(recipe.image_link.is_none());
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.directions.is_empty());
    }
}
