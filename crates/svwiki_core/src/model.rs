use serde::Deserialize;

/// One entry of the objects table. Field names follow the raw JSON dump;
/// anything the source may omit gets a default so a sparse record still loads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ObjectRecord {
    pub name: String,
    pub display_name: String,
    pub price: i64,
    pub edibility: i64,
    pub category: i64,
    pub context_tags: Option<Vec<String>>,
    pub exclude_from_random_sale: bool,
}

impl ObjectRecord {
    /// Color tag from the context tags (`color_dark_brown` -> `dark brown`).
    /// Empty string when the item carries no color tag.
    pub fn color(&self) -> String {
        let Some(tags) = &self.context_tags else {
            return String::new();
        };
        for tag in tags {
            if let Some(color) = tag.strip_prefix("color_") {
                return color.replace('_', " ");
            }
        }
        String::new()
    }

    pub fn has_context_tag(&self, tag: &str) -> bool {
        self.context_tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|item| item == tag))
    }
}

/// One entry of the big-craftables table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BigCraftableRecord {
    pub name: String,
    pub display_name: String,
    pub price: i64,
}

/// One entry of the crops table, keyed by seed id in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CropRecord {
    pub harvest_item_id: String,
    pub days_in_phase: Vec<u32>,
    pub seasons: Vec<String>,
}

impl CropRecord {
    /// Total growth time is the sum of the phase durations.
    pub fn growth_days(&self) -> u32 {
        self.days_in_phase.iter().sum()
    }
}

/// One entry of the fruit-trees table, keyed by sapling id in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FruitTreeRecord {
    pub fruit: Vec<FruitEntry>,
    pub seasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FruitEntry {
    pub item_id: String,
}

impl FruitTreeRecord {
    /// The harvested fruit id. May appear bare or `(O)`-qualified in the
    /// source table; matching against item ids must accept both forms.
    pub fn harvest(&self) -> Option<&str> {
        self.fruit.first().map(|entry| entry.item_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_comes_from_first_color_tag() {
        let record = ObjectRecord {
            context_tags: Some(vec![
                "season_spring".to_string(),
                "color_dark_brown".to_string(),
                "color_red".to_string(),
            ]),
            ..ObjectRecord::default()
        };
        assert_eq!(record.color(), "dark brown");
    }

    #[test]
    fn color_is_empty_without_tags() {
        assert_eq!(ObjectRecord::default().color(), "");
    }

    #[test]
    fn growth_days_sums_phases() {
        let crop = CropRecord {
            days_in_phase: vec![1, 2, 3, 4],
            ..CropRecord::default()
        };
        assert_eq!(crop.growth_days(), 10);
    }

    #[test]
    fn fruit_tree_harvest_is_first_fruit() {
        let tree = FruitTreeRecord {
            fruit: vec![FruitEntry {
                item_id: "(O)634".to_string(),
            }],
            seasons: vec!["Spring".to_string()],
        };
        assert_eq!(tree.harvest(), Some("(O)634"));
        assert_eq!(FruitTreeRecord::default().harvest(), None);
    }

    #[test]
    fn sparse_object_record_deserializes() {
        let record: ObjectRecord =
            serde_json::from_str(r#"{"Name": "Moss", "Price": 5}"#).expect("parse");
        assert_eq!(record.name, "Moss");
        assert_eq!(record.price, 5);
        assert_eq!(record.category, 0);
        assert!(!record.exclude_from_random_sale);
    }
}
