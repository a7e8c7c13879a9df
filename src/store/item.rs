//! Item Module
//!
//! The persisted record type.
//!
//! Stored records are read leniently: only an integer `id` is required.
//! Known fields with the expected JSON type are lifted into typed fields;
//! anything else (unknown keys, or known keys holding another type) stays in
//! `extra` and is written back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{ItemDraft, ItemPatch};

// == Item ==
/// A single catalog entry as stored in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Item {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields this service does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Item {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let id = fields
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| "record without an integer `id`".to_string())?;
        fields.remove("id");

        Ok(Self {
            id,
            name: take(&mut fields, "name", |v| v.as_str().map(str::to_owned)),
            category: take(&mut fields, "category", |v| v.as_str().map(str::to_owned)),
            price: take(&mut fields, "price", Value::as_f64),
            description: take(&mut fields, "description", |v| v.as_str().map(str::to_owned)),
            extra: fields,
        })
    }
}

/// Removes `key` only when `convert` accepts its value.
fn take<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = fields.get(key).and_then(convert)?;
    fields.remove(key);
    Some(value)
}

impl Item {
    // == Constructor ==
    /// Builds a fully populated item without a description.
    pub fn new(id: i64, name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: Some(name.into()),
            category: Some(category.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    /// Materializes a draft under the given id.
    pub fn from_draft(id: i64, draft: ItemDraft) -> Self {
        Self {
            description: draft.description,
            ..Self::new(id, draft.name, draft.category, draft.price)
        }
    }

    // == Apply Patch ==
    /// Shallow merge: fields present in the patch overwrite, others are kept.
    ///
    /// The patch id is never applied; callers reject mismatches beforehand.
    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.extra.remove("name");
            self.name = Some(name.clone());
        }
        if let Some(category) = &patch.category {
            self.extra.remove("category");
            self.category = Some(category.clone());
        }
        if let Some(price) = patch.price {
            self.extra.remove("price");
            self.price = Some(price);
        }
        if let Some(description) = &patch.description {
            self.extra.remove("description");
            self.description = description.clone();
        }
    }

    // == Matches ==
    /// Case-insensitive substring match on name or category.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.category]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn desk() -> Item {
        Item {
            description: Some("Electric".to_string()),
            ..Item::new(1, "Standing Desk", "Furniture", 1199.0)
        }
    }

    #[test]
    fn test_from_draft() {
        let draft = ItemDraft {
            name: "Desk".to_string(),
            category: "Furniture".to_string(),
            price: 150.0,
            description: None,
        };
        let item = Item::from_draft(7, draft);
        assert_eq!(item.id, 7);
        assert_eq!(item.name.as_deref(), Some("Desk"));
        assert!(item.description.is_none());
    }

    #[test]
    fn test_apply_patch_keeps_untouched_fields() {
        let mut item = desk();
        item.apply_patch(&ItemPatch::category("Office"));
        assert_eq!(item.category.as_deref(), Some("Office"));
        assert_eq!(item.name.as_deref(), Some("Standing Desk"));
        assert_eq!(item.price, Some(1199.0));
        assert_eq!(item.description.as_deref(), Some("Electric"));
    }

    #[test]
    fn test_apply_patch_clears_description() {
        let mut item = desk();
        item.apply_patch(&ItemPatch {
            description: Some(None),
            ..ItemPatch::default()
        });
        assert!(item.description.is_none());
    }

    #[test]
    fn test_apply_patch_ignores_id() {
        let mut item = desk();
        item.apply_patch(&ItemPatch {
            id: Some(99),
            ..ItemPatch::default()
        });
        assert_eq!(item.id, 1);
    }

    #[test]
    fn test_apply_patch_replaces_mistyped_field() {
        let mut item: Item =
            serde_json::from_value(json!({ "id": 1, "name": "Desk", "price": "cheap" })).unwrap();
        item.apply_patch(&ItemPatch {
            price: Some(80.0),
            ..ItemPatch::default()
        });

        let written = serde_json::to_value(&item).unwrap();
        assert_eq!(written["price"], json!(80.0));
        assert!(item.extra.is_empty());
    }

    #[test]
    fn test_matches_case_insensitive() {
        let item = desk();
        assert!(item.matches("desk"));
        assert!(item.matches("furn"));
        assert!(!item.matches("chair"));
    }

    #[test]
    fn test_matches_without_name() {
        let item = Item {
            name: None,
            ..desk()
        };
        assert!(item.matches("furn"));
        assert!(!item.matches("desk"));
    }

    #[test]
    fn test_description_omitted_when_absent() {
        let mut item = desk();
        item.description = None;
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("description"));
    }

    #[test]
    fn test_deserialize_without_description() {
        let item: Item =
            serde_json::from_str(r#"{"id":1,"name":"Laptop","category":"Electronics","price":2499}"#)
                .unwrap();
        assert_eq!(item.price, Some(2499.0));
        assert!(item.description.is_none());
        assert!(item.extra.is_empty());
    }

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let raw = json!({ "id": 1, "name": "Laptop", "stock": 3, "tags": ["new"] });
        let item: Item = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.extra.get("stock"), Some(&json!(3)));
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_deserialize_missing_and_mistyped_fields() {
        let raw = json!({ "id": 2, "category": "Misc", "price": "n/a" });
        let item: Item = serde_json::from_value(raw.clone()).unwrap();
        assert!(item.name.is_none());
        assert!(item.price.is_none());
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_deserialize_requires_integer_id() {
        assert!(serde_json::from_value::<Item>(json!({ "name": "Desk" })).is_err());
        assert!(serde_json::from_value::<Item>(json!({ "id": "1" })).is_err());
    }
}
