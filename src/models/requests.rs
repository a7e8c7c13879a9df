//! Request DTOs for the catalog API
//!
//! Bodies arrive as raw JSON and are checked here before any mutation is
//! attempted, so every violated field is reported at once instead of
//! failing on the first bad one.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{CatalogError, FieldViolation, Result};

const REQUIRED: &str = "is required";
const NON_EMPTY_STRING: &str = "must be a non-empty string";
const STRING: &str = "must be a string";
const PRICE: &str = "must be a non-negative number";
const INTEGER: &str = "must be an integer";

/// Body of POST /api/items
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
}

impl ItemDraft {
    /// Builds a draft from a raw JSON body.
    ///
    /// An `id` in the body is ignored; the store assigns one.
    pub fn from_value(body: &Value) -> Result<Self> {
        let obj = as_object(body)?;
        let mut violations = Vec::new();

        let name = required(obj, "name", &mut violations, non_empty_string);
        let category = required(obj, "category", &mut violations, non_empty_string);
        let price = required(obj, "price", &mut violations, non_negative_number);
        let description = match obj.get("description") {
            None | Some(Value::Null) => None,
            Some(v) => string("description", v, &mut violations),
        };

        match (name, category, price) {
            (Some(name), Some(category), Some(price)) if violations.is_empty() => Ok(Self {
                name,
                category,
                price,
                description,
            }),
            _ => Err(CatalogError::Validation(violations)),
        }
    }

    /// Re-checks the value rules on an already typed draft.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", NON_EMPTY_STRING));
        }
        if self.category.trim().is_empty() {
            violations.push(FieldViolation::new("category", NON_EMPTY_STRING));
        }
        if !valid_price(self.price) {
            violations.push(FieldViolation::new("price", PRICE));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation(violations))
        }
    }
}

/// Body of PUT/PATCH /api/items/:id. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}

impl ItemPatch {
    /// Builds a patch from a raw JSON body. Unknown fields are ignored.
    pub fn from_value(body: &Value) -> Result<Self> {
        let obj = as_object(body)?;
        let mut violations = Vec::new();

        let id = match obj.get("id") {
            None | Some(Value::Null) => None,
            Some(v) => match v.as_i64() {
                Some(id) => Some(id),
                None => {
                    violations.push(FieldViolation::new("id", INTEGER));
                    None
                }
            },
        };
        let name = obj
            .get("name")
            .and_then(|v| non_empty_string("name", v, &mut violations));
        let category = obj
            .get("category")
            .and_then(|v| non_empty_string("category", v, &mut violations));
        let price = obj
            .get("price")
            .and_then(|v| non_negative_number("price", v, &mut violations));
        let description = match obj.get("description") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(v) => string("description", v, &mut violations).map(Some),
        };

        if violations.is_empty() {
            Ok(Self {
                id,
                name,
                category,
                price,
                description,
            })
        } else {
            Err(CatalogError::Validation(violations))
        }
    }

    /// Convenience constructor for a category-only change.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

/// Query string of GET /api/items
///
/// `page` and `limit` stay strings so malformed values surface as
/// `InvalidQuery` rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListQuery {
    /// Resolves `(page, limit)` against the configured defaults.
    pub fn page_and_limit(&self, default_limit: usize, max_limit: usize) -> Result<(usize, usize)> {
        let page = parse_positive("page", self.page.as_deref())?.unwrap_or(1);
        let limit = parse_positive("limit", self.limit.as_deref())?
            .unwrap_or(default_limit)
            .min(max_limit);
        Ok((page, limit))
    }

    /// Search term as sent; an empty `q` is treated as absent.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

fn parse_positive(name: &str, raw: Option<&str>) -> Result<Option<usize>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => match v.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Some(n)),
            _ => Err(CatalogError::InvalidQuery(format!(
                "{} must be a positive integer, got '{}'",
                name, v
            ))),
        },
    }
}

// == Field Checks ==

fn as_object(body: &Value) -> Result<&Map<String, Value>> {
    body.as_object().ok_or_else(|| {
        CatalogError::Validation(vec![FieldViolation::new("body", "must be a JSON object")])
    })
}

fn required<T>(
    obj: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
    check: fn(&str, &Value, &mut Vec<FieldViolation>) -> Option<T>,
) -> Option<T> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new(field, REQUIRED));
            None
        }
        Some(v) => check(field, v, violations),
    }
}

fn string(field: &str, value: &Value, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => {
            violations.push(FieldViolation::new(field, STRING));
            None
        }
    }
}

fn non_empty_string(
    field: &str,
    value: &Value,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => {
            violations.push(FieldViolation::new(field, NON_EMPTY_STRING));
            None
        }
    }
}

fn non_negative_number(
    field: &str,
    value: &Value,
    violations: &mut Vec<FieldViolation>,
) -> Option<f64> {
    match value.as_f64() {
        Some(p) if valid_price(p) => Some(p),
        _ => {
            violations.push(FieldViolation::new(field, PRICE));
            None
        }
    }
}

fn valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violated_fields(err: CatalogError) -> Vec<String> {
        match err {
            CatalogError::Validation(v) => v.into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_draft_from_valid_body() {
        let draft = ItemDraft::from_value(&json!({
            "name": "Desk",
            "category": "Furniture",
            "price": 150,
            "description": "Oak"
        }))
        .unwrap();
        assert_eq!(draft.name, "Desk");
        assert_eq!(draft.category, "Furniture");
        assert_eq!(draft.price, 150.0);
        assert_eq!(draft.description.as_deref(), Some("Oak"));
    }

    #[test]
    fn test_draft_ignores_client_id() {
        let draft = ItemDraft::from_value(&json!({
            "id": 42, "name": "Desk", "category": "Furniture", "price": 1
        }))
        .unwrap();
        assert_eq!(draft.name, "Desk");
    }

    #[test]
    fn test_draft_reports_every_violation() {
        let err = ItemDraft::from_value(&json!({
            "category": "",
            "price": "cheap",
            "description": 5
        }))
        .unwrap_err();
        assert_eq!(
            violated_fields(err),
            vec!["name", "category", "price", "description"]
        );
    }

    #[test]
    fn test_draft_rejects_negative_price() {
        let err = ItemDraft::from_value(&json!({
            "name": "Desk", "category": "Furniture", "price": -1
        }))
        .unwrap_err();
        assert_eq!(violated_fields(err), vec!["price"]);
    }

    #[test]
    fn test_draft_rejects_non_object() {
        let err = ItemDraft::from_value(&json!([1, 2])).unwrap_err();
        assert_eq!(violated_fields(err), vec!["body"]);
    }

    #[test]
    fn test_draft_validate() {
        let draft = ItemDraft {
            name: " ".to_string(),
            category: "Furniture".to_string(),
            price: f64::NAN,
            description: None,
        };
        assert_eq!(violated_fields(draft.validate().unwrap_err()), vec!["name", "price"]);
    }

    #[test]
    fn test_patch_partial() {
        let patch = ItemPatch::from_value(&json!({ "category": "X" })).unwrap();
        assert_eq!(patch, ItemPatch::category("X"));
    }

    #[test]
    fn test_patch_null_description_clears() {
        let patch = ItemPatch::from_value(&json!({ "description": null })).unwrap();
        assert_eq!(patch.description, Some(None));
    }

    #[test]
    fn test_patch_bad_types() {
        let err = ItemPatch::from_value(&json!({
            "id": "seven", "name": 3, "price": -2
        }))
        .unwrap_err();
        assert_eq!(violated_fields(err), vec!["id", "name", "price"]);
    }

    #[test]
    fn test_list_query_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.page_and_limit(10, 100).unwrap(), (1, 10));
        assert!(query.term().is_none());
    }

    #[test]
    fn test_list_query_caps_limit() {
        let query = ListQuery {
            limit: Some("500".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(query.page_and_limit(10, 100).unwrap(), (1, 100));
    }

    #[test]
    fn test_list_query_rejects_bad_page() {
        for bad in ["0", "-1", "abc"] {
            let query = ListQuery {
                page: Some(bad.to_string()),
                ..ListQuery::default()
            };
            assert!(matches!(
                query.page_and_limit(10, 100),
                Err(CatalogError::InvalidQuery(_))
            ));
        }
    }

    #[test]
    fn test_list_query_term_is_not_trimmed() {
        let query = ListQuery {
            q: Some(" desk ".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(query.term(), Some(" desk "));

        let empty = ListQuery {
            q: Some(String::new()),
            ..ListQuery::default()
        };
        assert!(empty.term().is_none());
    }
}
