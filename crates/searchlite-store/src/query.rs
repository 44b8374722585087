//! Searchlite Store Query
//!
//! The store-native query form: a boolean filter tree over equality terms
//! plus an optional free-text constraint. The filter compiler lowers the
//! declarative filter/facet-filter syntax into this representation.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use crate::document::Attributes;
use serde_json::Value as JsonValue;

// =============================================================================
// Filter
// =============================================================================

/// A boolean filter condition over document attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Equality against the string rendering of an attribute value.
    /// Array attributes match if any element matches.
    Eq { field: String, value: String },
    Or(Vec<Filter>),
    And(Vec<Filter>),
}

impl Filter {
    /// Check if an attribute payload matches this filter.
    pub fn matches(&self, attributes: &Attributes) -> bool {
        match self {
            Self::Eq { field, value } => attributes
                .get(field)
                .map(|v| value_matches(v, value))
                .unwrap_or(false),
            Self::Or(filters) => filters.iter().any(|f| f.matches(attributes)),
            Self::And(filters) => filters.iter().all(|f| f.matches(attributes)),
        }
    }
}

/// Equality between an attribute value and a filter token value.
///
/// Strings compare directly; numbers and booleans compare against their
/// canonical string rendering; arrays match element-wise.
fn value_matches(value: &JsonValue, expected: &str) -> bool {
    match value {
        JsonValue::String(s) => s == expected,
        JsonValue::Bool(b) => b.to_string() == expected,
        JsonValue::Number(n) => n.to_string() == expected,
        JsonValue::Array(items) => items.iter().any(|item| value_matches(item, expected)),
        JsonValue::Null | JsonValue::Object(_) => false,
    }
}

// =============================================================================
// Search Request
// =============================================================================

/// One combined query against an index: an optional free-text term plus
/// zero or more filter conditions, all of which must match.
///
/// An empty request (no text, no filters) matches every document.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub text: Option<String>,
    pub filters: Vec<Filter>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the request carries no constraint at all.
    pub fn is_match_all(&self) -> bool {
        self.text.is_none() && self.filters.is_empty()
    }

    /// Check if an attribute payload matches this request.
    pub fn matches(&self, attributes: &Attributes) -> bool {
        if let Some(text) = &self.text {
            if !text_matches(attributes, text) {
                return false;
            }
        }
        self.filters.iter().all(|f| f.matches(attributes))
    }
}

/// Free-text matching: every lowercase whitespace token of the query must
/// appear as a substring of some string value in the attribute payload.
fn text_matches(attributes: &Attributes, text: &str) -> bool {
    let mut haystack = Vec::new();
    for value in attributes.values() {
        collect_text(value, &mut haystack);
    }
    text.split_whitespace()
        .map(str::to_lowercase)
        .all(|token| haystack.iter().any(|value| value.contains(&token)))
}

fn collect_text(value: &JsonValue, out: &mut Vec<String>) {
    match value {
        JsonValue::String(s) => out.push(s.to_lowercase()),
        JsonValue::Array(items) => {
            for item in items {
                collect_text(item, out);
            }
        }
        JsonValue::Object(map) => {
            for item in map.values() {
                collect_text(item, out);
            }
        }
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => {}
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: serde_json::Value) -> Attributes {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn eq(field: &str, value: &str) -> Filter {
        Filter::Eq {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_eq_matches_string_attribute() {
        let doc = attrs(json!({"color": "red"}));
        assert!(eq("color", "red").matches(&doc));
        assert!(!eq("color", "blue").matches(&doc));
        assert!(!eq("missing", "red").matches(&doc));
    }

    #[test]
    fn test_eq_matches_number_and_bool_renderings() {
        let doc = attrs(json!({"stock": 42, "active": true}));
        assert!(eq("stock", "42").matches(&doc));
        assert!(eq("active", "true").matches(&doc));
        assert!(!eq("stock", "43").matches(&doc));
    }

    #[test]
    fn test_eq_matches_array_elementwise() {
        let doc = attrs(json!({"tags": ["summer", "sale"]}));
        assert!(eq("tags", "sale").matches(&doc));
        assert!(!eq("tags", "winter").matches(&doc));
    }

    #[test]
    fn test_or_and_composition() {
        let doc = attrs(json!({"color": "red", "brand": "nike"}));
        let or = Filter::Or(vec![eq("color", "blue"), eq("color", "red")]);
        assert!(or.matches(&doc));

        let and = Filter::And(vec![or, eq("brand", "nike")]);
        assert!(and.matches(&doc));

        let and_miss = Filter::And(vec![eq("color", "red"), eq("brand", "adidas")]);
        assert!(!and_miss.matches(&doc));
    }

    #[test]
    fn test_empty_request_matches_everything() {
        let request = SearchRequest::new();
        assert!(request.is_match_all());
        assert!(request.matches(&attrs(json!({"anything": "at all"}))));
        assert!(request.matches(&Attributes::new()));
    }

    #[test]
    fn test_text_matching_is_case_insensitive() {
        let doc = attrs(json!({"title": "Red Running Shoes", "brand": "Nike"}));
        let request = SearchRequest {
            text: Some("running NIKE".to_string()),
            filters: Vec::new(),
        };
        assert!(request.matches(&doc));

        let miss = SearchRequest {
            text: Some("sandals".to_string()),
            filters: Vec::new(),
        };
        assert!(!miss.matches(&doc));
    }

    #[test]
    fn test_text_matching_descends_into_nested_values() {
        let doc = attrs(json!({"meta": {"keywords": ["trail", "waterproof"]}}));
        let request = SearchRequest {
            text: Some("waterproof".to_string()),
            filters: Vec::new(),
        };
        assert!(request.matches(&doc));
    }

    #[test]
    fn test_text_and_filters_compose() {
        let doc = attrs(json!({"title": "Red Shoes", "color": "red"}));
        let request = SearchRequest {
            text: Some("shoes".to_string()),
            filters: vec![eq("color", "red")],
        };
        assert!(request.matches(&doc));

        let request = SearchRequest {
            text: Some("shoes".to_string()),
            filters: vec![eq("color", "blue")],
        };
        assert!(!request.matches(&doc));
    }
}
