//! Searchlite Facet Filters
//!
//! Normalizes the facet-filter request value into the compiled expression
//! tree. The value arrives as a JSON string, a string-encoded array
//! (`[a,b]` textual form), or a nested array whose inner arrays denote OR
//! groups; top-level entries are combined with AND.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use crate::ast::{FilterExpr, FilterToken};
use crate::parser::parse_token;
use searchlite_common::{Result, SearchliteError};
use serde_json::Value as JsonValue;

/// Compile a facet-filter value into an expression tree. Empty input
/// contributes nothing and yields `None`.
pub fn facet_filters_expr(value: &JsonValue) -> Result<Option<FilterExpr>> {
    let groups = match value {
        JsonValue::Null => Vec::new(),
        JsonValue::String(s) => string_groups(s)?,
        JsonValue::Array(entries) => array_groups(entries)?,
        _ => {
            return Err(SearchliteError::Parse(
                "facetFilters must be a string or an array".to_string(),
            ))
        }
    };

    Ok(match groups.len() {
        0 => None,
        1 => {
            // Safe to use expect here: we verified groups.len() == 1 above
            Some(
                groups
                    .into_iter()
                    .next()
                    .expect("groups verified to have exactly 1 element"),
            )
        }
        _ => Some(FilterExpr::AndList(groups)),
    })
}

/// A string facet filter: either a JSON-encoded array, the bracketed
/// `[a,b]` textual form, or a bare token.
fn string_groups(raw: &str) -> Result<Vec<FilterExpr>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(parsed) = serde_json::from_str::<JsonValue>(trimmed) {
        if let JsonValue::Array(entries) = parsed {
            return array_groups(&entries);
        }
    }

    if trimmed.starts_with('[') {
        let stripped = trimmed.replace(['[', ']', '"', '\''], "");
        return stripped
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Ok(FilterExpr::OrGroup(vec![parse_token(part)?])))
            .collect();
    }

    Ok(vec![FilterExpr::OrGroup(vec![parse_token(trimmed)?])])
}

/// An array facet filter: string entries are singleton groups, inner arrays
/// are OR groups of alternatives.
fn array_groups(entries: &[JsonValue]) -> Result<Vec<FilterExpr>> {
    entries
        .iter()
        .map(|entry| match entry {
            JsonValue::String(s) => Ok(FilterExpr::OrGroup(vec![parse_token(s)?])),
            JsonValue::Array(alternatives) => {
                let tokens = alternatives
                    .iter()
                    .map(|alt| match alt {
                        JsonValue::String(s) => parse_token(s),
                        _ => Err(SearchliteError::Parse(
                            "facetFilters alternatives must be strings".to_string(),
                        )),
                    })
                    .collect::<Result<Vec<FilterToken>>>()?;
                Ok(FilterExpr::OrGroup(tokens))
            }
            _ => Err(SearchliteError::Parse(
                "facetFilters entries must be strings or arrays".to_string(),
            )),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
