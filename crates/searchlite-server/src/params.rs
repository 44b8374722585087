//! Searchlite Search Parameters
//!
//! Decodes the search parameters a request may carry either as a
//! querystring-encoded `params` field or as direct JSON body fields, and
//! compiles them into one store search request.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use searchlite_common::Result;
use searchlite_query::{facet_filters_expr, parse_filters};
use searchlite_store::SearchRequest;
use serde_json::Value as JsonValue;

// =============================================================================
// Search Parameters
// =============================================================================

/// Decoded search parameters for one index request.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub filters: Option<String>,
    pub facet_filters: Option<JsonValue>,
    pub facets: Vec<String>,
}

impl SearchParams {
    /// Decode a querystring-encoded `params` value
    /// (`query=shoe&filters=color:red&facets=["brand"]`).
    pub fn from_query_string(raw: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "query" => params.query = Some(value.into_owned()),
                "filters" if !value.is_empty() => params.filters = Some(value.into_owned()),
                "facetFilters" if !value.is_empty() => {
                    // The facet filter value is usually JSON; fall back to the
                    // raw string form when it is not.
                    params.facet_filters = Some(
                        serde_json::from_str(&value)
                            .unwrap_or_else(|_| JsonValue::String(value.into_owned())),
                    );
                }
                "facets" if !value.is_empty() => params.facets = parse_facet_fields(&value),
                _ => {}
            }
        }
        params
    }

    /// Decode direct JSON body fields (`{query, filters, facetFilters}`).
    pub fn from_body(
        query: Option<String>,
        filters: Option<String>,
        facet_filters: Option<JsonValue>,
    ) -> Self {
        Self {
            query,
            filters: filters.filter(|f| !f.is_empty()),
            facet_filters,
            facets: Vec::new(),
        }
    }

    /// Compile into the store's search request: filters and facet filters
    /// compile independently and compose as ANDed top-level terms. Empty
    /// parameters contribute nothing, so an empty request matches all
    /// documents.
    pub fn search_request(&self) -> Result<SearchRequest> {
        let mut filters = Vec::new();

        if let Some(raw) = &self.filters {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                filters.push(parse_filters(trimmed)?.to_filter());
            }
        }

        if let Some(value) = &self.facet_filters {
            if let Some(expr) = facet_filters_expr(value)? {
                filters.push(expr.to_filter());
            }
        }

        let text = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Ok(SearchRequest { text, filters })
    }

    /// The `query` string to echo back in response envelopes.
    pub fn echo_query(&self) -> String {
        self.query.clone().unwrap_or_default()
    }
}

/// The `facets` parameter arrives as a JSON array of field names or as a
/// comma-separated list.
fn parse_facet_fields(raw: &str) -> Vec<String> {
    if let Ok(JsonValue::Array(entries)) = serde_json::from_str::<JsonValue>(raw) {
        return entries
            .into_iter()
            .filter_map(|v| match v {
                JsonValue::String(s) => Some(s),
                _ => None,
            })
            .collect();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "*")
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
