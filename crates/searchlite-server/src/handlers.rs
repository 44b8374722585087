//! Searchlite Request Handlers
//!
//! HTTP request handlers for the emulated search API. Each handler resolves
//! its index through the registry, compiles filter expressions, issues one
//! combined query or bulk write against the document store, and shapes the
//! result into the API-compatible response envelope.
//!
//! Key Features:
//! - Single and multi-index queries with facet aggregation
//! - Batched writes applied puts-first, deletes-second, validated up front
//! - Full-replace upserts and idempotent deletes by identifier
//! - Facet-filter-scoped delete-by-query and index clearing
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use crate::params::SearchParams;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use searchlite_common::{Result, SearchliteError};
use searchlite_store::{Attributes, DeleteOutcome, Document, IndexStore, SearchRequest};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

/// Constant task identifier echoed on every mutating response. Execution is
/// synchronous; the field only mirrors the emulated API's async-task shape.
const TASK_ID: &str = "searchlite-task-id";

/// Constant page-size echoed in multi-query envelopes.
const HITS_PER_PAGE: usize = 96;

type ApiResponse = (StatusCode, Json<JsonValue>);

fn ok(body: JsonValue) -> ApiResponse {
    (StatusCode::OK, Json(body))
}

fn created(body: JsonValue) -> ApiResponse {
    (StatusCode::CREATED, Json(body))
}

fn bad_request(message: impl ToString) -> ApiResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": message.to_string() })),
    )
}

fn not_found_object() -> ApiResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "ObjectID does not exist" })),
    )
}

/// Map an operation error onto the API taxonomy: compile errors are the
/// caller's fault, everything else is a storage failure.
fn error_response(err: SearchliteError) -> ApiResponse {
    if err.is_user_error() {
        bad_request(err)
    } else {
        tracing::error!("Storage failure: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": err.to_string() })),
        )
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Liveness
// =============================================================================

/// Liveness text.
pub async fn welcome() -> &'static str {
    "Welcome to Searchlite"
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not found" })),
    )
}

// =============================================================================
// Query Endpoints
// =============================================================================

/// Single-index query body: a querystring-encoded `params` field, or the
/// same fields given directly.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryBody {
    pub params: Option<String>,
    pub query: Option<String>,
    pub filters: Option<String>,
    pub facet_filters: Option<JsonValue>,
}

/// Search one index.
pub async fn query_index(
    State(state): State<AppState>,
    Path(index_name): Path<String>,
    Json(body): Json<QueryBody>,
) -> ApiResponse {
    let store = match state.registry.open(&index_name).await {
        Ok(store) => store,
        Err(e) => return error_response(e),
    };

    let params = match &body.params {
        Some(raw) => SearchParams::from_query_string(raw),
        None => SearchParams::from_body(body.query.clone(), body.filters.clone(), body.facet_filters.clone()),
    };
    let request = match params.search_request() {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };

    let hits: Vec<JsonValue> = store
        .query(&request)
        .await
        .iter()
        .map(Document::to_hit)
        .collect();

    ok(json!({
        "hits": hits,
        "index": index_name,
        "params": body.params.unwrap_or_default(),
        "query": params.echo_query(),
    }))
}

/// Multi-index query body.
#[derive(Debug, Deserialize)]
pub struct MultiQueryBody {
    pub requests: Vec<MultiQueryRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiQueryRequest {
    pub index_name: String,
    #[serde(default)]
    pub params: Option<String>,
}

/// Search several indexes in one round trip. Requests are resolved
/// independently and results preserve the request order.
pub async fn multi_query(
    State(state): State<AppState>,
    Json(body): Json<MultiQueryBody>,
) -> ApiResponse {
    let mut results = Vec::with_capacity(body.requests.len());

    for request in &body.requests {
        let store = match state.registry.open(&request.index_name).await {
            Ok(store) => store,
            Err(e) => return error_response(e),
        };

        let raw_params = request.params.clone().unwrap_or_default();
        let params = SearchParams::from_query_string(&raw_params);
        let search = match params.search_request() {
            Ok(search) => search,
            Err(e) => return error_response(e),
        };

        let docs = store.query(&search).await;
        let hits: Vec<JsonValue> = docs.iter().map(Document::to_hit).collect();

        // Facet histograms are computed over this index's post-filter result
        // set; fields with no distinct values are omitted entirely.
        let mut facets = serde_json::Map::new();
        for field in &params.facets {
            let counts = IndexStore::facet_counts(&docs, field);
            if !counts.is_empty() {
                facets.insert(field.clone(), json!(counts));
            }
        }

        results.push(json!({
            "hits": hits,
            "facets": facets,
            "hitsPerPage": HITS_PER_PAGE,
            "index": request.index_name,
            "nbHits": docs.len(),
            "nbPages": 1,
            "page": 0,
            "params": raw_params,
            "query": params.echo_query(),
        }));
    }

    ok(json!({ "results": results }))
}

// =============================================================================
// Object Lookup Endpoints
// =============================================================================

/// Get one object by identifier.
pub async fn get_object(
    State(state): State<AppState>,
    Path((index_name, object_id)): Path<(String, String)>,
) -> ApiResponse {
    let store = match state.registry.open(&index_name).await {
        Ok(store) => store,
        Err(e) => return error_response(e),
    };

    match store.get(&object_id).await {
        Some(doc) => ok(doc.to_hit()),
        None => not_found_object(),
    }
}

/// Multi-index object lookup body.
#[derive(Debug, Deserialize)]
pub struct ObjectsBody {
    pub requests: Vec<ObjectRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRequest {
    pub index_name: String,
    #[serde(rename = "objectID")]
    pub object_id: String,
}

/// Get several objects, possibly across indexes. Reported as not-found only
/// when none of the requested objects exist.
pub async fn get_objects(
    State(state): State<AppState>,
    Json(body): Json<ObjectsBody>,
) -> ApiResponse {
    let mut results = Vec::new();

    for request in &body.requests {
        let store = match state.registry.open(&request.index_name).await {
            Ok(store) => store,
            Err(e) => return error_response(e),
        };
        if let Some(doc) = store.get(&request.object_id).await {
            results.push(doc.to_hit());
        }
    }

    if results.is_empty() && !body.requests.is_empty() {
        return not_found_object();
    }
    ok(json!({ "results": results }))
}

// =============================================================================
// Write Endpoints
// =============================================================================

/// Create an object with a generated identifier.
pub async fn create_object(
    State(state): State<AppState>,
    Path(index_name): Path<String>,
    Json(body): Json<JsonValue>,
) -> ApiResponse {
    let attributes = match object_attributes(body) {
        Ok(attributes) => attributes,
        Err(e) => return error_response(e),
    };

    let store = match state.registry.open(&index_name).await {
        Ok(store) => store,
        Err(e) => return error_response(e),
    };

    let doc = Document::with_generated_id(attributes);
    let object_id = doc.id.clone();
    if let Err(e) = store.put(vec![doc]).await {
        return error_response(e);
    }

    created(json!({
        "createdAt": now_iso(),
        "taskID": TASK_ID,
        "objectID": object_id,
    }))
}

/// Full-replace upsert by identifier: any existing document is removed
/// first (a miss is fine), then the new attributes are inserted fresh.
pub async fn save_object(
    State(state): State<AppState>,
    Path((index_name, object_id)): Path<(String, String)>,
    Json(body): Json<JsonValue>,
) -> ApiResponse {
    let attributes = match object_attributes(body) {
        Ok(attributes) => attributes,
        Err(e) => return error_response(e),
    };

    let store = match state.registry.open(&index_name).await {
        Ok(store) => store,
        Err(e) => return error_response(e),
    };

    match store.delete(std::slice::from_ref(&object_id)).await {
        Ok(outcomes) => {
            if outcomes.contains(&DeleteOutcome::NotFound) {
                tracing::debug!("Replacing absent object '{}': fresh insert", object_id);
            }
        }
        Err(e) => return error_response(e),
    }

    if let Err(e) = store
        .put(vec![Document::new(object_id.clone(), attributes)])
        .await
    {
        return error_response(e);
    }

    created(json!({
        "updatedAt": now_iso(),
        "taskID": TASK_ID,
        "objectID": object_id,
    }))
}

/// Delete one object by identifier. Deleting an absent identifier is a
/// successful no-op.
pub async fn delete_object(
    State(state): State<AppState>,
    Path((index_name, object_id)): Path<(String, String)>,
) -> ApiResponse {
    let store = match state.registry.open(&index_name).await {
        Ok(store) => store,
        Err(e) => return error_response(e),
    };

    match store.delete(std::slice::from_ref(&object_id)).await {
        Ok(_) => ok(json!({
            "deletedAt": now_iso(),
            "taskID": TASK_ID,
            "objectID": object_id,
        })),
        Err(e) => error_response(e),
    }
}

// =============================================================================
// Batch Endpoint
// =============================================================================

/// Batch write body.
#[derive(Debug, Deserialize)]
pub struct BatchBody {
    pub requests: Vec<BatchRequest>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub action: String,
    #[serde(default)]
    pub body: JsonValue,
}

/// One validated batch operation.
#[derive(Debug)]
enum BatchAction {
    Put {
        id: Option<String>,
        attributes: Attributes,
        only_existing: bool,
    },
    Delete {
        id: String,
    },
}

/// Translate and validate a whole batch before anything is written. Any
/// unsupported action or malformed entry rejects the batch atomically.
fn plan_batch(requests: Vec<BatchRequest>) -> Result<Vec<BatchAction>> {
    requests
        .into_iter()
        .map(|request| {
            let mut attributes = object_attributes(request.body)?;
            let object_id = take_object_id(&mut attributes);

            match request.action.as_str() {
                "addObject" => Ok(BatchAction::Put {
                    id: object_id,
                    attributes,
                    only_existing: false,
                }),
                "updateObject" => {
                    let id = object_id.ok_or_else(|| {
                        SearchliteError::Parse("updateObject requires an objectID".to_string())
                    })?;
                    Ok(BatchAction::Put {
                        id: Some(id),
                        attributes,
                        only_existing: false,
                    })
                }
                "partialUpdateObjectNoCreate" => {
                    let id = object_id.ok_or_else(|| {
                        SearchliteError::Parse(
                            "partialUpdateObjectNoCreate requires an objectID".to_string(),
                        )
                    })?;
                    Ok(BatchAction::Put {
                        id: Some(id),
                        attributes,
                        only_existing: true,
                    })
                }
                "deleteObject" => {
                    let id = object_id.ok_or_else(|| {
                        SearchliteError::Parse("deleteObject requires an objectID".to_string())
                    })?;
                    Ok(BatchAction::Delete { id })
                }
                other => Err(SearchliteError::Parse(format!(
                    "unsupported batch action: {}",
                    other
                ))),
            }
        })
        .collect()
}

/// Apply a batch of write actions: all puts as one bulk write, then all
/// deletes as one bulk delete.
pub async fn batch_write(
    State(state): State<AppState>,
    Path(index_name): Path<String>,
    Json(body): Json<BatchBody>,
) -> ApiResponse {
    // Validation precedes execution: a batch with any unsupported action is
    // rejected before a single write is issued.
    let actions = match plan_batch(body.requests) {
        Ok(actions) => actions,
        Err(e) => return error_response(e),
    };

    let store = match state.registry.open(&index_name).await {
        Ok(store) => store,
        Err(e) => return error_response(e),
    };

    let mut puts = Vec::new();
    let mut put_ids = Vec::new();
    let mut delete_ids = Vec::new();

    for action in actions {
        match action {
            BatchAction::Put {
                id,
                attributes,
                only_existing,
            } => {
                let doc = match id {
                    Some(id) => Document::new(id, attributes),
                    None => Document::with_generated_id(attributes),
                };
                if only_existing && !store.contains(&doc.id).await {
                    tracing::debug!("Skipping update of absent object '{}'", doc.id);
                    continue;
                }
                put_ids.push(doc.id.clone());
                puts.push(doc);
            }
            BatchAction::Delete { id } => delete_ids.push(id),
        }
    }

    if !puts.is_empty() {
        if let Err(e) = store.put(puts).await {
            return error_response(e);
        }
    }
    if !delete_ids.is_empty() {
        if let Err(e) = store.delete(&delete_ids).await {
            return error_response(e);
        }
    }

    let object_ids: Vec<String> = put_ids.into_iter().chain(delete_ids).collect();
    created(json!({ "objectIDs": object_ids }))
}

// =============================================================================
// Delete-by-Query Endpoint
// =============================================================================

/// Delete-by-query body: a querystring-encoded `params` field.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DeleteByQueryBody {
    pub params: Option<String>,
}

/// Delete every document matching the request's facet filters. A request
/// without facet filters is rejected before the store is touched.
pub async fn delete_by_query(
    State(state): State<AppState>,
    Path(index_name): Path<String>,
    Json(body): Json<DeleteByQueryBody>,
) -> ApiResponse {
    let params = SearchParams::from_query_string(body.params.as_deref().unwrap_or_default());

    let filter = match &params.facet_filters {
        Some(value) => match searchlite_query::facet_filters_expr(value) {
            Ok(Some(expr)) => expr.to_filter(),
            Ok(None) => return missing_facet_filters(),
            Err(e) => return error_response(e),
        },
        None => return missing_facet_filters(),
    };

    let store = match state.registry.open(&index_name).await {
        Ok(store) => store,
        Err(e) => return error_response(e),
    };

    let request = SearchRequest {
        text: None,
        filters: vec![filter],
    };
    let ids: Vec<String> = store
        .query(&request)
        .await
        .into_iter()
        .map(|doc| doc.id)
        .collect();

    if let Err(e) = store.delete(&ids).await {
        return error_response(e);
    }
    tracing::debug!("deleteByQuery removed {} document(s) from '{}'", ids.len(), index_name);

    created(json!({
        "updatedAt": now_iso(),
        "taskID": TASK_ID,
    }))
}

fn missing_facet_filters() -> ApiResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": "deleteByQuery only supports facetFilters conditions",
            "status": 400,
        })),
    )
}

// =============================================================================
// Clear Endpoint
// =============================================================================

/// Remove every document from an existing index, keeping the index itself.
/// Existence is checked against the on-disk directory, not by opening a
/// handle.
pub async fn clear_index(
    State(state): State<AppState>,
    Path(index_name): Path<String>,
) -> ApiResponse {
    if !state.registry.exists(&index_name) {
        return bad_request(format!("index '{}' does not exist", index_name));
    }

    let store = match state.registry.open(&index_name).await {
        Ok(store) => store,
        Err(e) => return error_response(e),
    };

    match store.flush().await {
        Ok(()) => ok(json!({ "taskID": TASK_ID })),
        Err(e) => error_response(e),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Request bodies carrying document attributes must be JSON objects.
fn object_attributes(value: JsonValue) -> Result<Attributes> {
    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(SearchliteError::Parse(format!(
            "expected a JSON object body, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Remove the caller-visible identifier from an attribute payload so it is
/// never duplicated inside the stored attributes.
fn take_object_id(attributes: &mut Attributes) -> Option<String> {
    match attributes.remove("objectID") {
        Some(JsonValue::String(id)) => Some(id),
        Some(other) => Some(other.to_string()),
        None => None,
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

// =============================================================================
// Tests
// =============================================================================
