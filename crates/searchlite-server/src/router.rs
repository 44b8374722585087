//! Searchlite Router
//!
//! HTTP router configuration with the middleware stack. Defines the
//! API-compatible routes and applies CORS and request tracing.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// =============================================================================
// Router
// =============================================================================

/// Create the main application router.
///
/// The multi-index endpoints are addressed with a literal `*` index segment
/// by clients; the path parameter absorbs it.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::welcome))
        .route("/1/indexes/:index_name", post(handlers::create_object))
        .route("/1/indexes/:index_name/query", post(handlers::query_index))
        .route("/1/indexes/:index_name/queries", post(handlers::multi_query))
        .route("/1/indexes/:index_name/objects", post(handlers::get_objects))
        .route("/1/indexes/:index_name/batch", post(handlers::batch_write))
        .route(
            "/1/indexes/:index_name/deleteByQuery",
            post(handlers::delete_by_query),
        )
        .route("/1/indexes/:index_name/clear", post(handlers::clear_index))
        .route(
            "/1/indexes/:index_name/:object_id",
            get(handlers::get_object)
                .put(handlers::save_object)
                .delete(handlers::delete_object),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
