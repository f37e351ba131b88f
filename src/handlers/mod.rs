mod coverage;
mod feedback;
mod pages;
mod search;
mod sequence;
mod variants;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::HeaderName,
    middleware,
    response::Response,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::auth::{self, SessionConfig};
use crate::backend::ApiClient;
use crate::store::{FeedbackStore, UserStore};
use crate::{Error, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub users: Arc<dyn UserStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub sessions: Option<SessionConfig>,
}

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/not_found/{message}", get(pages::not_found))
        .route("/region/{variants_type}/{region}", get(pages::region_page))
        .route("/gene/{variants_type}/{gene_name}", get(pages::gene_page))
        .route(
            "/variant/{variant_type}/{variant_id}",
            get(pages::variant_page),
        )
        // variant detail and sequence artifacts
        .route("/variant/api/snv/{variant_id}", get(sequence::variant_detail))
        .route(
            "/variant/api/snv/cram/summary/{variant_id}",
            get(sequence::reads_summary),
        )
        .route("/variant/api/snv/cram/{artifact}", get(sequence::reads_data))
        .route("/variant/api/snv/crai/{artifact}", get(sequence::reads_index))
        .route("/qc/api", get(sequence::qc))
        // gene and coverage lookups
        .route("/genes/{region}", get(variants::genes_in_region))
        .route("/genes/api/{name}", get(variants::gene_by_name))
        .route("/coverage/{region}", post(coverage::coverage))
        // filtered/sorted variant listings
        .route(
            "/variants/{variants_type}",
            get(variants::filters_meta).post(variants::filters_meta),
        )
        .route(
            "/variants/region/{variants_type}/{region}",
            get(variants::region_variants).post(variants::region_variants),
        )
        .route(
            "/variants/region/{variants_type}/{region}/histogram",
            get(variants::region_histogram).post(variants::region_histogram),
        )
        .route(
            "/variants/region/{variants_type}/{region}/summary",
            get(variants::region_summary).post(variants::region_summary),
        )
        .route(
            "/variants/gene/{variants_type}/{gene_name}",
            get(variants::gene_variants).post(variants::gene_variants),
        )
        .route(
            "/variants/gene/{variants_type}/{gene_name}/histogram",
            get(variants::gene_histogram).post(variants::gene_histogram),
        )
        .route(
            "/variants/gene/{variants_type}/{gene_name}/summary",
            get(variants::gene_summary).post(variants::gene_summary),
        )
        .route("/feedback", post(feedback::submit))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_authorization,
        ));

    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/terms", get(pages::terms))
        .route("/signin", get(pages::signin))
        .route("/logout", get(pages::logout))
        .route("/agree_to_terms", get(pages::agree_to_terms))
        .route("/search", get(search::search))
        .route("/autocomplete", get(search::autocomplete))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Relay an upstream response, keeping the listed headers and streaming the
/// body through without buffering. Dropping the returned body cancels the
/// upstream read.
pub(crate) fn proxy_response(
    upstream: reqwest::Response,
    forward: &[HeaderName],
) -> Result<Response> {
    let mut builder = Response::builder().status(upstream.status());
    for name in forward {
        if let Some(value) = upstream.headers().get(name) {
            builder = builder.header(name.clone(), value.clone());
        }
    }
    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| Error::Internal(format!("failed to build proxied response: {e}")))
}
