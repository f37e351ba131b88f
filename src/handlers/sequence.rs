//! Variant detail, QC and sequence-artifact endpoints.
//!
//! Variant detail, read summaries and QC are relayed as opaque payloads with
//! gzip passthrough. The CRAM/CRAI artifacts are range-proxied: the client's
//! `Range` header goes upstream verbatim and the partial response streams
//! back chunk-by-chunk, preserving status and range headers, so a client
//! disconnect aborts the upstream read instead of buffering the file.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::Response,
};

use super::AppState;
use crate::backend::encode;
use crate::types::SequencePath;
use crate::{Error, Result};

pub async fn variant_detail(
    State(state): State<AppState>,
    Path(variant_id): Path<String>,
) -> Result<Response> {
    let upstream = state
        .api
        .fetch_content(&format!("/snv?variant_id={}&full=1", encode(&variant_id)))
        .await?;
    super::proxy_response(
        upstream,
        &[
            header::CONTENT_TYPE,
            header::CONTENT_ENCODING,
            header::CONTENT_LENGTH,
        ],
    )
}

/// Per-sample read-set summary for a variant.
pub async fn reads_summary(
    State(state): State<AppState>,
    Path(variant_id): Path<String>,
) -> Result<Response> {
    let upstream = state
        .api
        .fetch_content(&format!("/sequence/summary?variant_id={}", encode(&variant_id)))
        .await?;
    super::proxy_response(
        upstream,
        &[
            header::CONTENT_TYPE,
            header::CONTENT_ENCODING,
            header::CONTENT_LENGTH,
        ],
    )
}

/// Range-proxy one sample's reads. The upstream status is proxied as-is.
pub async fn reads_data(
    State(state): State<AppState>,
    Path(artifact): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let artifact: SequencePath = artifact.parse()?;
    let range = headers
        .get(header::RANGE)
        .cloned()
        .ok_or_else(|| Error::InvalidInput("missing Range header".to_string()))?;

    let upstream = state
        .api
        .fetch_range(
            &format!(
                "/sequence?variant_id={}&sample_no={}&heterozygous={}&index=0",
                encode(&artifact.variant_id),
                artifact.sample_no,
                artifact.heterozygous
            ),
            Some(range),
        )
        .await?;
    super::proxy_response(
        upstream,
        &[
            header::CONTENT_TYPE,
            header::CONTENT_RANGE,
            header::CONTENT_LENGTH,
        ],
    )
}

/// The index companion of [`reads_data`]; fetched whole, no Range header.
pub async fn reads_index(
    State(state): State<AppState>,
    Path(artifact): Path<String>,
) -> Result<Response> {
    let artifact: SequencePath = artifact.parse()?;
    let upstream = state
        .api
        .fetch_range(
            &format!(
                "/sequence?variant_id={}&sample_no={}&heterozygous={}&index=1",
                encode(&artifact.variant_id),
                artifact.sample_no,
                artifact.heterozygous
            ),
            None,
        )
        .await?;
    super::proxy_response(upstream, &[header::CONTENT_TYPE, header::CONTENT_LENGTH])
}

pub async fn qc(State(state): State<AppState>) -> Result<Response> {
    let upstream = state.api.fetch_content("/qc").await?;
    super::proxy_response(
        upstream,
        &[
            header::CONTENT_TYPE,
            header::CONTENT_ENCODING,
            header::CONTENT_LENGTH,
        ],
    )
}
