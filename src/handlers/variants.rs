//! Filtered/sorted variant listings, histograms and summaries.
//!
//! These endpoints translate the table widget's JSON payload into the data
//! API's query grammar (see [`crate::query`]) and rewrite pagination cursors
//! on the way back (see [`crate::cursor`]). A payload-supplied cursor wins
//! over every other parameter and is dereferenced directly.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::Response,
};
use serde_json::Value;

use super::AppState;
use crate::backend::encode;
use crate::query::{self, ListingParams};
use crate::types::{ApiPage, RegionPath, VariantsType};
use crate::{Result, cursor};

pub async fn region_variants(
    State(state): State<AppState>,
    Path((variants_type, region)): Path<(String, String)>,
    params: Option<Json<ListingParams>>,
) -> Result<Json<ApiPage>> {
    let variants_type: VariantsType = variants_type.parse()?;
    let region: RegionPath = region.parse()?;
    let params = params.map(|Json(p)| p).unwrap_or_default();

    let url = match params.next.as_deref() {
        Some(next) => cursor::resolve(state.api.base_url(), next),
        None => {
            let mut args = Vec::new();
            if let Some(size) = params.size {
                args.push(format!("limit={size}"));
            }
            args.extend(query::filter_args(&params.filters));
            if let Some(sort) = query::sort_arg(&params.sorters) {
                args.push(sort);
            }
            with_args(
                state.api.endpoint(&format!(
                    "/region/{}?chrom={}&start={}&stop={}",
                    variants_type.as_str(),
                    region.chrom,
                    region.start,
                    region.stop
                )),
                args,
            )
        }
    };

    tracing::debug!(%url, "region variants query");
    let mut page: ApiPage = state.api.get_json(&url).await?;
    cursor::rewrite_next(&mut page);
    Ok(Json(page))
}

pub async fn gene_variants(
    State(state): State<AppState>,
    Path((variants_type, gene_name)): Path<(String, String)>,
    params: Option<Json<ListingParams>>,
) -> Result<Json<ApiPage>> {
    let variants_type: VariantsType = variants_type.parse()?;
    let params = params.map(|Json(p)| p).unwrap_or_default();

    let url = match params.next.as_deref() {
        Some(next) => cursor::resolve(state.api.base_url(), next),
        None => {
            let mut args = Vec::new();
            if let Some(size) = params.size {
                args.push(format!("limit={size}"));
            }
            if let Some(introns) = params.introns {
                args.push(format!("introns={introns}"));
            }
            args.extend(query::filter_args(&params.filters));
            if let Some(sort) = query::sort_arg(&params.sorters) {
                args.push(sort);
            }
            with_args(
                state.api.endpoint(&format!(
                    "/gene/{}?name={}",
                    variants_type.as_str(),
                    encode(&gene_name)
                )),
                args,
            )
        }
    };

    tracing::debug!(%url, "gene variants query");
    let mut page: ApiPage = state.api.get_json(&url).await?;
    cursor::rewrite_next(&mut page);
    Ok(Json(page))
}

pub async fn region_histogram(
    State(state): State<AppState>,
    Path((variants_type, region)): Path<(String, String)>,
    params: Option<Json<ListingParams>>,
) -> Result<Json<Value>> {
    let variants_type: VariantsType = variants_type.parse()?;
    let region: RegionPath = region.parse()?;
    let params = params.map(|Json(p)| p).unwrap_or_default();

    let mut args = query::filter_args(&params.filters);
    if let Some(windows) = params.windows {
        args.push(format!("windows={windows}"));
    }
    let url = with_args(
        state.api.endpoint(&format!(
            "/region/{}/histogram?chrom={}&start={}&stop={}",
            variants_type.as_str(),
            region.chrom,
            region.start,
            region.stop
        )),
        args,
    );

    tracing::debug!(%url, "region histogram query");
    Ok(Json(state.api.get_json(&url).await?))
}

pub async fn region_summary(
    State(state): State<AppState>,
    Path((variants_type, region)): Path<(String, String)>,
    params: Option<Json<ListingParams>>,
) -> Result<Json<Value>> {
    let variants_type: VariantsType = variants_type.parse()?;
    let region: RegionPath = region.parse()?;
    let params = params.map(|Json(p)| p).unwrap_or_default();

    let url = with_args(
        state.api.endpoint(&format!(
            "/region/{}/summary?chrom={}&start={}&stop={}",
            variants_type.as_str(),
            region.chrom,
            region.start,
            region.stop
        )),
        query::filter_args(&params.filters),
    );

    Ok(Json(state.api.get_json(&url).await?))
}

pub async fn gene_histogram(
    State(state): State<AppState>,
    Path((variants_type, gene_name)): Path<(String, String)>,
    params: Option<Json<ListingParams>>,
) -> Result<Json<Value>> {
    let variants_type: VariantsType = variants_type.parse()?;
    let params = params.map(|Json(p)| p).unwrap_or_default();

    let mut args = query::filter_args(&params.filters);
    if let Some(windows) = params.windows {
        args.push(format!("windows={windows}"));
    }
    if let Some(introns) = params.introns {
        args.push(format!("introns={introns}"));
    }
    let url = with_args(
        state.api.endpoint(&format!(
            "/gene/{}/histogram?name={}",
            variants_type.as_str(),
            encode(&gene_name)
        )),
        args,
    );

    tracing::debug!(%url, "gene histogram query");
    Ok(Json(state.api.get_json(&url).await?))
}

pub async fn gene_summary(
    State(state): State<AppState>,
    Path((variants_type, gene_name)): Path<(String, String)>,
    params: Option<Json<ListingParams>>,
) -> Result<Json<Value>> {
    let variants_type: VariantsType = variants_type.parse()?;
    let params = params.map(|Json(p)| p).unwrap_or_default();

    let mut args = query::filter_args(&params.filters);
    if let Some(introns) = params.introns {
        args.push(format!("introns={introns}"));
    }
    let url = with_args(
        state.api.endpoint(&format!(
            "/gene/{}/summary?name={}",
            variants_type.as_str(),
            encode(&gene_name)
        )),
        args,
    );

    Ok(Json(state.api.get_json(&url).await?))
}

/// Column/filter metadata for the listing tables.
pub async fn filters_meta(
    State(state): State<AppState>,
    Path(variants_type): Path<String>,
) -> Result<Json<Value>> {
    let variants_type: VariantsType = variants_type.parse()?;
    let url = state
        .api
        .endpoint(&format!("/{}/filters", variants_type.as_str()));
    Ok(Json(state.api.get_json(&url).await?))
}

/// Full gene records overlapping a region, relayed untouched.
pub async fn genes_in_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Response> {
    let region: RegionPath = region.parse()?;
    let upstream = state
        .api
        .fetch_content(&format!(
            "/genes?chrom={}&start={}&stop={}&full=1",
            region.chrom, region.start, region.stop
        ))
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

/// Full record for a single gene, relayed untouched.
pub async fn gene_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response> {
    let upstream = state
        .api
        .fetch_content(&format!("/genes?name={}&full=1", encode(&name)))
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

fn with_args(mut url: String, args: Vec<String>) -> String {
    if !args.is_empty() {
        url.push('&');
        url.push_str(&args.join("&"));
    }
    url
}
