//! Base-coverage pages for the region and gene views.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use super::AppState;
use crate::types::{ApiPage, RegionPath};
use crate::{Error, Result, cursor};

#[derive(Debug, Deserialize)]
pub struct CoverageParams {
    pub size: u32,
    #[serde(default)]
    pub next: Option<String>,
}

pub async fn coverage(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Json(params): Json<CoverageParams>,
) -> Result<Json<ApiPage>> {
    let region: RegionPath = region.parse()?;
    if params.size == 0 {
        return Err(Error::InvalidInput(
            "size must be greater than 0".to_string(),
        ));
    }

    let url = match params.next.as_deref() {
        Some(next) => cursor::resolve(state.api.base_url(), next),
        None => state.api.endpoint(&format!(
            "/coverage?chrom={}&start={}&stop={}&limit={}",
            region.chrom, region.start, region.stop, params.size
        )),
    };

    tracing::debug!(%url, "coverage query");
    let mut page: ApiPage = state.api.get_json(&url).await?;
    cursor::rewrite_next(&mut page);
    Ok(Json(page))
}
