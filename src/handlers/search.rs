//! Search and autocomplete endpoints.

use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{Error, NOT_FOUND_SEGMENT, Result};
use crate::search::SearchOutcome;
use crate::types::Suggestion;

#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    #[serde(default)]
    pub value: Option<String>,
    // set when the user picked a suggestion instead of typing free text
    #[serde(default)]
    pub chrom: Option<String>,
    #[serde(default)]
    pub pos: Option<u64>,
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub stop: Option<u64>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(args): Query<SearchArgs>,
) -> Result<Redirect> {
    let value = args
        .value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::InvalidInput("value must be a non-empty string".to_string()))?;

    let outcome = if args.chrom.is_some() && args.start.is_some() && args.stop.is_some() {
        // a gene suggestion: value is the gene name, already resolved
        SearchOutcome::Gene {
            gene_name: value.to_string(),
        }
    } else if let (Some(chrom), Some(pos), Some(reference), Some(alt)) = (
        args.chrom.as_deref(),
        args.pos,
        args.reference.as_deref(),
        args.alt.as_deref(),
    ) {
        // a variant suggestion: the id follows from its coordinates
        SearchOutcome::Variant {
            variant_id: format!("{chrom}-{pos}-{reference}-{alt}"),
        }
    } else {
        crate::search::classify(&state.api, value).await
    };

    Ok(redirect_for(&outcome))
}

fn redirect_for(outcome: &SearchOutcome) -> Redirect {
    match outcome {
        SearchOutcome::Region { chrom, start, stop } => {
            Redirect::to(&format!("/region/snv/{chrom}-{start}-{stop}"))
        }
        SearchOutcome::Variant { variant_id } => {
            Redirect::to(&format!("/variant/snv/{variant_id}"))
        }
        SearchOutcome::Gene { gene_name } => Redirect::to(&format!("/gene/snv/{gene_name}")),
        SearchOutcome::NotFound => Redirect::to(&format!("/not_found/{NOT_FOUND_SEGMENT}")),
    }
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteArgs {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

pub async fn autocomplete(
    State(state): State<AppState>,
    Query(args): Query<AutocompleteArgs>,
) -> Json<SuggestionsResponse> {
    let suggestions = crate::search::autocomplete(&state.api, &args.query).await;
    Json(SuggestionsResponse { suggestions })
}
