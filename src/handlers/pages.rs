//! Page endpoints. The browser UI is a client-side application; these
//! handlers only emit the HTML shell with the page's initial parameters,
//! plus the sign-in/consent redirects around the external identity provider.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};

use super::AppState;
use crate::auth;
use crate::error::{Error, NOT_FOUND_MESSAGE};
use crate::store::UserStore;
use crate::types::{RegionPath, VariantsType};

fn shell(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | BRAVO browser</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    ))
}

fn escape(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            other => other.to_string(),
        })
        .collect()
}

pub(super) fn not_found_page(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        shell("Not found", &format!("<p>{}</p>", escape(message))),
    )
        .into_response()
}

pub async fn home() -> Html<String> {
    shell("Home", "<div id=\"app\" data-page=\"home\"></div>")
}

pub async fn about() -> Html<String> {
    shell("About", "<div id=\"app\" data-page=\"about\"></div>")
}

pub async fn terms() -> Html<String> {
    shell("Terms of use", "<div id=\"app\" data-page=\"terms\"></div>")
}

pub async fn not_found(Path(message): Path<String>) -> Response {
    not_found_page(&message)
}

pub async fn region_page(Path((variants_type, region)): Path<(String, String)>) -> Response {
    let Ok(variants_type) = variants_type.parse::<VariantsType>() else {
        return not_found_page(NOT_FOUND_MESSAGE);
    };
    let Ok(region) = region.parse::<RegionPath>() else {
        return not_found_page(NOT_FOUND_MESSAGE);
    };
    shell(
        "Region",
        &format!(
            "<div id=\"app\" data-page=\"region\" data-variants-type=\"{}\" data-chrom=\"{}\" data-start=\"{}\" data-stop=\"{}\"></div>",
            variants_type.as_str(),
            escape(&region.chrom),
            region.start,
            region.stop
        ),
    )
    .into_response()
}

pub async fn gene_page(Path((variants_type, gene_name)): Path<(String, String)>) -> Response {
    let Ok(variants_type) = variants_type.parse::<VariantsType>() else {
        return not_found_page(NOT_FOUND_MESSAGE);
    };
    shell(
        "Gene",
        &format!(
            "<div id=\"app\" data-page=\"gene\" data-variants-type=\"{}\" data-gene-name=\"{}\"></div>",
            variants_type.as_str(),
            escape(&gene_name)
        ),
    )
    .into_response()
}

pub async fn variant_page(Path((variant_type, variant_id)): Path<(String, String)>) -> Response {
    let Ok(variant_type) = variant_type.parse::<VariantsType>() else {
        return not_found_page(NOT_FOUND_MESSAGE);
    };
    shell(
        "Variant",
        &format!(
            "<div id=\"app\" data-page=\"variant\" data-variant-type=\"{}\" data-variant-id=\"{}\"></div>",
            variant_type.as_str(),
            escape(&variant_id)
        ),
    )
    .into_response()
}

/// Hand the user to the external identity provider. 404 when sessions are
/// disabled.
pub async fn signin(State(state): State<AppState>) -> Response {
    let Some(sessions) = &state.sessions else {
        return Error::NotFound.into_response();
    };
    let Some(provider) = &sessions.provider_url else {
        return Error::NotFound.into_response();
    };
    Redirect::to(provider).into_response()
}

pub async fn logout(State(state): State<AppState>) -> Response {
    if state.sessions.is_none() {
        return Error::NotFound.into_response();
    }
    (
        [(header::SET_COOKIE, auth::clear_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

/// Record terms consent for the signed-in user and send them home.
pub async fn agree_to_terms(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(sessions) = &state.sessions else {
        return Error::NotFound.into_response();
    };
    let Some(email) = auth::session_token(&headers).and_then(|token| sessions.signer.open(&token))
    else {
        return Error::NotFound.into_response();
    };
    state.users.update_agreed_to_terms(&email, true).await;
    Redirect::to("/").into_response()
}
