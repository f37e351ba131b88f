//! Feedback submission.

use axum::{Extension, Form, Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use crate::auth::CurrentUser;
use crate::store::FeedbackStore;

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    #[serde(rename = "page-url")]
    pub page_url: String,
    #[serde(rename = "message-text")]
    pub message_text: String,
}

pub async fn submit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<FeedbackForm>,
) -> Json<Value> {
    let user_id = user
        .map(|identity| identity.email)
        .unwrap_or_else(|| "anonymous".to_string());
    state
        .feedback
        .save(&user_id, &form.page_url, &form.message_text)
        .await;
    Json(json!({}))
}
