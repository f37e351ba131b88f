//! Collaborator stores for user accounts and feedback.
//!
//! The browser does not own durable storage; accounts and feedback live in
//! whatever backing service the deployment wires in. These traits are the
//! seam, with in-memory implementations for development and tests.

mod memory;

pub use memory::{MemoryFeedbackStore, MemoryUserStore};

use async_trait::async_trait;

/// A known user account.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    pub picture: String,
    pub agreed_to_terms: bool,
}

/// A submitted feedback message.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub user_id: String,
    pub page_url: String,
    pub message: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether the email is admitted at all.
    async fn in_whitelist(&self, email: &str) -> bool;

    async fn load(&self, email: &str) -> Option<User>;

    /// Create the account record; consent starts unset.
    async fn save(&self, email: &str, picture: &str) -> User;

    async fn update_agreed_to_terms(&self, email: &str, agreed: bool);
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn save(&self, user_id: &str, page_url: &str, message: &str);
}
