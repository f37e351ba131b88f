use super::{Feedback, FeedbackStore, User, UserStore};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// In-memory user store. Without a whitelist every email is admitted.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    whitelist: Option<HashSet<String>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_whitelist<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: RwLock::new(HashMap::new()),
            whitelist: Some(emails.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn in_whitelist(&self, email: &str) -> bool {
        match &self.whitelist {
            Some(whitelist) => whitelist.contains(email),
            None => true,
        }
    }

    async fn load(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }

    async fn save(&self, email: &str, picture: &str) -> User {
        let user = User {
            email: email.to_string(),
            picture: picture.to_string(),
            agreed_to_terms: false,
        };
        self.users
            .write()
            .await
            .insert(email.to_string(), user.clone());
        user
    }

    async fn update_agreed_to_terms(&self, email: &str, agreed: bool) {
        if let Some(user) = self.users.write().await.get_mut(email) {
            user.agreed_to_terms = agreed;
        }
    }
}

/// In-memory feedback store.
#[derive(Default)]
pub struct MemoryFeedbackStore {
    entries: RwLock<Vec<Feedback>>,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<Feedback> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn save(&self, user_id: &str, page_url: &str, message: &str) {
        self.entries.write().await.push(Feedback {
            user_id: user_id.to_string(),
            page_url: page_url.to_string(),
            message: message.to_string(),
        });
    }
}
