use crate::domain::UserId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Contact details shown to admins next to a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// User directory port
///
/// Keeps the boundary with the account context: the lifecycle only knows
/// user IDs, plus the few fields admins see in listings.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Check that a user exists.
    ///
    /// Used to validate the requester before a booking is created.
    async fn exists(&self, user_id: UserId) -> Result<bool>;

    /// Summaries for the given users. Unknown IDs are skipped.
    async fn find_summaries(&self, user_ids: &[UserId]) -> Result<Vec<UserSummary>>;
}
