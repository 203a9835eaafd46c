use crate::domain::Identity;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Identity resolver port
///
/// Authentication itself lives outside this service; the API layer only needs
/// to turn a bearer token into an identity.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// `None` when the token is unknown or expired.
    async fn resolve(&self, token: &str) -> Result<Option<Identity>>;
}
