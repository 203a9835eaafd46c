use crate::domain::UserId;
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait, UserSummary};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock implementation of UserDirectory
///
/// Supports stateful testing by storing registered users.
pub struct UserDirectory {
    users: Mutex<HashMap<UserId, UserSummary>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Register a user for testing purposes
    pub fn add_user(&self, user: UserSummary) -> Result<()> {
        self.users
            .lock()
            .map_err(|_| "user directory lock poisoned")?
            .insert(user.user_id, user);
        Ok(())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool> {
        let users = self.users.lock().map_err(|_| "user directory lock poisoned")?;
        Ok(users.contains_key(&user_id))
    }

    async fn find_summaries(&self, user_ids: &[UserId]) -> Result<Vec<UserSummary>> {
        let users = self.users.lock().map_err(|_| "user directory lock poisoned")?;
        Ok(user_ids
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect())
    }
}
