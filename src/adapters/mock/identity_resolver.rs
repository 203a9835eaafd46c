use crate::domain::Identity;
use crate::ports::identity_resolver::{IdentityResolver as IdentityResolverTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Static token table
///
/// Stands in for the external authentication service: tokens are issued
/// elsewhere and configured here (see `AUTH_TOKENS`).
pub struct IdentityResolver {
    tokens: HashMap<String, Identity>,
}

impl IdentityResolver {
    pub fn new(tokens: impl IntoIterator<Item = (String, Identity)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

#[async_trait]
impl IdentityResolverTrait for IdentityResolver {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>> {
        Ok(self.tokens.get(token).copied())
    }
}
