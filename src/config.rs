use crate::application::booking::{ClaimStrategy, LifecyclePolicy};
use crate::domain::{Identity, Role, TransitionPolicy, UserId};
use std::env;
use std::str::FromStr;
use uuid::Uuid;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// A bearer token accepted by the static identity resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub token: String,
    pub identity: Identity,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub policy: LifecyclePolicy,
    /// Follow-up phone number returned with every new booking
    pub contact_number: String,
    pub auth_tokens: Vec<TokenGrant>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or("PORT", lookup("PORT"), 3000)?;
        let max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            5,
        )?;
        let claim_strategy = parse_or(
            "BOOKING_CLAIM_STRATEGY",
            lookup("BOOKING_CLAIM_STRATEGY"),
            ClaimStrategy::default(),
        )?;
        let transition_policy = parse_or(
            "BOOKING_TRANSITION_POLICY",
            lookup("BOOKING_TRANSITION_POLICY"),
            TransitionPolicy::default(),
        )?;
        let auth_tokens = match lookup("AUTH_TOKENS") {
            Some(raw) => parse_token_grants(&raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            port,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "postgres://localhost/pet_adoption".to_string()),
            max_connections,
            policy: LifecyclePolicy {
                claim_strategy,
                transition_policy,
            },
            contact_number: lookup("BOOKING_CONTACT_NUMBER")
                .unwrap_or_else(|| "987654321".to_string()),
            auth_tokens,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("{value:?}: {e}"),
        }),
    }
}

/// Parse `token:user-uuid:role` entries separated by commas.
fn parse_token_grants(raw: &str) -> Result<Vec<TokenGrant>, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "AUTH_TOKENS",
        reason,
    };

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let (Some(token), Some(user_id), Some(role)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(invalid(format!(
                    "expected token:user-id:role, got {entry:?}"
                )));
            };

            if token.is_empty() {
                return Err(invalid("empty token".to_string()));
            }

            let user_id = Uuid::parse_str(user_id)
                .map_err(|e| invalid(format!("bad user id {user_id:?}: {e}")))?;
            let role = Role::from_str(role).map_err(invalid)?;

            Ok(TokenGrant {
                token: token.to_string(),
                identity: Identity {
                    user_id: UserId::from_uuid(user_id),
                    role,
                },
            })
        })
        .collect()
}
