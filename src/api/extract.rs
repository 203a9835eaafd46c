use crate::application::booking::BookingApplicationError;
use crate::domain::Caller;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{error::ApiError, handlers::AppState};

/// The caller behind a request
///
/// A missing, malformed or unknown bearer token yields `Caller::Anonymous`.
/// Handlers gate the caller before path and body are validated, so an
/// anonymous request is a 401 whatever else is wrong with it.
#[derive(Debug, Clone)]
pub struct CurrentCaller(pub Caller);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(CurrentCaller(Caller::Anonymous));
        };

        let identity = state
            .identity_resolver
            .resolve(token)
            .await
            .map_err(BookingApplicationError::IdentityResolverError)?;

        match identity {
            Some(identity) => {
                tracing::debug!(
                    user_id = %identity.user_id.value(),
                    role = identity.role.as_str(),
                    "caller resolved"
                );
                Ok(CurrentCaller(Caller::from(identity)))
            }
            None => Ok(CurrentCaller(Caller::Anonymous)),
        }
    }
}

/// JSON body whose rejections are reported as validation errors
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| BookingApplicationError::Validation(rejection.body_text()))?;

        Ok(ValidJson(value))
    }
}

/// Path parameters whose rejections are reported as validation errors
#[derive(Debug)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| BookingApplicationError::Validation(rejection.body_text()))?;

        Ok(ValidPath(value))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
