//! Resolution of the calling user for favorites routes.
//!
//! There is no authentication yet: the default resolver hands every request
//! the configured user. Swap the [`UserResolver`] on [`AppState`] to plug a
//! real scheme in.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::domain::UserId;

pub trait UserResolver: Send + Sync {
    /// `None` rejects the request as unauthorized.
    fn resolve(&self, headers: &HeaderMap) -> Option<UserId>;
}

/// Every request belongs to the same user.
pub struct StaticUserResolver {
    user: UserId,
}

impl StaticUserResolver {
    #[must_use]
    pub const fn new(user: UserId) -> Self {
        Self { user }
    }
}

impl UserResolver for StaticUserResolver {
    fn resolve(&self, _headers: &HeaderMap) -> Option<UserId> {
        Some(self.user.clone())
    }
}

/// Attaches the resolved [`UserId`] to the request extensions.
pub async fn identity_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = state
        .user_resolver
        .resolve(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    tracing::Span::current().record("user_id", user.as_str());
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
