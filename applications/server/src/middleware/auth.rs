/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use musify_core::{Identity, UserId};
use std::sync::Arc;

/// Identity of the caller, required by the handler
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0.user_id
    }
}

/// Identity of a caller holding the admin claim
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

/// Middleware that resolves the bearer token, if any, into an `Identity`
///
/// Requests without an Authorization header pass through anonymously so
/// public routes keep working; a malformed or invalid token is rejected.
pub async fn identity_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .map(|h| h.to_str().ok().and_then(|h| h.strip_prefix("Bearer ")).map(str::to_owned));

    let token = match header {
        None => return Ok(next.run(request).await),
        Some(token) => {
            token.ok_or_else(|| ServerError::Auth("Malformed Authorization header".to_string()))?
        }
    };

    let identity = auth_service.resolve_identity(&token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::Auth("Invalid token".to_string())
    })?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| ServerError::Auth("Unauthorized".to_string()))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(identity) = AuthenticatedUser::from_request_parts(parts, state).await?;
        identity
            .require_admin()
            .map_err(|_| ServerError::Forbidden("Admin access required".to_string()))?;
        Ok(AdminUser(identity))
    }
}
