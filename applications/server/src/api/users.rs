/// User registration API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, Json};
use musify_core::{RegisterUser, User};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub image_url: Option<String>,
}

/// POST /api/users/register
/// Record the caller's profile; repeated calls update it
pub async fn register(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>> {
    let identity = auth.0;
    let email = req
        .email
        .or_else(|| identity.email.clone())
        .ok_or_else(|| ServerError::BadRequest("Email is required".to_string()))?;

    let user = app_state
        .users
        .register_user(RegisterUser {
            id: identity.user_id.clone(),
            email,
            image_url: req.image_url,
        })
        .await?;

    if user.is_admin == identity.is_admin {
        return Ok(Json(user));
    }

    app_state
        .users
        .set_admin(&identity.user_id, identity.is_admin)
        .await?;
    tracing::info!(user_id = %identity.user_id, admin = identity.is_admin, "Updated admin flag");

    Ok(Json(User {
        is_admin: identity.is_admin,
        ..user
    }))
}
