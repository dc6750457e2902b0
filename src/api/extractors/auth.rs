use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use crate::domain::models::actor::Actor;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

/// The caller's identity, resolved once per request through the external
/// identity collaborator. Handlers receive the `Actor` as a plain value;
/// nothing downstream re-reads credentials.
pub struct AuthActor(pub Actor);

impl<S> FromRequestParts<S> for AuthActor
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let actor = app_state
            .identity_service
            .resolve(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Span::current().record("actor_id", actor.id.as_str());

        Ok(AuthActor(actor))
    }
}
