//! Caller identity, terminated upstream.
//!
//! Authentication happens at the proxy in front of this service; by the time
//! a request lands here it carries `x-actor-id` and `x-actor-role` headers.
//! Handlers that need a caller extract [`Actor`]; admin-only handlers extract
//! [`Admin`], which rejects everyone else with 403.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hostel_management_records::models::{ActorRole, Id};

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: Id,
    pub role: ActorRole,
}

impl Actor {
    pub fn ensure_can_access_student(&self, student: Id) -> Result<(), AppError> {
        if self.role == ActorRole::Admin || self.id == student {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-actor-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Id>().ok())
            .ok_or(AppError::Validation("missing or malformed x-actor-id"))?;
        let role = parts
            .headers
            .get("x-actor-role")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| ActorRole::try_from(value).ok())
            .ok_or(AppError::Validation("missing or malformed x-actor-role"))?;
        Ok(Self { id, role })
    }
}

/// An [`Actor`] that has already passed the admin check.
#[derive(Debug, Clone, Copy)]
pub struct Admin(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for Admin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let actor = Actor::from_request_parts(parts, state).await?;
        if actor.role == ActorRole::Admin {
            Ok(Self(actor))
        } else {
            Err(AppError::Forbidden)
        }
    }
}
