//! Request guards
//!
//! Identity is asserted by an upstream auth provider through the `x-user-id`
//! header. The guard only checks that the id names a registered user.

use actix_web::{web, Error, FromRequest, HttpRequest};
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The registered user a request acts on behalf of
#[derive(Debug, Clone, Copy)]
pub struct ActingUser {
    pub id: Uuid,
}

impl FromRequest for ActingUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok());
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let user_id = user_id.ok_or(ServiceError::Unauthorized)?;
            let state = state.ok_or_else(|| {
                ServiceError::Internal("application state is not configured".to_string())
            })?;

            if !state.directory.exists(user_id).await {
                tracing::debug!(user_id = %user_id, "unknown acting user");
                return Err(ServiceError::Unauthorized.into());
            }
            Ok(ActingUser { id: user_id })
        })
    }
}
