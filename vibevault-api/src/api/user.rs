//! Request user scoping
//!
//! Session handling belongs to the external auth provider, which forwards the
//! authenticated user id in `X-User-Id`. Requests without the header act as
//! the anonymous user.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use vibevault_common::{Error, UserId};

use crate::error::ApiError;

pub const USER_HEADER: &str = "x-user-id";

/// User owning the collection a request operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_HEADER) else {
            return Ok(CurrentUser(UserId::anonymous()));
        };

        let id = value
            .to_str()
            .map_err(|_| Error::Auth(format!("{} is not valid UTF-8", USER_HEADER)))?
            .trim();
        if id.is_empty() {
            return Err(Error::Auth(format!("{} is empty", USER_HEADER)).into());
        }

        Ok(CurrentUser(UserId::new(id)))
    }
}
