//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::header::HeaderMap;
use http::request::Parts;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
pub const USER_ROLE_HEADER: &str = "x-foodgram-user-role";

/// Role value the gateway assigns to regular accounts.
pub const ROLE_USER: u8 = 0;
/// Role value the gateway assigns to administrators.
pub const ROLE_ADMIN: u8 = 2;

/// User identity injected by the gateway via `x-foodgram-user-id` and `x-foodgram-user-role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl IdentityHeaders {
    pub fn is_admin(&self) -> bool {
        self.user_role >= ROLE_ADMIN
    }

    /// Read the identity from request headers.
    ///
    /// `Ok(None)` when the user-id header is absent (anonymous request).
    /// `Err(401)` when either header is present but unparseable, or the role is missing.
    pub fn from_headers(headers: &HeaderMap) -> Result<Option<Self>, StatusCode> {
        let Some(raw_id) = headers.get(USER_ID_HEADER) else {
            return Ok(None);
        };
        let user_id = raw_id
            .to_str()
            .ok()
            .and_then(|s| s.parse::<Uuid>().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let user_role = headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Some(Self { user_id, user_role }))
    }
}

/// Extractor for endpoints open to anonymous callers.
///
/// Handlers pass the inner `Option` down to use cases, which decide whether an
/// identity is required.
#[derive(Debug, Clone, Copy)]
pub struct OptionalIdentity(pub Option<IdentityHeaders>);

impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Parse synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = IdentityHeaders::from_headers(&parts.headers);
        async move { identity.map(OptionalIdentity) }
    }
}
