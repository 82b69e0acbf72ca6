//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-foodgram-user-id` + `x-foodgram-user-role` headers
//! injected by the gateway. In tests, `MockAuth` produces these headers directly
//! so no real gateway is needed.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use foodgram_auth_types::identity::{ROLE_ADMIN, ROLE_USER, USER_ID_HEADER, USER_ROLE_HEADER};

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    pub fn user() -> Self {
        Self::new(Uuid::new_v4(), ROLE_USER)
    }

    pub fn admin() -> Self {
        Self::new(Uuid::new_v4(), ROLE_ADMIN)
    }

    /// Header name/value pairs, for test clients that add headers one at a time.
    pub fn header_pairs(&self) -> [(HeaderName, HeaderValue); 2] {
        [
            (
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
            ),
            (
                HeaderName::from_static(USER_ROLE_HEADER),
                HeaderValue::from(u16::from(self.user_role)),
            ),
        ]
    }
}
