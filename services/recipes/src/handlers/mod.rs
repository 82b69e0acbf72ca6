use foodgram_auth_types::identity::{IdentityHeaders, OptionalIdentity};

use crate::domain::types::Actor;

pub mod collection;
pub mod ingredient;
pub mod query;
pub mod recipe;
pub mod response;
pub mod subscription;
pub mod tag;
pub mod user;

impl From<IdentityHeaders> for Actor {
    fn from(identity: IdentityHeaders) -> Self {
        Actor {
            user_id: identity.user_id,
            is_admin: identity.is_admin(),
        }
    }
}

/// The caller as use cases see it: `None` for anonymous requests.
pub fn actor(identity: OptionalIdentity) -> Option<Actor> {
    identity.0.map(Actor::from)
}
