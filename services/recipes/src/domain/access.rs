//! Who may do what.
//!
//! Reads are open to everyone. Recipe writes need the author or an administrator.
//! Ingredients and tags are writable by administrators only.

use uuid::Uuid;

use crate::domain::types::Actor;
use crate::error::RecipesServiceError;

/// Any authenticated caller.
pub fn require_actor(actor: Option<Actor>) -> Result<Actor, RecipesServiceError> {
    actor.ok_or(RecipesServiceError::Unauthenticated)
}

/// An authenticated administrator.
pub fn require_admin(actor: Option<Actor>) -> Result<Actor, RecipesServiceError> {
    let actor = require_actor(actor)?;
    if !actor.is_admin {
        return Err(RecipesServiceError::Forbidden);
    }
    Ok(actor)
}

/// The recipe's author, or an administrator.
pub fn require_recipe_owner(
    actor: Option<Actor>,
    author_id: Uuid,
) -> Result<Actor, RecipesServiceError> {
    let actor = require_actor(actor)?;
    if actor.user_id != author_id && !actor.is_admin {
        return Err(RecipesServiceError::Forbidden);
    }
    Ok(actor)
}
