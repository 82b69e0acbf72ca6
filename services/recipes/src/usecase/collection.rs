//! Favorites and shopping cart share one add/remove flow.
//!
//! Adding twice fails with `AlreadyExists`; removing an absent entry fails with `NotFound`.

use crate::domain::access::require_actor;
use crate::domain::repository::{RecipeCollectionRepository, RecipeRepository};
use crate::domain::types::{Actor, RecipeCollection, RecipeSummary};
use crate::error::RecipesServiceError;

// ── AddToCollection ──────────────────────────────────────────────────────────

pub struct AddToCollectionUseCase<R: RecipeRepository, C: RecipeCollectionRepository> {
    pub recipes: R,
    pub collections: C,
}

impl<R: RecipeRepository, C: RecipeCollectionRepository> AddToCollectionUseCase<R, C> {
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        collection: RecipeCollection,
        recipe_id: i32,
    ) -> Result<RecipeSummary, RecipesServiceError> {
        let actor = require_actor(actor)?;
        let summary = self
            .recipes
            .find_summary(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !self
            .collections
            .add(collection, actor.user_id, recipe_id)
            .await?
        {
            return Err(RecipesServiceError::AlreadyExists);
        }
        tracing::info!(
            recipe_id,
            user_id = %actor.user_id,
            collection = ?collection,
            "recipe added to collection"
        );
        Ok(summary)
    }
}

// ── RemoveFromCollection ─────────────────────────────────────────────────────

pub struct RemoveFromCollectionUseCase<R: RecipeRepository, C: RecipeCollectionRepository> {
    pub recipes: R,
    pub collections: C,
}

impl<R: RecipeRepository, C: RecipeCollectionRepository> RemoveFromCollectionUseCase<R, C> {
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        collection: RecipeCollection,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        let actor = require_actor(actor)?;
        if self.recipes.find_summary(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self
            .collections
            .remove(collection, actor.user_id, recipe_id)
            .await?
        {
            return Err(RecipesServiceError::NotFound);
        }
        tracing::info!(
            recipe_id,
            user_id = %actor.user_id,
            collection = ?collection,
            "recipe removed from collection"
        );
        Ok(())
    }
}
