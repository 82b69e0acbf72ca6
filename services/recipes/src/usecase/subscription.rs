use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::access::require_actor;
use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::{Actor, AuthorWithRecipes, User, UserProfile};
use crate::error::RecipesServiceError;

/// Attach the author's recipe count and up to `recipes_limit` newest recipes.
async fn author_with_recipes<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<AuthorWithRecipes, RecipesServiceError> {
    let recipes_count = recipes.count_by_author(author.id).await?;
    let summaries = recipes
        .list_summaries_by_author(author.id, recipes_limit)
        .await?;
    Ok(AuthorWithRecipes {
        profile: UserProfile {
            user: author,
            is_subscribed: true,
        },
        recipes_count,
        recipes: summaries,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U: UserRepository, R: RecipeRepository, F: FollowRepository> {
    pub users: U,
    pub recipes: R,
    pub follows: F,
}

impl<U, R, F> SubscribeUseCase<U, R, F>
where
    U: UserRepository,
    R: RecipeRepository,
    F: FollowRepository,
{
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<AuthorWithRecipes, RecipesServiceError> {
        let actor = require_actor(actor)?;
        if actor.user_id == author_id {
            return Err(RecipesServiceError::SelfFollow);
        }
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        if !self.follows.follow(actor.user_id, author_id).await? {
            return Err(RecipesServiceError::AlreadyFollowing);
        }
        tracing::info!(follower_id = %actor.user_id, %author_id, "subscribed");
        author_with_recipes(&self.recipes, author, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> UnsubscribeUseCase<U, F> {
    /// Succeeds whether or not the subscription existed; the author must exist.
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        author_id: Uuid,
    ) -> Result<(), RecipesServiceError> {
        let actor = require_actor(actor)?;
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        if self.follows.unfollow(actor.user_id, author_id).await? {
            tracing::info!(follower_id = %actor.user_id, %author_id, "unsubscribed");
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<R: RecipeRepository, F: FollowRepository> {
    pub recipes: R,
    pub follows: F,
}

impl<R: RecipeRepository, F: FollowRepository> ListSubscriptionsUseCase<R, F> {
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<AuthorWithRecipes>, RecipesServiceError> {
        let actor = require_actor(actor)?;
        let Page { count, results } = self.follows.list_authors(actor.user_id, page).await?;
        let mut authors = Vec::with_capacity(results.len());
        for author in results {
            authors.push(author_with_recipes(&self.recipes, author, recipes_limit).await?);
        }
        Ok(Page::new(count, authors))
    }
}
