//! Viewer-relative flags: favorited / in cart / subscribed.
//!
//! Anonymous viewers get `false` everywhere without touching storage. For signed-in
//! viewers each flag costs one batched lookup for the whole result set.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::repository::{FollowRepository, RecipeCollectionRepository};
use crate::domain::types::{Actor, Recipe, RecipeCollection, RecipeReadModel, User, UserProfile};
use crate::error::RecipesServiceError;

pub async fn annotate_recipes<C, F>(
    collections: &C,
    follows: &F,
    viewer: Option<Actor>,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeReadModel>, RecipesServiceError>
where
    C: RecipeCollectionRepository,
    F: FollowRepository,
{
    let Some(viewer) = viewer.filter(|_| !recipes.is_empty()) else {
        return Ok(recipes
            .into_iter()
            .map(|recipe| RecipeReadModel {
                recipe,
                author_is_subscribed: false,
                is_favorited: false,
                is_in_shopping_cart: false,
            })
            .collect());
    };

    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let author_ids = unique_ids(recipes.iter().map(|r| r.author.id));

    let favorited = collections
        .contained_ids(RecipeCollection::Favorites, viewer.user_id, &recipe_ids)
        .await?;
    let in_cart = collections
        .contained_ids(RecipeCollection::ShoppingCart, viewer.user_id, &recipe_ids)
        .await?;
    let followed = follows.followed_ids(viewer.user_id, &author_ids).await?;

    Ok(recipes
        .into_iter()
        .map(|recipe| RecipeReadModel {
            author_is_subscribed: followed.contains(&recipe.author.id),
            is_favorited: favorited.contains(&recipe.id),
            is_in_shopping_cart: in_cart.contains(&recipe.id),
            recipe,
        })
        .collect())
}

pub async fn annotate_users<F>(
    follows: &F,
    viewer: Option<Actor>,
    users: Vec<User>,
) -> Result<Vec<UserProfile>, RecipesServiceError>
where
    F: FollowRepository,
{
    let followed = match viewer {
        Some(viewer) if !users.is_empty() => {
            let ids = unique_ids(users.iter().map(|u| u.id));
            follows.followed_ids(viewer.user_id, &ids).await?
        }
        _ => HashSet::new(),
    };
    Ok(users
        .into_iter()
        .map(|user| UserProfile {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

fn unique_ids(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
