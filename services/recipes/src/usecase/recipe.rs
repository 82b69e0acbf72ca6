use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::access::{require_actor, require_recipe_owner};
use crate::domain::repository::{
    FollowRepository, IngredientRepository, RecipeCollectionRepository, RecipeRepository,
    TagRepository,
};
use crate::domain::types::{
    Actor, RecipeFilter, RecipeReadModel, RecipeWriteModel, ValidatedRecipe,
};
use crate::domain::validation::{normalize_name, validate_recipe};
use crate::error::RecipesServiceError;
use crate::usecase::viewer::annotate_recipes;

/// Look up which of the referenced ingredient and tag ids exist, then validate.
async fn validate_against_storage<I: IngredientRepository, T: TagRepository>(
    ingredients: &I,
    tags: &T,
    input: RecipeWriteModel,
) -> Result<ValidatedRecipe, RecipesServiceError> {
    let ingredient_ids: Vec<i32> = input.ingredients.iter().map(|i| i.id).collect();
    let known_ingredients = if ingredient_ids.is_empty() {
        Default::default()
    } else {
        ingredients.existing_ids(&ingredient_ids).await?
    };
    let known_tags = if input.tags.is_empty() {
        Default::default()
    } else {
        tags.existing_ids(&input.tags).await?
    };
    validate_recipe(input, &known_ingredients, &known_tags)
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    pub recipes: R,
    pub ingredients: I,
    pub tags: T,
}

impl<R, I, T> CreateRecipeUseCase<R, I, T>
where
    R: RecipeRepository,
    I: IngredientRepository,
    T: TagRepository,
{
    /// A new recipe is in nobody's favorites or cart and its author cannot follow
    /// themselves, so every viewer flag is `false`.
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        input: RecipeWriteModel,
    ) -> Result<RecipeReadModel, RecipesServiceError> {
        let actor = require_actor(actor)?;
        let name = normalize_name(&input.name)?;
        if self
            .recipes
            .exists_by_author_and_name(actor.user_id, &name)
            .await?
        {
            return Err(RecipesServiceError::DuplicateName);
        }
        let validated = validate_against_storage(&self.ingredients, &self.tags, input).await?;

        let id = self.recipes.create(actor.user_id, &validated).await?;
        tracing::info!(recipe_id = id, author_id = %actor.user_id, "recipe created");

        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        Ok(RecipeReadModel {
            recipe,
            author_is_subscribed: false,
            is_favorited: false,
            is_in_shopping_cart: false,
        })
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    pub recipes: R,
    pub ingredients: I,
    pub tags: T,
}

impl<R, I, T> UpdateRecipeUseCase<R, I, T>
where
    R: RecipeRepository,
    I: IngredientRepository,
    T: TagRepository,
{
    /// Replaces the recipe fields and its whole ingredient and tag sets.
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        id: i32,
        input: RecipeWriteModel,
    ) -> Result<(), RecipesServiceError> {
        let actor = require_actor(actor)?;
        let existing = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        require_recipe_owner(Some(actor), existing.author.id)?;

        let validated = validate_against_storage(&self.ingredients, &self.tags, input).await?;
        self.recipes.update(id, &validated).await?;
        tracing::info!(recipe_id = id, user_id = %actor.user_id, "recipe updated");
        Ok(())
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, actor: Option<Actor>, id: i32) -> Result<(), RecipesServiceError> {
        let actor = require_actor(actor)?;
        let existing = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        require_recipe_owner(Some(actor), existing.author.id)?;

        if !self.recipes.delete(id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        tracing::info!(recipe_id = id, user_id = %actor.user_id, "recipe deleted");
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R, C, F>
where
    R: RecipeRepository,
    C: RecipeCollectionRepository,
    F: FollowRepository,
{
    pub recipes: R,
    pub collections: C,
    pub follows: F,
}

impl<R, C, F> GetRecipeUseCase<R, C, F>
where
    R: RecipeRepository,
    C: RecipeCollectionRepository,
    F: FollowRepository,
{
    pub async fn execute(
        &self,
        viewer: Option<Actor>,
        id: i32,
    ) -> Result<RecipeReadModel, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        let mut models =
            annotate_recipes(&self.collections, &self.follows, viewer, vec![recipe]).await?;
        models.pop().ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

/// Recipe list filters as requested by the caller.
#[derive(Debug, Clone, Default)]
pub struct ListRecipesQuery {
    pub author: Option<Uuid>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl ListRecipesQuery {
    /// "Mine" filters only make sense for a signed-in viewer; anonymous callers get them ignored.
    fn into_filter(self, viewer: Option<Actor>) -> RecipeFilter {
        let viewer_id = viewer.map(|v| v.user_id);
        RecipeFilter {
            author_id: self.author,
            tag_slugs: self.tags,
            favorited_by: viewer_id.filter(|_| self.is_favorited),
            in_cart_of: viewer_id.filter(|_| self.is_in_shopping_cart),
        }
    }
}

pub struct ListRecipesUseCase<R, C, F>
where
    R: RecipeRepository,
    C: RecipeCollectionRepository,
    F: FollowRepository,
{
    pub recipes: R,
    pub collections: C,
    pub follows: F,
}

impl<R, C, F> ListRecipesUseCase<R, C, F>
where
    R: RecipeRepository,
    C: RecipeCollectionRepository,
    F: FollowRepository,
{
    pub async fn execute(
        &self,
        viewer: Option<Actor>,
        query: ListRecipesQuery,
        page: PageRequest,
    ) -> Result<Page<RecipeReadModel>, RecipesServiceError> {
        let filter = query.into_filter(viewer);
        let Page { count, results } = self.recipes.list(&filter, page).await?;
        let models = annotate_recipes(&self.collections, &self.follows, viewer, results).await?;
        Ok(Page::new(count, models))
    }
}
