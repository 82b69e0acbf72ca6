#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    Ingredient, NewIngredient, NewTag, NewUser, Recipe, RecipeCollection, RecipeFilter,
    RecipeSummary, ShoppingListItem, Tag, User, ValidatedRecipe,
};
use crate::error::RecipesServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError>;

    /// Users ordered by username.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError>;

    /// Fails with `UserAlreadyExists` when username or email is taken.
    async fn create(&self, user: &User) -> Result<(), RecipesServiceError>;
}

/// Repository for ingredients (reference data).
pub trait IngredientRepository: Send + Sync {
    /// Ingredients ordered by name, optionally restricted to a case-insensitive name prefix.
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;

    /// The subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError>;

    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, RecipesServiceError>;
}

/// Repository for tags (reference data).
pub trait TagRepository: Send + Sync {
    /// Tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;

    /// The subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError>;

    /// Fails with `TagAlreadyExists` when the slug is taken.
    async fn create(&self, tag: &NewTag) -> Result<Tag, RecipesServiceError>;
}

/// Repository for recipes and their ingredient/tag rows.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    /// The recipe row alone, without author, ingredients or tags.
    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, RecipesServiceError>;

    /// Recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError>;

    async fn exists_by_author_and_name(
        &self,
        author_id: Uuid,
        name: &str,
    ) -> Result<bool, RecipesServiceError>;

    /// Insert the recipe row and its ingredient and tag rows in one transaction.
    /// Returns the new recipe id. Fails with `Unauthenticated` when the author has no account.
    async fn create(
        &self,
        author_id: Uuid,
        recipe: &ValidatedRecipe,
    ) -> Result<i32, RecipesServiceError>;

    /// Update the recipe row and replace all ingredient and tag rows in one transaction.
    async fn update(&self, id: i32, recipe: &ValidatedRecipe) -> Result<(), RecipesServiceError>;

    /// Delete a recipe. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError>;

    /// The author's most recent recipes, all of them when `limit` is `None`.
    async fn list_summaries_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, RecipesServiceError>;
}

/// Repository for per-user recipe collections (favorites, shopping cart).
pub trait RecipeCollectionRepository: Send + Sync {
    /// Insert the pair. Returns `false` if it was already present.
    /// Fails with `Unauthenticated` when the user has no account and `RecipeNotFound` when the
    /// recipe is gone.
    async fn add(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Delete the pair. Returns `true` if a row was deleted.
    async fn remove(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// The subset of `recipe_ids` present in the user's collection.
    async fn contained_ids(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError>;

    /// Ingredients of every recipe in the user's cart, grouped by (name, unit) with amounts summed.
    async fn aggregate_shopping_cart(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingListItem>, RecipesServiceError>;
}

/// Repository for author subscriptions.
pub trait FollowRepository: Send + Sync {
    /// Insert the pair. Returns `false` if it was already present.
    /// Fails with `Unauthenticated` when the follower has no account and `UserNotFound` when the
    /// author is gone.
    async fn follow(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Delete the pair. Returns `true` if a row was deleted.
    async fn unfollow(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError>;

    /// The subset of `author_ids` the follower is subscribed to.
    async fn followed_ids(
        &self,
        follower_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError>;

    /// Authors the follower is subscribed to, ordered by username.
    async fn list_authors(
        &self,
        follower_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError>;
}
