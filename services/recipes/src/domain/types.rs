use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The caller of an operation, as reported by the gateway. `None` at call sites means anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: Option<String>,
    pub slug: String,
}

/// An ingredient together with the quantity one recipe needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// A recipe with its author, ingredients and tags loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author: User,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<Tag>,
}

/// Compact recipe shape returned by favorite/cart toggles and subscription listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl Recipe {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            cooking_time: self.cooking_time,
        }
    }
}

// ── Viewer-relative projections ──────────────────────────────────────────────

/// A user as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub is_subscribed: bool,
}

/// Read shape of a recipe for a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeReadModel {
    pub recipe: Recipe,
    pub author_is_subscribed: bool,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// An author profile extended with their recipe count and (possibly limited) recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorWithRecipes {
    pub profile: UserProfile,
    pub recipes_count: u64,
    pub recipes: Vec<RecipeSummary>,
}

// ── Write shapes ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub id: i32,
    pub amount: i32,
}

/// Candidate recipe as submitted on create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeWriteModel {
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<i32>,
}

/// A write model that passed validation. Only `validation::validate_recipe` builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecipe {
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: Option<String>,
    pub slug: String,
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Per-user recipe lists that share add/remove semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeCollection {
    Favorites,
    ShoppingCart,
}

/// Constraints applied to recipe listings before viewer flags are computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<Uuid>,
    /// Recipes carrying any of these tag slugs. Empty means no tag constraint.
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<Uuid>,
    pub in_cart_of: Option<Uuid>,
}

/// One aggregated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

// ── Field validators ─────────────────────────────────────────────────────────

/// Longest recipe, ingredient, unit or tag name the tables hold.
pub const NAME_MAX_LEN: usize = 200;

/// Display name: non-empty and at most `NAME_MAX_LEN` chars.
pub fn validate_name(name: &str) -> bool {
    !name.is_empty() && name.chars().count() <= NAME_MAX_LEN
}

/// Username: 1-150 chars of letters, digits and `@.+-_`.
pub fn validate_username(username: &str) -> bool {
    !username.is_empty()
        && username.chars().count() <= 150
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

/// Minimal shape check; delivery is the gateway's concern.
pub fn validate_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && email.len() <= 254
        }
        None => false,
    }
}

/// Slug: non-empty, `[-a-zA-Z0-9_]+`, at most 200 chars.
pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 200
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Colour: `#RRGGBB`.
pub fn validate_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}
