//! Response shapes shared by several endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::{AuthorWithRecipes, RecipeSummary, User, UserProfile};

/// Account fields returned on registration.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// A user as seen by the caller.
#[derive(Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub is_subscribed: bool,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: profile.user.into(),
            is_subscribed: profile.is_subscribed,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

/// A profile extended with the author's recipes.
#[derive(Serialize)]
pub struct AuthorWithRecipesResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl From<AuthorWithRecipes> for AuthorWithRecipesResponse {
    fn from(author: AuthorWithRecipes) -> Self {
        Self {
            profile: author.profile.into(),
            recipes: author.recipes.into_iter().map(Into::into).collect(),
            recipes_count: author.recipes_count,
        }
    }
}
