use chrono::Utc;
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::access::require_actor;
use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::types::{Actor, NewUser, User, UserProfile, validate_email, validate_username};
use crate::error::RecipesServiceError;
use crate::usecase::viewer::annotate_users;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    pub async fn execute(&self, input: NewUser) -> Result<User, RecipesServiceError> {
        let username = input.username.trim();
        let email = input.email.trim();
        if !validate_username(username) || !validate_email(email) {
            return Err(RecipesServiceError::MissingData);
        }
        let first_name = input.first_name.trim();
        let last_name = input.last_name.trim();
        if first_name.is_empty()
            || last_name.is_empty()
            || first_name.chars().count() > 150
            || last_name.chars().count() > 150
        {
            return Err(RecipesServiceError::MissingData);
        }

        let user = User {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            email: email.to_lowercase(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository, F: FollowRepository> {
    pub repo: R,
    pub follows: F,
}

impl<R: UserRepository, F: FollowRepository> GetUserUseCase<R, F> {
    pub async fn execute(
        &self,
        viewer: Option<Actor>,
        id: Uuid,
    ) -> Result<UserProfile, RecipesServiceError> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let mut profiles = annotate_users(&self.follows, viewer, vec![user]).await?;
        profiles.pop().ok_or(RecipesServiceError::UserNotFound)
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetMeUseCase<R> {
    pub async fn execute(&self, viewer: Option<Actor>) -> Result<UserProfile, RecipesServiceError> {
        let actor = require_actor(viewer)?;
        let user = self
            .repo
            .find_by_id(actor.user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        Ok(UserProfile {
            user,
            is_subscribed: false,
        })
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository, F: FollowRepository> {
    pub repo: R,
    pub follows: F,
}

impl<R: UserRepository, F: FollowRepository> ListUsersUseCase<R, F> {
    pub async fn execute(
        &self,
        viewer: Option<Actor>,
        page: PageRequest,
    ) -> Result<Page<UserProfile>, RecipesServiceError> {
        let Page { count, results } = self.repo.list(page).await?;
        let profiles = annotate_users(&self.follows, viewer, results).await?;
        Ok(Page::new(count, profiles))
    }
}
