use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use foodgram_auth_types::identity::OptionalIdentity;
use foodgram_domain::pagination::Page;

use crate::domain::types::NewUser;
use crate::error::RecipesServiceError;
use crate::handlers::actor;
use crate::handlers::query::QueryParams;
use crate::handlers::response::{ProfileResponse, UserResponse};
use crate::state::AppState;
use crate::usecase::user::{GetMeUseCase, GetUserUseCase, ListUsersUseCase, RegisterUserUseCase};

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), RecipesServiceError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(NewUser {
            username: body.username,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<ProfileResponse>>, RecipesServiceError> {
    let page = QueryParams::parse(raw_query.as_deref()).page()?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
        follows: state.follow_repo(),
    };
    let users = usecase.execute(actor(identity), page).await?;
    Ok(Json(users.map(ProfileResponse::from)))
}

// ── GET /api/users/me ────────────────────────────────────────────────────────

pub async fn get_me(
    identity: OptionalIdentity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, RecipesServiceError> {
    let usecase = GetMeUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(actor(identity)).await?.into()))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
        follows: state.follow_repo(),
    };
    Ok(Json(usecase.execute(actor(identity), id).await?.into()))
}
