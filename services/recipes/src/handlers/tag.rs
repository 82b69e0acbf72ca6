use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::OptionalIdentity;

use crate::domain::types::{NewTag, Tag};
use crate::error::RecipesServiceError;
use crate::handlers::actor;
use crate::state::AppState;
use crate::usecase::tag::{CreateTagUseCase, GetTagUseCase, ListTagsUseCase};

#[derive(Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    /// Empty string when the tag has no colour.
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color.unwrap_or_default(),
            slug: tag.slug,
        }
    }
}

// ── GET /api/tags ────────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, RecipesServiceError> {
    let usecase = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /api/tags/{id} ───────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, RecipesServiceError> {
    let usecase = GetTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/tags ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub color: Option<String>,
    pub slug: String,
}

pub async fn create_tag(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), RecipesServiceError> {
    let usecase = CreateTagUseCase {
        repo: state.tag_repo(),
    };
    let tag = usecase
        .execute(
            actor(identity),
            NewTag {
                name: body.name,
                color: body.color,
                slug: body.slug,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}
