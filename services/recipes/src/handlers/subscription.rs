use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use uuid::Uuid;

use foodgram_auth_types::identity::OptionalIdentity;
use foodgram_domain::pagination::Page;

use crate::error::RecipesServiceError;
use crate::handlers::actor;
use crate::handlers::query::QueryParams;
use crate::handlers::response::AuthorWithRecipesResponse;
use crate::state::AppState;
use crate::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

// ── GET /api/users/subscriptions ─────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<AuthorWithRecipesResponse>>, RecipesServiceError> {
    let params = QueryParams::parse(raw_query.as_deref());
    let page = params.page()?;
    let usecase = ListSubscriptionsUseCase {
        recipes: state.recipe_repo(),
        follows: state.follow_repo(),
    };
    let authors = usecase
        .execute(actor(identity), page, params.recipes_limit())
        .await?;
    Ok(Json(authors.map(AuthorWithRecipesResponse::from)))
}

// ── POST /api/users/{id}/subscribe ───────────────────────────────────────────

pub async fn subscribe(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    RawQuery(raw_query): RawQuery,
) -> Result<(StatusCode, Json<AuthorWithRecipesResponse>), RecipesServiceError> {
    let recipes_limit = QueryParams::parse(raw_query.as_deref()).recipes_limit();
    let usecase = SubscribeUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
        follows: state.follow_repo(),
    };
    let author = usecase
        .execute(actor(identity), author_id, recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(author.into())))
}

// ── DELETE /api/users/{id}/subscribe ─────────────────────────────────────────

pub async fn unsubscribe(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = UnsubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    usecase.execute(actor(identity), author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
