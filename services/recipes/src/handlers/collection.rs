use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use foodgram_auth_types::identity::OptionalIdentity;

use crate::domain::shopping_list::SHOPPING_LIST_FILENAME;
use crate::domain::types::RecipeCollection;
use crate::error::RecipesServiceError;
use crate::handlers::actor;
use crate::handlers::response::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::collection::{AddToCollectionUseCase, RemoveFromCollectionUseCase};
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

async fn add(
    state: AppState,
    identity: OptionalIdentity,
    collection: RecipeCollection,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let usecase = AddToCollectionUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    let summary = usecase
        .execute(actor(identity), collection, recipe_id)
        .await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

async fn remove(
    state: AppState,
    identity: OptionalIdentity,
    collection: RecipeCollection,
    recipe_id: i32,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = RemoveFromCollectionUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    usecase
        .execute(actor(identity), collection, recipe_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST/DELETE /api/recipes/{id}/favorite ───────────────────────────────────

pub async fn add_favorite(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    add(state, identity, RecipeCollection::Favorites, id).await
}

pub async fn remove_favorite(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(state, identity, RecipeCollection::Favorites, id).await
}

// ── POST/DELETE /api/recipes/{id}/shopping_cart ──────────────────────────────

pub async fn add_to_shopping_cart(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    add(state, identity, RecipeCollection::ShoppingCart, id).await
}

pub async fn remove_from_shopping_cart(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(state, identity, RecipeCollection::ShoppingCart, id).await
}

// ── GET /api/recipes/download_shopping_cart ──────────────────────────────────

pub async fn download_shopping_cart(
    identity: OptionalIdentity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RecipesServiceError> {
    let usecase = DownloadShoppingListUseCase {
        collections: state.collection_repo(),
    };
    let list = usecase.execute(actor(identity)).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        list.render(),
    ))
}
