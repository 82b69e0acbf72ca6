use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_auth_types::identity::OptionalIdentity;
use foodgram_domain::pagination::Page;

use crate::domain::types::{IngredientAmount, RecipeReadModel, RecipeWriteModel};
use crate::error::RecipesServiceError;
use crate::handlers::actor;
use crate::handlers::query::QueryParams;
use crate::handlers::response::ProfileResponse;
use crate::handlers::tag::TagResponse;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesQuery,
    ListRecipesUseCase, UpdateRecipeUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

/// Body of create and update. Update replaces the whole recipe.
#[derive(Deserialize)]
pub struct RecipeRequest {
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: String,
    pub cooking_time: i32,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
    #[serde(default)]
    pub tags: Vec<i32>,
}

impl From<RecipeRequest> for RecipeWriteModel {
    fn from(body: RecipeRequest) -> Self {
        RecipeWriteModel {
            name: body.name,
            text: body.text,
            image: body.image,
            cooking_time: body.cooking_time,
            ingredients: body
                .ingredients
                .into_iter()
                .map(|i| IngredientAmount {
                    id: i.id,
                    amount: i.amount,
                })
                .collect(),
            tags: body.tags,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: ProfileResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    #[serde(serialize_with = "foodgram_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RecipeReadModel> for RecipeResponse {
    fn from(model: RecipeReadModel) -> Self {
        let recipe = model.recipe;
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            author: ProfileResponse {
                user: recipe.author.into(),
                is_subscribed: model.author_is_subscribed,
            },
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(|ri| RecipeIngredientResponse {
                    id: ri.ingredient.id,
                    name: ri.ingredient.name,
                    measurement_unit: ri.ingredient.measurement_unit,
                    amount: ri.amount,
                })
                .collect(),
            is_favorited: model.is_favorited,
            is_in_shopping_cart: model.is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            created_at: recipe.created_at,
        }
    }
}

// ── GET /api/recipes ─────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<RecipeResponse>>, RecipesServiceError> {
    let params = QueryParams::parse(raw_query.as_deref());
    let author = params
        .get("author")
        .map(|v| v.parse::<Uuid>())
        .transpose()
        .map_err(|_| RecipesServiceError::InvalidQuery)?;
    let query = ListRecipesQuery {
        author,
        tags: params.all("tags"),
        is_favorited: params.flag("is_favorited")?,
        is_in_shopping_cart: params.flag("is_in_shopping_cart")?,
    };
    let page = params.page()?;

    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
        follows: state.follow_repo(),
    };
    let recipes = usecase.execute(actor(identity), query, page).await?;
    Ok(Json(recipes.map(RecipeResponse::from)))
}

// ── GET /api/recipes/{id} ────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
        follows: state.follow_repo(),
    };
    let recipe = usecase.execute(actor(identity), id).await?;
    Ok(Json(recipe.into()))
}

// ── POST /api/recipes ────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Json(body): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
    };
    let recipe = usecase.execute(actor(identity), body.into()).await?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

// ── PATCH /api/recipes/{id} ──────────────────────────────────────────────────

pub async fn update_recipe(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<RecipeRequest>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let viewer = actor(identity);
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
    };
    usecase.execute(viewer, id, body.into()).await?;

    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
        follows: state.follow_repo(),
    };
    let recipe = usecase.execute(viewer, id).await?;
    Ok(Json(recipe.into()))
}

// ── DELETE /api/recipes/{id} ─────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    usecase.execute(actor(identity), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
