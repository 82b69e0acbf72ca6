use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::OptionalIdentity;

use crate::domain::types::{Ingredient, NewIngredient};
use crate::error::RecipesServiceError;
use crate::handlers::actor;
use crate::handlers::query::QueryParams;
use crate::state::AppState;
use crate::usecase::ingredient::{
    CreateIngredientUseCase, GetIngredientUseCase, ListIngredientsUseCase,
};

#[derive(Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

// ── GET /api/ingredients?name=... ────────────────────────────────────────────

pub async fn list_ingredients(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<IngredientResponse>>, RecipesServiceError> {
    let params = QueryParams::parse(raw_query.as_deref());
    let usecase = ListIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = usecase.execute(params.get("name")).await?;
    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

// ── GET /api/ingredients/{id} ────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, RecipesServiceError> {
    let usecase = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/ingredients ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub measurement_unit: String,
}

pub async fn create_ingredient(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientResponse>), RecipesServiceError> {
    let usecase = CreateIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredient = usecase
        .execute(
            actor(identity),
            NewIngredient {
                name: body.name,
                measurement_unit: body.measurement_unit,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient.into())))
}
