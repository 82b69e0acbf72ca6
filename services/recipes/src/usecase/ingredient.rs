use crate::domain::access::require_admin;
use crate::domain::repository::IngredientRepository;
use crate::domain::types::{Actor, Ingredient, NewIngredient, validate_name};
use crate::error::RecipesServiceError;

// ── ListIngredients ──────────────────────────────────────────────────────────

pub struct ListIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> ListIngredientsUseCase<R> {
    /// A blank `name` is treated as no filter.
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name.map(str::trim).filter(|s| !s.is_empty());
        self.repo.list(prefix).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

// ── CreateIngredient ─────────────────────────────────────────────────────────

pub struct CreateIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> CreateIngredientUseCase<R> {
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        input: NewIngredient,
    ) -> Result<Ingredient, RecipesServiceError> {
        require_admin(actor)?;
        let input = NewIngredient {
            name: input.name.trim().to_owned(),
            measurement_unit: input.measurement_unit.trim().to_owned(),
        };
        if !validate_name(&input.name) || !validate_name(&input.measurement_unit) {
            return Err(RecipesServiceError::MissingData);
        }
        let ingredient = self.repo.create(&input).await?;
        tracing::info!(ingredient_id = ingredient.id, name = %ingredient.name, "ingredient created");
        Ok(ingredient)
    }
}
