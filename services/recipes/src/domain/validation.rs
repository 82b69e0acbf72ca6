//! Recipe invariants checked on create and update.

use std::collections::HashSet;

use crate::domain::types::{IngredientAmount, NAME_MAX_LEN, RecipeWriteModel, ValidatedRecipe};
use crate::error::RecipesServiceError;

/// Trim the candidate name, rejecting blank names and names longer than `NAME_MAX_LEN` chars.
pub fn normalize_name(name: &str) -> Result<String, RecipesServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RecipesServiceError::EmptyName);
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(RecipesServiceError::NameTooLong);
    }
    Ok(name.to_owned())
}

/// Check a candidate recipe against the ingredient and tag ids that exist in storage.
///
/// Checks run in a fixed order so a given input always yields the same error:
/// name, cooking time, ingredient list (unknown, duplicate, amount per item), tag list.
/// Repeated tag ids are collapsed keeping first-seen order.
///
/// The per-author duplicate-name check needs storage and is done by the create use case.
pub fn validate_recipe(
    input: RecipeWriteModel,
    known_ingredients: &HashSet<i32>,
    known_tags: &HashSet<i32>,
) -> Result<ValidatedRecipe, RecipesServiceError> {
    let name = normalize_name(&input.name)?;
    if input.cooking_time < 1 {
        return Err(RecipesServiceError::InvalidCookingTime);
    }
    let ingredients = validate_ingredients(&input.ingredients, known_ingredients)?;
    let tags = validate_tags(&input.tags, known_tags)?;
    Ok(ValidatedRecipe {
        name,
        text: input.text,
        image: input.image,
        cooking_time: input.cooking_time,
        ingredients,
        tags,
    })
}

fn validate_ingredients(
    ingredients: &[IngredientAmount],
    known: &HashSet<i32>,
) -> Result<Vec<IngredientAmount>, RecipesServiceError> {
    if ingredients.is_empty() {
        return Err(RecipesServiceError::NoIngredients);
    }
    let mut seen = HashSet::with_capacity(ingredients.len());
    for item in ingredients {
        if !known.contains(&item.id) {
            return Err(RecipesServiceError::UnknownIngredient);
        }
        if !seen.insert(item.id) {
            return Err(RecipesServiceError::DuplicateIngredient);
        }
        if item.amount < 1 {
            return Err(RecipesServiceError::InvalidAmount);
        }
    }
    Ok(ingredients.to_vec())
}

fn validate_tags(tags: &[i32], known: &HashSet<i32>) -> Result<Vec<i32>, RecipesServiceError> {
    if tags.is_empty() {
        return Err(RecipesServiceError::NoTags);
    }
    let mut seen = HashSet::with_capacity(tags.len());
    let mut normalized = Vec::with_capacity(tags.len());
    for &tag in tags {
        if !known.contains(&tag) {
            return Err(RecipesServiceError::UnknownTag);
        }
        if seen.insert(tag) {
            normalized.push(tag);
        }
    }
    Ok(normalized)
}
