//! Plain-text rendering of the aggregated shopping cart.

use crate::domain::types::ShoppingListItem;
use crate::error::RecipesServiceError;

pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";
pub const SHOPPING_LIST_HEADER: &str = "Список покупок:";

/// Aggregated ingredients of a non-empty shopping cart, ordered by ingredient name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Fails with `EmptyCart` when there is nothing to export.
    pub fn new(mut items: Vec<ShoppingListItem>) -> Result<Self, RecipesServiceError> {
        if items.is_empty() {
            return Err(RecipesServiceError::EmptyCart);
        }
        items.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.measurement_unit.cmp(&b.measurement_unit))
        });
        Ok(Self { items })
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    /// Header, blank line, then `"{name} - {total} {unit}"` per line.
    pub fn render(&self) -> String {
        let lines: Vec<String> = self
            .items
            .iter()
            .map(|item| format!("{} - {} {}", item.name, item.total, item.measurement_unit))
            .collect();
        format!("{SHOPPING_LIST_HEADER}\n\n{}", lines.join("\n"))
    }
}
