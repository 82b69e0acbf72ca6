use crate::domain::access::require_actor;
use crate::domain::repository::RecipeCollectionRepository;
use crate::domain::shopping_list::ShoppingList;
use crate::domain::types::Actor;
use crate::error::RecipesServiceError;

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<C: RecipeCollectionRepository> {
    pub collections: C,
}

impl<C: RecipeCollectionRepository> DownloadShoppingListUseCase<C> {
    /// Fails with `EmptyCart` rather than producing a list with no lines.
    pub async fn execute(&self, actor: Option<Actor>) -> Result<ShoppingList, RecipesServiceError> {
        let actor = require_actor(actor)?;
        let items = self
            .collections
            .aggregate_shopping_cart(actor.user_id)
            .await?;
        ShoppingList::new(items)
    }
}
