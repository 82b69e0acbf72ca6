use foodgram_recipes::domain::shopping_list::ShoppingList;
use foodgram_recipes::domain::types::{Ingredient, RecipeCollection, User};
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::collection::AddToCollectionUseCase;
use foodgram_recipes::usecase::recipe::CreateRecipeUseCase;
use foodgram_recipes::usecase::shopping_list::DownloadShoppingListUseCase;

use crate::helpers::{MemoryStore, actor, write_model};

struct Kitchen {
    store: MemoryStore,
    shopper: User,
    flour: Ingredient,
    eggs: Ingredient,
    tag_id: i32,
}

impl Kitchen {
    fn new() -> Self {
        let store = MemoryStore::new();
        let shopper = store.seed_user("shopper");
        let eggs = store.seed_ingredient("Яйца", "шт");
        let flour = store.seed_ingredient("Мука", "г");
        let tag_id = store.seed_tag("baking").id;
        Self {
            store,
            shopper,
            flour,
            eggs,
            tag_id,
        }
    }

    async fn recipe(&self, name: &str, ingredients: &[(i32, i32)]) -> i32 {
        CreateRecipeUseCase {
            recipes: self.store.clone(),
            ingredients: self.store.clone(),
            tags: self.store.clone(),
        }
        .execute(
            actor(&self.shopper),
            write_model(name, ingredients, &[self.tag_id]),
        )
        .await
        .unwrap()
        .recipe
        .id
    }

    async fn add_to_cart(&self, recipe_id: i32) {
        AddToCollectionUseCase {
            recipes: self.store.clone(),
            collections: self.store.clone(),
        }
        .execute(
            actor(&self.shopper),
            RecipeCollection::ShoppingCart,
            recipe_id,
        )
        .await
        .unwrap();
    }

    async fn download(&self) -> Result<ShoppingList, RecipesServiceError> {
        DownloadShoppingListUseCase {
            collections: self.store.clone(),
        }
        .execute(actor(&self.shopper))
        .await
    }
}

#[tokio::test]
async fn should_sum_amounts_per_ingredient() {
    let kitchen = Kitchen::new();
    let first = kitchen
        .recipe("Блины", &[(kitchen.flour.id, 200)])
        .await;
    let second = kitchen
        .recipe("Оладьи", &[(kitchen.flour.id, 300), (kitchen.eggs.id, 2)])
        .await;
    kitchen.add_to_cart(first).await;
    kitchen.add_to_cart(second).await;

    let list = kitchen.download().await.unwrap();

    assert_eq!(list.items().len(), 2);
    assert_eq!(
        list.render(),
        "Список покупок:\n\nМука - 500 г\nЯйца - 2 шт"
    );
}

#[tokio::test]
async fn should_not_depend_on_cart_insertion_order() {
    let forward = Kitchen::new();
    let a = forward.recipe("A", &[(forward.flour.id, 120), (forward.eggs.id, 1)]).await;
    let b = forward.recipe("B", &[(forward.flour.id, 80), (forward.eggs.id, 3)]).await;
    forward.add_to_cart(a).await;
    forward.add_to_cart(b).await;

    let backward = Kitchen::new();
    let a = backward.recipe("A", &[(backward.flour.id, 120), (backward.eggs.id, 1)]).await;
    let b = backward.recipe("B", &[(backward.flour.id, 80), (backward.eggs.id, 3)]).await;
    backward.add_to_cart(b).await;
    backward.add_to_cart(a).await;

    let forward = forward.download().await.unwrap();
    let backward = backward.download().await.unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward.items()[0].total, 200);
    assert_eq!(forward.items()[1].total, 4);
}

#[tokio::test]
async fn should_ignore_recipes_outside_the_cart() {
    let kitchen = Kitchen::new();
    let in_cart = kitchen.recipe("Блины", &[(kitchen.flour.id, 200)]).await;
    kitchen
        .recipe("Омлет", &[(kitchen.eggs.id, 3)])
        .await;
    kitchen.add_to_cart(in_cart).await;

    let list = kitchen.download().await.unwrap();
    assert_eq!(list.render(), "Список покупок:\n\nМука - 200 г");
}

#[tokio::test]
async fn should_fail_with_empty_cart() {
    let kitchen = Kitchen::new();
    kitchen.recipe("Блины", &[(kitchen.flour.id, 200)]).await;

    let result = kitchen.download().await;
    assert!(
        matches!(result, Err(RecipesServiceError::EmptyCart)),
        "expected EmptyCart, got {result:?}"
    );
}

#[tokio::test]
async fn should_require_authentication_to_download() {
    let kitchen = Kitchen::new();
    let result = DownloadShoppingListUseCase {
        collections: kitchen.store.clone(),
    }
    .execute(None)
    .await;
    assert!(matches!(result, Err(RecipesServiceError::Unauthenticated)));
}
