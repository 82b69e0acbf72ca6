use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, column)
const INDEXES: [(&str, Tables, Columns); 7] = [
    ("idx_recipes_author_id", Tables::Recipes, Columns::AuthorId),
    ("idx_recipes_created_at", Tables::Recipes, Columns::CreatedAt),
    ("idx_ingredients_name", Tables::Ingredients, Columns::Name),
    (
        "idx_recipe_ingredients_ingredient_id",
        Tables::RecipeIngredients,
        Columns::IngredientId,
    ),
    ("idx_favorites_recipe_id", Tables::Favorites, Columns::RecipeId),
    (
        "idx_shopping_cart_entries_recipe_id",
        Tables::ShoppingCartEntries,
        Columns::RecipeId,
    ),
    ("idx_follows_author_id", Tables::Follows, Columns::AuthorId),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(table)
                        .col(column)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
enum Tables {
    Recipes,
    Ingredients,
    RecipeIngredients,
    Favorites,
    ShoppingCartEntries,
    Follows,
}

#[derive(Iden, Clone, Copy)]
enum Columns {
    AuthorId,
    CreatedAt,
    Name,
    IngredientId,
    RecipeId,
}
