use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingCartEntries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ShoppingCartEntries::UserId).uuid().not_null())
                    .col(ColumnDef::new(ShoppingCartEntries::RecipeId).integer().not_null())
                    .col(
                        ColumnDef::new(ShoppingCartEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ShoppingCartEntries::UserId)
                            .col(ShoppingCartEntries::RecipeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_cart_entries_user_id")
                            .from(ShoppingCartEntries::Table, ShoppingCartEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_cart_entries_recipe_id")
                            .from(ShoppingCartEntries::Table, ShoppingCartEntries::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShoppingCartEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ShoppingCartEntries {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
