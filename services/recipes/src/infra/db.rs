use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Statement, TransactionError, TransactionTrait,
    sea_query::{BinOper, Expr, Func, OnConflict, Query},
};
use uuid::Uuid;

use foodgram_core::sea_ext::DbErrExt;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_recipes_schema::{
    favorites, follows, ingredients, recipe_ingredients, recipe_tags, recipes,
    shopping_cart_entries, tags, users,
};

use crate::domain::repository::{
    FollowRepository, IngredientRepository, RecipeCollectionRepository, RecipeRepository,
    TagRepository, UserRepository,
};
use crate::domain::types::{
    Ingredient, NewIngredient, NewTag, Recipe, RecipeCollection, RecipeFilter, RecipeIngredient,
    RecipeSummary, ShoppingListItem, Tag, User, ValidatedRecipe,
};
use crate::error::RecipesServiceError;

fn internal(err: DbErr, context: &'static str) -> RecipesServiceError {
    anyhow::Error::new(err).context(context).into()
}

/// Surface the use-case error from a failed transaction; connection failures become internal.
fn from_transaction(
    err: TransactionError<RecipesServiceError>,
    context: &'static str,
) -> RecipesServiceError {
    match err {
        TransactionError::Connection(e) => internal(e, context),
        TransactionError::Transaction(e) => e,
    }
}

/// Translate a foreign-key violation into the domain error for the row that is missing.
/// Any other failure is internal.
fn missing_reference(err: DbErr, context: &'static str) -> RecipesServiceError {
    match err.foreign_key_violation() {
        Some(message) => reference_error(&message),
        None => internal(err, context),
    }
}

/// Constraint names are set by the migrations.
fn reference_error(message: &str) -> RecipesServiceError {
    const CALLER: [&str; 4] = [
        "fk_recipes_author_id",
        "fk_favorites_user_id",
        "fk_shopping_cart_entries_user_id",
        "fk_follows_follower_id",
    ];
    const RECIPE: [&str; 4] = [
        "fk_favorites_recipe_id",
        "fk_shopping_cart_entries_recipe_id",
        "fk_recipe_ingredients_recipe_id",
        "fk_recipe_tags_recipe_id",
    ];
    let names = |constraints: &[&str]| constraints.iter().any(|c| message.contains(c));
    // The gateway vouched for an identity that has no account here.
    if names(&CALLER) {
        RecipesServiceError::Unauthenticated
    } else if names(&RECIPE) {
        RecipesServiceError::RecipeNotFound
    } else if names(&["fk_follows_author_id"]) {
        RecipesServiceError::UserNotFound
    } else if names(&["fk_recipe_ingredients_ingredient_id"]) {
        RecipesServiceError::UnknownIngredient
    } else if names(&["fk_recipe_tags_tag_id"]) {
        RecipesServiceError::UnknownTag
    } else {
        anyhow::anyhow!("unexpected foreign key violation: {message}").into()
    }
}

/// Fetch one page of `query` along with the total row count.
async fn paginate<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    page: PageRequest,
    context: &'static str,
) -> Result<(u64, Vec<E::Model>), RecipesServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let page = page.clamped();
    let count = query.clone().count(db).await.context(context)?;
    let models = query
        .offset(page.offset())
        .limit(u64::from(page.limit))
        .all(db)
        .await
        .context(context)?;
    Ok((count, models))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError> {
        let query = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .order_by_asc(users::Column::Id);
        let (count, models) = paginate(&self.db, query, page, "list users").await?;
        Ok(Page::new(count, models.into_iter().map(user_from_model).collect()))
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                RecipesServiceError::UserAlreadyExists
            } else {
                internal(e, "create user")
            }
        })?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_at,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            // Both sides fold in the database so they agree under any collation.
            // Backslash is the default LIKE escape in Postgres.
            let pattern = format!("{}%", escape_like(prefix));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    ingredients::Entity,
                    ingredients::Column::Name,
                ))))
                .binary(BinOper::Like, Func::lower(Expr::val(pattern))),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError> {
        let found: Vec<i32> = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find existing ingredient ids")?;
        Ok(found.into_iter().collect())
    }

    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, RecipesServiceError> {
        let model = ingredients::ActiveModel {
            name: Set(ingredient.name.clone()),
            measurement_unit: Set(ingredient.measurement_unit.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create ingredient")?;
        Ok(ingredient_from_model(model))
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside a LIKE pattern.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError> {
        let found: Vec<i32> = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find existing tag ids")?;
        Ok(found.into_iter().collect())
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, RecipesServiceError> {
        let model = tags::ActiveModel {
            name: Set(tag.name.clone()),
            color: Set(tag.color.clone()),
            slug: Set(tag.slug.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                RecipesServiceError::TagAlreadyExists
            } else {
                internal(e, "create tag")
            }
        })?;
        Ok(tag_from_model(model))
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let Some(model) = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        Ok(load_recipes(&self.db, vec![model]).await?.pop())
    }

    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe summary")?;
        Ok(model.map(summary_from_model))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        let mut query = recipes::Entity::find();
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tag_slugs.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(
                            Expr::col((tags::Entity, tags::Column::Slug))
                                .is_in(filter.tag_slugs.iter().cloned()),
                        )
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(favorites::Column::RecipeId)
                        .from(favorites::Entity)
                        .and_where(Expr::col(favorites::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(shopping_cart_entries::Column::RecipeId)
                        .from(shopping_cart_entries::Entity)
                        .and_where(Expr::col(shopping_cart_entries::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }
        let query = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id);
        let (count, models) = paginate(&self.db, query, page, "list recipes").await?;
        Ok(Page::new(count, load_recipes(&self.db, models).await?))
    }

    async fn exists_by_author_and_name(
        &self,
        author_id: Uuid,
        name: &str,
    ) -> Result<bool, RecipesServiceError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .filter(recipes::Column::Name.eq(name))
            .count(&self.db)
            .await
            .context("check recipe name")?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        author_id: Uuid,
        recipe: &ValidatedRecipe,
    ) -> Result<i32, RecipesServiceError> {
        self.db
            .transaction::<_, i32, RecipesServiceError>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        author_id: Set(author_id),
                        name: Set(recipe.name.clone()),
                        text: Set(recipe.text.clone()),
                        image: Set(recipe.image.clone()),
                        cooking_time: Set(recipe.cooking_time),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| missing_reference(e, "insert recipe"))?;
                    insert_recipe_rows(txn, model.id, &recipe).await?;
                    Ok(model.id)
                })
            })
            .await
            .map_err(|e| from_transaction(e, "create recipe"))
    }

    async fn update(&self, id: i32, recipe: &ValidatedRecipe) -> Result<(), RecipesServiceError> {
        self.db
            .transaction::<_, (), RecipesServiceError>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    recipes::ActiveModel {
                        id: Set(id),
                        name: Set(recipe.name.clone()),
                        text: Set(recipe.text.clone()),
                        image: Set(recipe.image.clone()),
                        cooking_time: Set(recipe.cooking_time),
                        ..Default::default()
                    }
                    .update(txn)
                    .await
                    .map_err(|e| match e {
                        DbErr::RecordNotUpdated => RecipesServiceError::RecipeNotFound,
                        e => internal(e, "update recipe"),
                    })?;

                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await
                        .context("clear recipe ingredients")?;
                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await
                        .context("clear recipe tags")?;
                    insert_recipe_rows(txn, id, &recipe).await
                })
            })
            .await
            .map_err(|e| from_transaction(e, "update recipe"))
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        // Junction, favorite and cart rows go with it via ON DELETE CASCADE.
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }

    async fn list_summaries_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, RecipesServiceError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query
            .all(&self.db)
            .await
            .context("list recipe summaries by author")?;
        Ok(models.into_iter().map(summary_from_model).collect())
    }
}

fn summary_from_model(model: recipes::Model) -> RecipeSummary {
    RecipeSummary {
        id: model.id,
        name: model.name,
        image: model.image,
        cooking_time: model.cooking_time,
    }
}

/// Insert ingredient and tag rows for a recipe. A reference that vanished after
/// validation surfaces as `UnknownIngredient` / `UnknownTag` and rolls the transaction back.
async fn insert_recipe_rows(
    txn: &DatabaseTransaction,
    recipe_id: i32,
    recipe: &ValidatedRecipe,
) -> Result<(), RecipesServiceError> {
    recipe_ingredients::Entity::insert_many(recipe.ingredients.iter().map(|item| {
        recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(item.id),
            amount: Set(item.amount),
        }
    }))
    .exec_without_returning(txn)
    .await
    .map_err(|e| missing_reference(e, "insert recipe ingredients"))?;

    recipe_tags::Entity::insert_many(recipe.tags.iter().map(|&tag_id| recipe_tags::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(tag_id),
    }))
    .exec_without_returning(txn)
    .await
    .map_err(|e| missing_reference(e, "insert recipe tags"))?;
    Ok(())
}

/// Attach authors, ingredients and tags to recipe rows, preserving row order.
/// One query per relation regardless of how many recipes are loaded.
async fn load_recipes(
    db: &DatabaseConnection,
    models: Vec<recipes::Model>,
) -> Result<Vec<Recipe>, RecipesServiceError> {
    if models.is_empty() {
        return Ok(vec![]);
    }
    let recipe_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let author_ids: HashSet<Uuid> = models.iter().map(|m| m.author_id).collect();

    let authors: HashMap<Uuid, User> = users::Entity::find()
        .filter(users::Column::Id.is_in(author_ids))
        .all(db)
        .await
        .context("load recipe authors")?
        .into_iter()
        .map(|m| (m.id, user_from_model(m)))
        .collect();

    let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
    let ingredient_rows = recipe_ingredients::Entity::find()
        .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().copied()))
        .find_also_related(ingredients::Entity)
        .order_by_asc(ingredients::Column::Name)
        .all(db)
        .await
        .context("load recipe ingredients")?;
    for (row, ingredient) in ingredient_rows {
        if let Some(ingredient) = ingredient {
            ingredients_by_recipe
                .entry(row.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    ingredient: ingredient_from_model(ingredient),
                    amount: row.amount,
                });
        }
    }

    let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    let tag_rows = recipe_tags::Entity::find()
        .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.iter().copied()))
        .find_also_related(tags::Entity)
        .order_by_asc(tags::Column::Name)
        .all(db)
        .await
        .context("load recipe tags")?;
    for (row, tag) in tag_rows {
        if let Some(tag) = tag {
            tags_by_recipe
                .entry(row.recipe_id)
                .or_default()
                .push(tag_from_model(tag));
        }
    }

    models
        .into_iter()
        .map(|m| -> Result<Recipe, RecipesServiceError> {
            let author = authors
                .get(&m.author_id)
                .cloned()
                .with_context(|| format!("author {} of recipe {} missing", m.author_id, m.id))?;
            Ok(Recipe {
                id: m.id,
                author,
                name: m.name,
                text: m.text,
                image: m.image,
                cooking_time: m.cooking_time,
                created_at: m.created_at,
                ingredients: ingredients_by_recipe.remove(&m.id).unwrap_or_default(),
                tags: tags_by_recipe.remove(&m.id).unwrap_or_default(),
            })
        })
        .collect()
}

// ── Recipe collection repository (favorites, shopping cart) ─────────────────

/// Cart ingredients grouped by (name, unit). `SUM` over `INTEGER` yields `BIGINT` already;
/// the cast pins the column type the row struct decodes.
const SHOPPING_CART_SQL: &str = r#"
    SELECT i.name AS name,
           i.measurement_unit AS measurement_unit,
           SUM(ri.amount)::BIGINT AS total
    FROM shopping_cart_entries sc
    JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
    JOIN ingredients i ON i.id = ri.ingredient_id
    WHERE sc.user_id = $1
    GROUP BY i.name, i.measurement_unit
    ORDER BY i.name, i.measurement_unit
"#;

#[derive(Clone)]
pub struct DbRecipeCollectionRepository {
    pub db: DatabaseConnection,
}

impl RecipeCollectionRepository for DbRecipeCollectionRepository {
    async fn add(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let now = Utc::now();
        // The losing side of a concurrent insert sees zero rows instead of a constraint error.
        let inserted = match collection {
            RecipeCollection::Favorites => favorites::Entity::insert(favorites::ActiveModel {
                user_id: Set(user_id),
                recipe_id: Set(recipe_id),
                created_at: Set(now),
            })
            .on_conflict(
                OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| missing_reference(e, "add favorite"))?,
            RecipeCollection::ShoppingCart => {
                shopping_cart_entries::Entity::insert(shopping_cart_entries::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_cart_entries::Column::UserId,
                        shopping_cart_entries::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .map_err(|e| missing_reference(e, "add shopping cart entry"))?
            }
        };
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let result = match collection {
            RecipeCollection::Favorites => favorites::Entity::delete_many()
                .filter(favorites::Column::UserId.eq(user_id))
                .filter(favorites::Column::RecipeId.eq(recipe_id))
                .exec(&self.db)
                .await
                .context("remove favorite")?,
            RecipeCollection::ShoppingCart => shopping_cart_entries::Entity::delete_many()
                .filter(shopping_cart_entries::Column::UserId.eq(user_id))
                .filter(shopping_cart_entries::Column::RecipeId.eq(recipe_id))
                .exec(&self.db)
                .await
                .context("remove shopping cart entry")?,
        };
        Ok(result.rows_affected > 0)
    }

    async fn contained_ids(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        let found: Vec<i32> = match collection {
            RecipeCollection::Favorites => favorites::Entity::find()
                .select_only()
                .column(favorites::Column::RecipeId)
                .filter(favorites::Column::UserId.eq(user_id))
                .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                .into_tuple()
                .all(&self.db)
                .await
                .context("find favorited recipe ids")?,
            RecipeCollection::ShoppingCart => shopping_cart_entries::Entity::find()
                .select_only()
                .column(shopping_cart_entries::Column::RecipeId)
                .filter(shopping_cart_entries::Column::UserId.eq(user_id))
                .filter(shopping_cart_entries::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                .into_tuple()
                .all(&self.db)
                .await
                .context("find recipe ids in shopping cart")?,
        };
        Ok(found.into_iter().collect())
    }

    async fn aggregate_shopping_cart(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingListItem>, RecipesServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct ShoppingListRow {
            name: String,
            measurement_unit: String,
            total: i64,
        }

        let rows = ShoppingListRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            SHOPPING_CART_SQL,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("aggregate shopping cart")?;

        Ok(rows
            .into_iter()
            .map(|row| ShoppingListItem {
                name: row.name,
                measurement_unit: row.measurement_unit,
                total: row.total,
            })
            .collect())
    }
}

// ── Follow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn follow(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let inserted = follows::Entity::insert(follows::ActiveModel {
            follower_id: Set(follower_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([follows::Column::FollowerId, follows::Column::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .map_err(|e| missing_reference(e, "follow author"))?;
        Ok(inserted > 0)
    }

    async fn unfollow(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .context("unfollow author")?;
        Ok(result.rows_affected > 0)
    }

    async fn followed_ids(
        &self,
        follower_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        let found: Vec<Uuid> = follows::Entity::find()
            .select_only()
            .column(follows::Column::AuthorId)
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::AuthorId.is_in(author_ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find followed author ids")?;
        Ok(found.into_iter().collect())
    }

    async fn list_authors(
        &self,
        follower_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError> {
        let query = users::Entity::find()
            .filter(
                users::Column::Id.in_subquery(
                    Query::select()
                        .column(follows::Column::AuthorId)
                        .from(follows::Entity)
                        .and_where(Expr::col(follows::Column::FollowerId).eq(follower_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(users::Column::Username)
            .order_by_asc(users::Column::Id);
        let (count, models) = paginate(&self.db, query, page, "list followed authors").await?;
        Ok(Page::new(count, models.into_iter().map(user_from_model).collect()))
    }
}
