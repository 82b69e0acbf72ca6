use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_recipes::domain::repository::{
    FollowRepository, IngredientRepository, RecipeCollectionRepository, RecipeRepository,
    TagRepository, UserRepository,
};
use foodgram_recipes::domain::types::{
    Actor, Ingredient, IngredientAmount, NewIngredient, NewTag, Recipe, RecipeCollection,
    RecipeFilter, RecipeIngredient, RecipeSummary, RecipeWriteModel, ShoppingListItem, Tag, User,
    ValidatedRecipe,
};
use foodgram_recipes::error::RecipesServiceError;

// ── MemoryStore ──────────────────────────────────────────────────────────────

struct StoredRecipe {
    id: i32,
    author_id: Uuid,
    recipe: ValidatedRecipe,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct Data {
    users: Vec<User>,
    ingredients: Vec<Ingredient>,
    tags: Vec<Tag>,
    recipes: Vec<StoredRecipe>,
    favorites: HashSet<(Uuid, i32)>,
    cart: HashSet<(Uuid, i32)>,
    follows: HashSet<(Uuid, Uuid)>,
}

impl Data {
    fn collection(&mut self, collection: RecipeCollection) -> &mut HashSet<(Uuid, i32)> {
        match collection {
            RecipeCollection::Favorites => &mut self.favorites,
            RecipeCollection::ShoppingCart => &mut self.cart,
        }
    }

    fn assemble(&self, stored: &StoredRecipe) -> Recipe {
        let author = self
            .users
            .iter()
            .find(|u| u.id == stored.author_id)
            .cloned()
            .expect("recipe author is seeded");
        let ingredients = stored
            .recipe
            .ingredients
            .iter()
            .filter_map(|item| {
                self.ingredients
                    .iter()
                    .find(|i| i.id == item.id)
                    .map(|i| RecipeIngredient {
                        ingredient: i.clone(),
                        amount: item.amount,
                    })
            })
            .collect();
        let tags = stored
            .recipe
            .tags
            .iter()
            .filter_map(|id| self.tags.iter().find(|t| t.id == *id).cloned())
            .collect();
        Recipe {
            id: stored.id,
            author,
            name: stored.recipe.name.clone(),
            text: stored.recipe.text.clone(),
            image: stored.recipe.image.clone(),
            cooking_time: stored.recipe.cooking_time,
            created_at: stored.created_at,
            ingredients,
            tags,
        }
    }
}

/// Shared in-memory storage implementing every repository trait.
///
/// Clones share state, so one store can back all repositories of a use case.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<Data>>,
    flag_lookups: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of viewer-flag lookups (collection membership or follow checks) made so far.
    pub fn flag_lookups(&self) -> usize {
        self.flag_lookups.load(Ordering::SeqCst)
    }

    pub fn seed_user(&self, username: &str) -> User {
        let user = User {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            first_name: username.to_owned(),
            last_name: "Tester".to_owned(),
            created_at: Utc::now(),
        };
        self.data.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn seed_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        let mut data = self.data.lock().unwrap();
        let ingredient = Ingredient {
            id: data.ingredients.len() as i32 + 1,
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        };
        data.ingredients.push(ingredient.clone());
        ingredient
    }

    pub fn seed_tag(&self, slug: &str) -> Tag {
        let mut data = self.data.lock().unwrap();
        let tag = Tag {
            id: data.tags.len() as i32 + 1,
            name: slug.to_owned(),
            color: Some("#49B64E".to_owned()),
            slug: slug.to_owned(),
        };
        data.tags.push(tag.clone());
        tag
    }

    pub fn remove_ingredient(&self, id: i32) {
        self.data
            .lock()
            .unwrap()
            .ingredients
            .retain(|i| i.id != id);
    }

    pub fn contains(&self, collection: RecipeCollection, user_id: Uuid, recipe_id: i32) -> bool {
        self.data
            .lock()
            .unwrap()
            .collection(collection)
            .contains(&(user_id, recipe_id))
    }

    pub fn recipe_count(&self) -> usize {
        self.data.lock().unwrap().recipes.len()
    }
}

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        let mut users = data.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(users, page))
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        if data
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RecipesServiceError::UserAlreadyExists);
        }
        data.users.push(user.clone());
        Ok(())
    }
}

impl IngredientRepository for MemoryStore {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        let prefix = name_prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = data
            .ingredients
            .iter()
            .filter(|i| {
                prefix
                    .as_deref()
                    .is_none_or(|p| i.name.to_lowercase().starts_with(p))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .ingredients
            .iter()
            .map(|i| i.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, RecipesServiceError> {
        Ok(self.seed_ingredient(&ingredient.name, &ingredient.measurement_unit))
    }
}

impl TagRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        Ok(self.data.lock().unwrap().tags.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .tags
            .iter()
            .map(|t| t.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        if data.tags.iter().any(|t| t.slug == tag.slug) {
            return Err(RecipesServiceError::TagAlreadyExists);
        }
        let created = Tag {
            id: data.tags.len() as i32 + 1,
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        };
        data.tags.push(created.clone());
        Ok(created)
    }
}

impl RecipeRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| data.assemble(r)))
    }

    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| data.assemble(r).summary()))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        let mut recipes: Vec<Recipe> = data
            .recipes
            .iter()
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .filter(|r| filter.favorited_by.is_none_or(|u| data.favorites.contains(&(u, r.id))))
            .filter(|r| filter.in_cart_of.is_none_or(|u| data.cart.contains(&(u, r.id))))
            .map(|r| data.assemble(r))
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || r.tags.iter().any(|t| filter.tag_slugs.contains(&t.slug))
            })
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(recipes, page))
    }

    async fn exists_by_author_and_name(
        &self,
        author_id: Uuid,
        name: &str,
    ) -> Result<bool, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .recipes
            .iter()
            .any(|r| r.author_id == author_id && r.recipe.name == name))
    }

    async fn create(
        &self,
        author_id: Uuid,
        recipe: &ValidatedRecipe,
    ) -> Result<i32, RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        if recipe
            .ingredients
            .iter()
            .any(|item| !data.ingredients.iter().any(|i| i.id == item.id))
        {
            return Err(RecipesServiceError::UnknownIngredient);
        }
        let id = data.recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        // Strictly increasing timestamps keep newest-first ordering deterministic.
        let created_at = Utc::now() + Duration::milliseconds(i64::from(id));
        data.recipes.push(StoredRecipe {
            id,
            author_id,
            recipe: recipe.clone(),
            created_at,
        });
        Ok(id)
    }

    async fn update(&self, id: i32, recipe: &ValidatedRecipe) -> Result<(), RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        let stored = data
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        stored.recipe = recipe.clone();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        let before = data.recipes.len();
        data.recipes.retain(|r| r.id != id);
        data.favorites.retain(|(_, r)| *r != id);
        data.cart.retain(|(_, r)| *r != id);
        Ok(data.recipes.len() < before)
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data.recipes.iter().filter(|r| r.author_id == author_id).count() as u64)
    }

    async fn list_summaries_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        let mut recipes: Vec<&StoredRecipe> = data
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let limit = limit.map_or(usize::MAX, |l| l as usize);
        Ok(recipes
            .into_iter()
            .take(limit)
            .map(|r| data.assemble(r).summary())
            .collect())
    }
}

impl RecipeCollectionRepository for MemoryStore {
    async fn add(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        Ok(data.collection(collection).insert((user_id, recipe_id)))
    }

    async fn remove(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        Ok(data.collection(collection).remove(&(user_id, recipe_id)))
    }

    async fn contained_ids(
        &self,
        collection: RecipeCollection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        self.flag_lookups.fetch_add(1, Ordering::SeqCst);
        let mut data = self.data.lock().unwrap();
        let entries = data.collection(collection);
        Ok(recipe_ids
            .iter()
            .copied()
            .filter(|id| entries.contains(&(user_id, *id)))
            .collect())
    }

    async fn aggregate_shopping_cart(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingListItem>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        let mut totals: HashMap<(String, String), i64> = HashMap::new();
        for stored in &data.recipes {
            if !data.cart.contains(&(user_id, stored.id)) {
                continue;
            }
            for item in data.assemble(stored).ingredients {
                *totals
                    .entry((item.ingredient.name, item.ingredient.measurement_unit))
                    .or_default() += i64::from(item.amount);
            }
        }
        Ok(totals
            .into_iter()
            .map(|((name, measurement_unit), total)| ShoppingListItem {
                name,
                measurement_unit,
                total,
            })
            .collect())
    }
}

impl FollowRepository for MemoryStore {
    async fn follow(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        Ok(data.follows.insert((follower_id, author_id)))
    }

    async fn unfollow(
        &self,
        follower_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let mut data = self.data.lock().unwrap();
        Ok(data.follows.remove(&(follower_id, author_id)))
    }

    async fn followed_ids(
        &self,
        follower_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        self.flag_lookups.fetch_add(1, Ordering::SeqCst);
        let data = self.data.lock().unwrap();
        Ok(author_ids
            .iter()
            .copied()
            .filter(|id| data.follows.contains(&(follower_id, *id)))
            .collect())
    }

    async fn list_authors(
        &self,
        follower_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError> {
        let data = self.data.lock().unwrap();
        let mut authors: Vec<User> = data
            .users
            .iter()
            .filter(|u| data.follows.contains(&(follower_id, u.id)))
            .cloned()
            .collect();
        authors.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(authors, page))
    }
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let page = page.clamped();
    let count = items.len() as u64;
    let results = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    Page::new(count, results)
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn actor(user: &User) -> Option<Actor> {
    Some(Actor {
        user_id: user.id,
        is_admin: false,
    })
}

pub fn admin_actor() -> Option<Actor> {
    Some(Actor {
        user_id: Uuid::now_v7(),
        is_admin: true,
    })
}

pub fn write_model(name: &str, ingredients: &[(i32, i32)], tags: &[i32]) -> RecipeWriteModel {
    RecipeWriteModel {
        name: name.to_owned(),
        text: "Смешать и приготовить.".to_owned(),
        image: "recipes/images/test.png".to_owned(),
        cooking_time: 15,
        ingredients: ingredients
            .iter()
            .map(|&(id, amount)| IngredientAmount { id, amount })
            .collect(),
        tags: tags.to_vec(),
    }
}
