use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use tower::ServiceBuilder;

use foodgram_core::health::{database_ready, healthz};
use foodgram_core::middleware::{request_id_layer, trace_layer};

use crate::handlers::{
    collection::{
        add_favorite, add_to_shopping_cart, download_shopping_cart, remove_favorite,
        remove_from_shopping_cart,
    },
    ingredient::{create_ingredient, get_ingredient, list_ingredients},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    subscription::{list_subscriptions, subscribe, unsubscribe},
    tag::{create_tag, get_tag, list_tags},
    user::{get_me, get_user, list_users, register_user},
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users and subscriptions
        .route("/api/users", get(list_users).post(register_user))
        .route("/api/users/me", get(get_me))
        .route("/api/users/subscriptions", get(list_subscriptions))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}/subscribe", post(subscribe).delete(unsubscribe))
        // Reference data
        .route(
            "/api/ingredients",
            get(list_ingredients).post(create_ingredient),
        )
        .route("/api/ingredients/{id}", get(get_ingredient))
        .route("/api/tags", get(list_tags).post(create_tag))
        .route("/api/tags/{id}", get(get_tag))
        // Recipes
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/download_shopping_cart",
            get(download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route(
            "/api/recipes/{id}/favorite",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart",
            post(add_to_shopping_cart).delete(remove_from_shopping_cart),
        )
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer()),
        )
        .with_state(state)
}
