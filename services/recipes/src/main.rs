use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use foodgram_core::config::Config;
use foodgram_core::tracing::init_tracing;
use foodgram_recipes::config::RecipesConfig;
use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;
use foodgram_recipes_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = RecipesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("migrations applied");
    }

    let router = build_router(AppState { db });
    let addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("recipes service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
