use serde::Deserialize;

use foodgram_core::config::Config;

/// Recipes service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `RECIPES_PORT`.
    #[serde(default = "default_recipes_port")]
    pub recipes_port: u16,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_recipes_port() -> u16 {
    3114
}

impl Config for RecipesConfig {}
