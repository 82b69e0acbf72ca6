/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` and call `Config::from_env()` at startup.
/// Field names map to upper-cased env vars (`database_url` ⇒ `DATABASE_URL`).
///
/// # Panics
///
/// Panics if any required env var is missing or cannot be deserialized.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        Self::from_iter(std::env::vars())
    }

    /// Load from an explicit set of key/value pairs. Used by `from_env` and tests.
    fn from_iter<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars).expect("failed to load config from environment")
    }
}
