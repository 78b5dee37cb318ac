/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (with `#[serde(default = ...)]` on
/// optional settings) and call `Config::from_env()` once at startup.
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Load from the process environment.
    ///
    /// # Panics
    ///
    /// Panics if a required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        envy::from_env().expect("failed to load config from environment")
    }

    /// Load from explicit key/value pairs instead of the process environment.
    fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }
}
