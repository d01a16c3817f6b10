use crate::data::UserId;

pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime settings, read from the environment.
///
/// # Environment Variables
/// - `POSTBOARD_API_BASE`: root of the posts API (default: JSONPlaceholder)
/// - `POSTBOARD_DEFAULT_USER`: author shown for the placeholder selection (default: 1)
/// - `POSTBOARD_ADDR`: address to serve on (default: `0.0.0.0:3000` in debug
///   builds, `0.0.0.0:80` otherwise)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub default_user: UserId,
    pub addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_user = match lookup("POSTBOARD_DEFAULT_USER") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "POSTBOARD_DEFAULT_USER",
                value,
            })?,
            None => UserId(1),
        };

        Ok(Self {
            api_base: lookup("POSTBOARD_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
            default_user,
            addr: lookup("POSTBOARD_ADDR").unwrap_or_else(|| default_addr().into()),
        })
    }
}

#[cfg(debug_assertions)]
fn default_addr() -> &'static str {
    "0.0.0.0:3000"
}

#[cfg(not(debug_assertions))]
fn default_addr() -> &'static str {
    "0.0.0.0:80"
}
