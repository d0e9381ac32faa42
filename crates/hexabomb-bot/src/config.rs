//! Bot configuration, read from environment variables.
//!
//! | Variable       | Meaning                                   | Default     |
//! |----------------|-------------------------------------------|-------------|
//! | `BOT_NICKNAME` | Nickname sent at login                    | `rs-player` |
//! | `BOT_SEED`     | Seed for the action policy's random source | entropy     |
//! | `BOT_INPUT`    | File of server messages, one per line     | stdin       |

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_NICKNAME: &str = "rs-player";

/// netorcai rejects nicknames longer than this
pub const MAX_NICKNAME_LEN: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid nickname {0:?}: expected 1 to 10 non-whitespace characters")]
    InvalidNickname(String),

    #[error("invalid BOT_SEED {0:?}: expected an unsigned integer")]
    InvalidSeed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub nickname: String,
    pub seed: Option<u64>,
    pub input: Option<PathBuf>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            nickname: DEFAULT_NICKNAME.to_string(),
            seed: None,
            input: None,
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset and empty values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let nickname = get("BOT_NICKNAME").unwrap_or_else(|| DEFAULT_NICKNAME.to_string());
        validate_nickname(&nickname)?;

        let seed = get("BOT_SEED")
            .map(|raw| raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidSeed(raw)))
            .transpose()?;

        Ok(Self {
            nickname,
            seed,
            input: get("BOT_INPUT").map(PathBuf::from),
        })
    }
}

fn validate_nickname(nickname: &str) -> Result<(), ConfigError> {
    let len = nickname.chars().count();
    if len == 0 || len > MAX_NICKNAME_LEN || nickname.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidNickname(nickname.to_string()));
    }
    Ok(())
}
