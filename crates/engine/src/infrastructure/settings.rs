//! Bot settings loaded from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `POKEBOT_PREFIX` | `p!` |
//! | `POKEBOT_PAGE_SIZE` | `20` |
//! | `POKEBOT_PAGINATION_TIMEOUT_SECS` | `120` |
//! | `POKEBOT_CONFIRM_TIMEOUT_SECS` | `15` |
//! | `POKEBOT_CATALOG_PATH` | bundled catalog |
//! | `POKEBOT_USER_ID` | `1` |
//! | `POKEBOT_CHANNEL_ID` | `1` |

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use pokebot_domain::{ChannelId, UserId};

pub const DEFAULT_PREFIX: &str = "p!";
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const DEFAULT_PAGINATION_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    pub prefix: String,
    pub page_size: u64,
    pub pagination_timeout: Duration,
    pub confirm_timeout: Duration,
    pub catalog_path: Option<PathBuf>,
    /// Identity the console adapter speaks as
    pub console_user: UserId,
    pub console_channel: ChannelId,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            pagination_timeout: Duration::from_secs(DEFAULT_PAGINATION_TIMEOUT_SECS),
            confirm_timeout: Duration::from_secs(DEFAULT_CONFIRM_TIMEOUT_SECS),
            catalog_path: None,
            console_user: UserId::new(1),
            console_channel: ChannelId::new(1),
        }
    }
}

impl BotSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let page_size = parse_or(&get, "POKEBOT_PAGE_SIZE", defaults.page_size);
        let page_size = if page_size == 0 {
            tracing::warn!("POKEBOT_PAGE_SIZE must be positive, using default");
            defaults.page_size
        } else {
            page_size
        };

        Self {
            prefix: get("POKEBOT_PREFIX").unwrap_or(defaults.prefix),
            page_size,
            pagination_timeout: Duration::from_secs(parse_or(
                &get,
                "POKEBOT_PAGINATION_TIMEOUT_SECS",
                DEFAULT_PAGINATION_TIMEOUT_SECS,
            )),
            confirm_timeout: Duration::from_secs(parse_or(
                &get,
                "POKEBOT_CONFIRM_TIMEOUT_SECS",
                DEFAULT_CONFIRM_TIMEOUT_SECS,
            )),
            catalog_path: get("POKEBOT_CATALOG_PATH").map(PathBuf::from),
            console_user: UserId::new(parse_or(&get, "POKEBOT_USER_ID", defaults.console_user.get())),
            console_channel: ChannelId::new(parse_or(
                &get,
                "POKEBOT_CHANNEL_ID",
                defaults.console_channel.get(),
            )),
        }
    }
}

fn parse_or<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match get(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid setting, using default");
            default
        }),
    }
}

/// Load `.env.local` then `.env` from the repository root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
