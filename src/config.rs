//! Server configuration, loaded from environment variables.
//!
//! Every knob has a default, so a bare `cargo run` serves a seeded
//! 600x400 canvas from `./data`. Unparseable values fall back to the
//! default rather than aborting startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use canvas::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MIN_SIZE};
use canvas::rect::{Bounds, Constraints};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_UPDATE_DELAY_MS: u64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding `{key}.json` records.
    pub data_dir: PathBuf,
    /// Artificial latency applied to every `PUT` before validation.
    pub update_delay: Duration,
    pub min_size: i64,
    pub enforce_width_le_height: bool,
    /// Write the seed record at startup if none exists.
    pub seed_on_start: bool,
    /// Canvas bounds used for the seed record.
    pub canvas: Bounds,
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            data_dir: std::env::var("DATA_DIR").map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            update_delay: Duration::from_millis(env_parse("UPDATE_DELAY_MS", DEFAULT_UPDATE_DELAY_MS)),
            min_size: env_parse("MIN_SIZE", MIN_SIZE),
            enforce_width_le_height: env_parse("ENFORCE_WIDTH_LE_HEIGHT", false),
            seed_on_start: env_parse("SEED_ON_START", true),
            canvas: Bounds::new(
                env_parse("CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH),
                env_parse("CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT),
            ),
        }
    }

    #[must_use]
    pub fn constraints(&self) -> Constraints {
        Constraints::new(self.min_size).with_width_not_exceeding_height(self.enforce_width_le_height)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            update_delay: Duration::from_millis(DEFAULT_UPDATE_DELAY_MS),
            min_size: MIN_SIZE,
            enforce_width_le_height: false,
            seed_on_start: true,
            canvas: Bounds::default(),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
