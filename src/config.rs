//! Runtime configuration from environment variables
//!
//! Every option has a baked-in default so the binary runs with no setup.
//! Unparseable or out-of-range overrides are logged and replaced by the
//! default instead of aborting startup.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::model::backend::DEFAULT_BASE_URL;
use crate::model::swipe::SwipeConfig;

pub const ENV_API_URL: &str = "NOWNOISE_API_URL";
pub const ENV_SWIPE_THRESHOLD: &str = "NOWNOISE_SWIPE_THRESHOLD";
pub const ENV_EXIT_ROTATION: &str = "NOWNOISE_EXIT_ROTATION";
pub const ENV_COMMIT_MS: &str = "NOWNOISE_COMMIT_MS";
pub const ENV_DEMO_DELAY_MS: &str = "NOWNOISE_DEMO_DELAY_MS";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub swipe: SwipeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            swipe: SwipeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        let defaults = SwipeConfig::default();
        let threshold_fraction = fraction_or(
            ENV_SWIPE_THRESHOLD,
            env::var(ENV_SWIPE_THRESHOLD).ok(),
            defaults.threshold_fraction,
        );
        let exit_rotation_deg = parsed_or(
            ENV_EXIT_ROTATION,
            env::var(ENV_EXIT_ROTATION).ok(),
            defaults.exit_rotation_deg,
        );
        let commit_ms = parsed_or(
            ENV_COMMIT_MS,
            env::var(ENV_COMMIT_MS).ok(),
            defaults.commit_duration.as_millis() as u64,
        );
        let demo_delay_ms = parsed_or(
            ENV_DEMO_DELAY_MS,
            env::var(ENV_DEMO_DELAY_MS).ok(),
            defaults.demo_delay.as_millis() as u64,
        );
        Self {
            api_base_url: env::var(ENV_API_URL)
                .ok()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            swipe: SwipeConfig {
                threshold_fraction,
                exit_rotation_deg,
                commit_duration: Duration::from_millis(commit_ms),
                demo_delay: Duration::from_millis(demo_delay_ms),
            },
        }
    }
}

fn parsed_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy + fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, %default, "unparseable override, using default");
            default
        }
    }
}

/// Like `parsed_or`, but the threshold must stay a usable fraction of the
/// viewport. A threshold at or past the edge would make commits impossible.
fn fraction_or(key: &str, raw: Option<String>, default: f32) -> f32 {
    let value = parsed_or(key, raw, default);
    if (0.01..=0.95).contains(&value) {
        value
    } else {
        tracing::warn!(key, value, %default, "threshold out of range, using default");
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_feel() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.swipe.threshold_fraction, 0.3);
        assert_eq!(config.swipe.exit_rotation_deg, 30.0);
        assert_eq!(config.swipe.commit_duration, Duration::from_millis(300));
        assert_eq!(config.swipe.demo_delay, Duration::from_millis(1500));
    }

    #[test]
    fn overrides_parse_and_trim() {
        assert_eq!(parsed_or("K", Some(" 0.45 ".to_string()), 0.3_f32), 0.45);
        assert_eq!(parsed_or("K", Some("250".to_string()), 300_u64), 250);
        assert_eq!(parsed_or("K", None, 300_u64), 300);
    }

    #[test]
    fn garbage_falls_back_to_default() {
        assert_eq!(parsed_or("K", Some("fast".to_string()), 300_u64), 300);
        assert_eq!(parsed_or("K", Some("".to_string()), 0.3_f32), 0.3);
    }

    #[test]
    fn threshold_range_is_enforced() {
        assert_eq!(fraction_or("K", Some("0.5".to_string()), 0.3), 0.5);
        assert_eq!(fraction_or("K", Some("1.5".to_string()), 0.3), 0.3);
        assert_eq!(fraction_or("K", Some("0".to_string()), 0.3), 0.3);
        assert_eq!(fraction_or("K", Some("-0.2".to_string()), 0.3), 0.3);
    }
}
