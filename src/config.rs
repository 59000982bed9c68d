// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User settings kept in the `settings` table, with environment overrides
//! for the remote API.

use crate::analytics::{
    AnalyticsOptions, DEFAULT_TOP_K, DEFAULT_WINDOW_MONTHS, MAX_WINDOW_MONTHS,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use std::time::Duration;
use tracing::{info, warn};

pub const KEY_API_URL: &str = "api_url";
pub const KEY_API_TOKEN: &str = "api_token";
pub const KEY_WINDOW_MONTHS: &str = "window_months";
pub const KEY_TOP_K: &str = "top_k";
pub const KEY_TIMEOUT_SECS: &str = "timeout_secs";

pub const KNOWN_KEYS: [&str; 5] = [
    KEY_API_URL,
    KEY_API_TOKEN,
    KEY_WINDOW_MONTHS,
    KEY_TOP_K,
    KEY_TIMEOUT_SECS,
];

pub const ENV_API_URL: &str = "POCKETDASH_API_URL";
pub const ENV_API_TOKEN: &str = "POCKETDASH_API_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const MAX_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub window_months: usize,
    pub top_k: usize,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: None,
            api_token: None,
            window_months: DEFAULT_WINDOW_MONTHS,
            top_k: DEFAULT_TOP_K,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        Self::load_with_env(conn, |k| std::env::var(k).ok())
    }

    /// Reads stored settings; `env` is consulted for the API url and token
    /// and wins over the stored value when it returns a non-empty string.
    pub fn load_with_env<F>(conn: &Connection, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Settings::default();
        let from_env = |k: &str| env(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = match from_env(ENV_API_URL) {
            Some(v) => Some(v),
            None => get_setting(conn, KEY_API_URL)?,
        };
        let api_token = match from_env(ENV_API_TOKEN) {
            Some(v) => Some(v),
            None => get_setting(conn, KEY_API_TOKEN)?,
        };
        let window_months =
            stored_number(conn, KEY_WINDOW_MONTHS, d.window_months as u64)? as usize;
        let top_k = stored_number(conn, KEY_TOP_K, d.top_k as u64)? as usize;
        let timeout_secs = stored_number(conn, KEY_TIMEOUT_SECS, d.timeout_secs)?;
        Ok(Settings {
            api_url,
            api_token,
            window_months,
            top_k,
            timeout_secs,
        })
    }

    pub fn analytics_options(&self) -> AnalyticsOptions {
        AnalyticsOptions {
            window_months: self.window_months,
            top_k: self.top_k,
            ..AnalyticsOptions::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()
        .with_context(|| format!("Read setting '{}'", key))?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        KEY_WINDOW_MONTHS | KEY_TOP_K | KEY_TIMEOUT_SECS => {
            parse_bounded(key, value)?;
        }
        KEY_API_URL => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(anyhow!("Invalid api_url '{}', expected http(s)://...", value));
            }
        }
        KEY_API_TOKEN => {}
        _ => {
            return Err(anyhow!(
                "Unknown setting '{}' (known: {})",
                key,
                KNOWN_KEYS.join(", ")
            ));
        }
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    info!(key, "setting stored");
    Ok(())
}

pub fn unset_setting(conn: &Connection, key: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(n > 0)
}

/// Shows only the last four characters of a secret.
pub fn mask_secret(s: &str) -> String {
    let n = s.chars().count();
    if n <= 4 {
        return "*".repeat(n);
    }
    let tail: String = s.chars().skip(n - 4).collect();
    format!("{}{}", "*".repeat(n - 4), tail)
}

fn upper_bound(key: &str) -> u64 {
    match key {
        KEY_WINDOW_MONTHS => MAX_WINDOW_MONTHS as u64,
        KEY_TIMEOUT_SECS => MAX_TIMEOUT_SECS,
        _ => u32::MAX as u64,
    }
}

fn parse_bounded(key: &str, v: &str) -> Result<u64> {
    let n = v
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid {} '{}', expected a positive integer", key, v))?;
    let max = upper_bound(key);
    if n == 0 || n > max {
        return Err(anyhow!("Invalid {} '{}', must be between 1 and {}", key, v, max));
    }
    Ok(n)
}

// A value that no longer validates is ignored so the dashboard still runs.
fn stored_number(conn: &Connection, key: &str, default: u64) -> Result<u64> {
    match get_setting(conn, key)? {
        Some(v) => match parse_bounded(key, &v) {
            Ok(n) => Ok(n),
            Err(e) => {
                warn!(key, error = %e, "ignoring stored setting, using default");
                Ok(default)
            }
        },
        None => Ok(default),
    }
}
