//! Typed client settings read from the merged config tree.
//!
//! Env overrides go through a lookup closure so callers (and tests) decide
//! where values come from. The CLI passes `std::env::var`.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_SESSION_PATH: &str = ".rom/session.json";

pub const ENV_BASE_URL: &str = "ROM_API_BASE_URL";
pub const ENV_SESSION_PATH: &str = "ROM_SESSION_PATH";
pub const ENV_DEGRADED_MODE: &str = "ROM_DEGRADED_MODE";

/// What read calls do when the backend is unreachable or errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegradedMode {
    /// Surface the error.
    #[default]
    Fail,
    /// Substitute the fixed placeholder set, labelled as such.
    Placeholder,
}

impl DegradedMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(DegradedMode::Fail),
            "placeholder" => Ok(DegradedMode::Placeholder),
            other => bail!("invalid degraded_mode.policy '{other}' (expected fail|placeholder)"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DegradedMode::Fail => "fail",
            DegradedMode::Placeholder => "placeholder",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    /// None = transport default.
    pub timeout: Option<Duration>,
    pub session_path: PathBuf,
    pub degraded_mode: DegradedMode,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            degraded_mode: DegradedMode::Fail,
        }
    }
}

impl ClientSettings {
    pub fn from_config_json(config: &Value) -> Result<Self> {
        let mut s = Self::default();

        if let Some(v) = config.pointer("/api/base_url") {
            s.base_url = v
                .as_str()
                .context("api.base_url must be a string")?
                .trim_end_matches('/')
                .to_string();
        }
        if let Some(v) = config.pointer("/api/timeout_secs") {
            if !v.is_null() {
                let secs = v
                    .as_u64()
                    .context("api.timeout_secs must be a non-negative integer")?;
                if secs == 0 {
                    bail!("api.timeout_secs must be > 0");
                }
                s.timeout = Some(Duration::from_secs(secs));
            }
        }
        if let Some(v) = config.pointer("/session/path") {
            s.session_path = PathBuf::from(v.as_str().context("session.path must be a string")?);
        }
        if let Some(v) = config.pointer("/degraded_mode/policy") {
            s.degraded_mode =
                DegradedMode::parse(v.as_str().context("degraded_mode.policy must be a string")?)?;
        }

        if s.base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        Ok(s)
    }

    /// Apply `ROM_*` overrides. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(path) = get(ENV_SESSION_PATH) {
            self.session_path = PathBuf::from(path.trim());
        }
        if let Some(mode) = get(ENV_DEGRADED_MODE) {
            self.degraded_mode =
                DegradedMode::parse(&mode).with_context(|| format!("{ENV_DEGRADED_MODE} override"))?;
        }
        Ok(())
    }
}
