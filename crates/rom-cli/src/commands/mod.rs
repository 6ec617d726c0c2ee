//! Command handler modules for the `rom` CLI.
//!
//! Shared setup (settings, session, API client) lives here.
//! Command-specific logic lives in the submodules.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod orders;
pub mod products;

use anyhow::{Context, Result};
use rom_client::{ApiClient, Origin, Session, SessionStore};
use rom_config::{ClientSettings, UnusedKeyPolicy};
use tracing::warn;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Settings from layered config (if any) plus `ROM_*` env overrides.
pub fn load_settings(config_paths: &[String]) -> Result<ClientSettings> {
    let mut settings = if config_paths.is_empty() {
        ClientSettings::default()
    } else {
        let loaded = rom_config::load_layered_yaml(config_paths)?;
        let report = rom_config::report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
        if !report.is_clean() {
            warn!(keys = ?report.unused_leaf_pointers, "unused config keys");
        }
        ClientSettings::from_config_json(&loaded.config_json)?
    };
    settings.apply_env_overrides(|k| std::env::var(k).ok())?;
    Ok(settings)
}

/// Everything a networked command needs.
pub struct Ctx {
    pub settings: ClientSettings,
    pub api: ApiClient,
    pub session: Session,
}

impl Ctx {
    pub fn load(config_paths: &[String]) -> Result<Self> {
        let settings = load_settings(config_paths)?;
        let api = ApiClient::from_settings(&settings).context("http client setup failed")?;
        let session = Session::load(SessionStore::new(&settings.session_path));
        Ok(Self {
            settings,
            api,
            session,
        })
    }
}

/// Announce substituted data before printing it.
pub fn print_origin(origin: &Origin) {
    if let Origin::Placeholder { reason } = origin {
        println!("source=placeholder reason={reason:?}");
    }
}
