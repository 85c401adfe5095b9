use std::path::{Path, PathBuf};
use std::sync::Arc;

use clinica_auth::client::AuthClient;
use clinica_storage::rest::RestBackend;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::notify::Notifier;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

pub const BACKEND_URL_VAR: &str = "CLINICA_BACKEND_URL";
pub const ANON_KEY_VAR: &str = "CLINICA_ANON_KEY";

const FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Base URL of the hosted project, e.g. `https://xyz.supabase.co`.
    pub backend_url: String,
    pub anon_key: String,
    /// IANA name the calendar renders in. Added in v1; `None` means the
    /// system zone.
    #[serde(default)]
    pub time_zone: Option<String>,
    pub created_at: jiff::Timestamp,
}

/// Redacted config info safe to show on screen or in logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub backend_url: String,
    pub anon_key_hint: String,
    pub time_zone: String,
    pub created_at: String,
}

impl ClinicaConfig {
    pub fn new(backend_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            backend_url: backend_url.into(),
            anon_key: anon_key.into(),
            time_zone: None,
            created_at: jiff::Timestamp::now(),
        }
    }

    /// Build a config from `CLINICA_BACKEND_URL` and `CLINICA_ANON_KEY`.
    pub fn from_env() -> eyre::Result<Self> {
        let backend_url = std::env::var(BACKEND_URL_VAR)
            .map_err(|_| eyre::eyre!("{BACKEND_URL_VAR} is not set"))?;
        let anon_key =
            std::env::var(ANON_KEY_VAR).map_err(|_| eyre::eyre!("{ANON_KEY_VAR} is not set"))?;
        Ok(Self::new(backend_url, anon_key))
    }

    /// Overlay whichever of the environment variables are set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BACKEND_URL_VAR) {
            self.backend_url = url;
        }
        if let Ok(key) = std::env::var(ANON_KEY_VAR) {
            self.anon_key = key;
        }
        self
    }

    /// The configured zone, falling back to the system zone.
    pub fn time_zone(&self) -> eyre::Result<TimeZone> {
        match self.time_zone.as_deref() {
            Some(name) => TimeZone::get(name)
                .map_err(|e| eyre::eyre!("unknown time zone {name:?}: {e}")),
            None => Ok(TimeZone::system()),
        }
    }
}

/// Build a context wired to the hosted backend and identity provider
/// named in `config`. No request is made until the first operation.
pub fn connect(
    config: &ClinicaConfig,
    notifier: Arc<dyn Notifier>,
) -> eyre::Result<AppContext<RestBackend, AuthClient>> {
    let backend = RestBackend::new(&config.backend_url, &config.anon_key)?;
    let auth = AuthClient::new(&config.backend_url, &config.anon_key)?;
    let time_zone = config.time_zone()?;
    tracing::info!(backend_url = %config.backend_url, "connecting to backend");
    Ok(AppContext::new(Arc::new(backend), Arc::new(auth), notifier).with_time_zone(time_zone))
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.clinica.app"))
}

pub fn has_config() -> bool {
    config_dir()
        .map(|dir| dir.join(FILE_NAME).exists())
        .unwrap_or(false)
}

pub fn load_config() -> eyre::Result<ClinicaConfig> {
    load_config_from(&config_dir()?)
}

pub fn save_config(config: &ClinicaConfig) -> eyre::Result<()> {
    save_config_to(&config_dir()?, config)
}

pub fn delete_config() -> eyre::Result<()> {
    delete_config_in(&config_dir()?)
}

pub fn load_config_from(dir: &Path) -> eyre::Result<ClinicaConfig> {
    let path = dir.join(FILE_NAME);
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so migrations run before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    // Versions past u32 are clamped so the "too new" check refuses them.
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(v) => u32::try_from(v).unwrap_or(u32::MAX),
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: ClinicaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: add time_zone (null, meaning the system zone)
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("time_zone").or_insert(serde_json::Value::Null);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added time_zone)");
    }

    Ok(json)
}

pub fn save_config_to(dir: &Path, config: &ClinicaConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join(FILE_NAME);
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config_in(dir: &Path) -> eyre::Result<()> {
    let path = dir.join(FILE_NAME);
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}

pub fn config_info(config: &ClinicaConfig) -> ConfigInfo {
    ConfigInfo {
        backend_url: config.backend_url.clone(),
        anon_key_hint: redact_key(&config.anon_key),
        time_zone: config
            .time_zone
            .clone()
            .unwrap_or_else(|| "system".to_string()),
        created_at: config.created_at.to_string(),
    }
}

fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
