use std::sync::Arc;

use clinica_app::config::{
    config_info, connect, delete_config_in, load_config_from, migrate, save_config_to,
    ClinicaConfig, ANON_KEY_VAR, BACKEND_URL_VAR, CURRENT_VERSION,
};
use clinica_app::notify::LogNotifier;
use serde_json::json;

#[test]
fn v0_config_gains_time_zone_and_version() {
    let legacy = json!({
        "backend_url": "https://abc.supabase.co",
        "anon_key": "anon",
        "created_at": "2026-01-01T00:00:00Z",
    });

    let migrated = migrate(legacy, 0).unwrap();

    assert_eq!(migrated["config_version"], 1);
    assert!(migrated["time_zone"].is_null());
    let config: ClinicaConfig = serde_json::from_value(migrated).unwrap();
    assert_eq!(config.time_zone, None);
}

#[test]
fn newer_config_is_refused() {
    let err = migrate(json!({}), CURRENT_VERSION + 1).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn save_then_load_stamps_the_current_version() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("com.clinica.app");
    let mut config = ClinicaConfig::new("https://abc.supabase.co", "anon-key-value");
    config.config_version = 0;
    config.time_zone = Some("America/Sao_Paulo".to_string());

    save_config_to(&dir, &config).unwrap();
    let loaded = load_config_from(&dir).unwrap();

    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.backend_url, config.backend_url);
    assert_eq!(loaded.time_zone.as_deref(), Some("America/Sao_Paulo"));
    assert!(!dir.join("config.json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(dir.join("config.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    delete_config_in(&dir).unwrap();
    assert!(load_config_from(&dir).is_err());
}

#[test]
fn legacy_file_on_disk_is_migrated_on_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"backend_url":"https://abc.supabase.co","anon_key":"k","created_at":"2026-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let loaded = load_config_from(dir.path()).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.time_zone, None);
}

#[test]
fn info_redacts_the_anon_key() {
    let config = ClinicaConfig::new("https://abc.supabase.co", "eyJhbGciOiJIUzI1NiJ9.payload.sig");
    let info = config_info(&config);
    assert_eq!(info.anon_key_hint, "eyJh....sig");
    assert_eq!(info.time_zone, "system");

    let short = ClinicaConfig::new("https://abc.supabase.co", "short");
    assert_eq!(config_info(&short).anon_key_hint, "****");
}

#[test]
fn unknown_time_zone_is_an_error() {
    let mut config = ClinicaConfig::new("https://abc.supabase.co", "k");
    config.time_zone = Some("Mars/Olympus_Mons".to_string());
    assert!(config.time_zone().is_err());

    config.time_zone = Some("UTC".to_string());
    assert!(config.time_zone().is_ok());
}

#[test]
fn version_past_u32_is_refused_on_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"config_version":4294967297,"backend_url":"https://abc.supabase.co","anon_key":"k","created_at":"2026-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let err = load_config_from(dir.path()).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

// The only test in this binary that touches the process environment.
#[test]
fn environment_variables_build_and_override_the_config() {
    unsafe {
        std::env::remove_var(BACKEND_URL_VAR);
        std::env::remove_var(ANON_KEY_VAR);
    }
    let err = ClinicaConfig::from_env().unwrap_err();
    assert_eq!(err.to_string(), "CLINICA_BACKEND_URL is not set");

    unsafe { std::env::set_var(BACKEND_URL_VAR, "https://env.supabase.co") };
    let err = ClinicaConfig::from_env().unwrap_err();
    assert_eq!(err.to_string(), "CLINICA_ANON_KEY is not set");

    let file = ClinicaConfig::new("https://file.supabase.co", "file-key");
    let overridden = file.clone().with_env_overrides();
    assert_eq!(overridden.backend_url, "https://env.supabase.co");
    assert_eq!(overridden.anon_key, "file-key");

    unsafe { std::env::set_var(ANON_KEY_VAR, "env-key") };
    let from_env = ClinicaConfig::from_env().unwrap();
    assert_eq!(from_env.backend_url, "https://env.supabase.co");
    assert_eq!(from_env.anon_key, "env-key");
    assert_eq!(from_env.config_version, CURRENT_VERSION);
    assert_eq!(file.with_env_overrides().anon_key, "env-key");

    unsafe {
        std::env::remove_var(BACKEND_URL_VAR);
        std::env::remove_var(ANON_KEY_VAR);
    }
}

#[test]
fn connect_wires_the_configured_zone_without_network() {
    let mut config = ClinicaConfig::new("http://127.0.0.1:1", "anon-key-value");
    config.time_zone = Some("UTC".to_string());

    let ctx = connect(&config, Arc::new(LogNotifier)).unwrap();
    assert_eq!(ctx.time_zone().iana_name(), Some("UTC"));
    assert!(!ctx.session().is_authenticated());

    let bad_key = ClinicaConfig::new("http://127.0.0.1:1", "bad\nkey");
    assert!(connect(&bad_key, Arc::new(LogNotifier)).is_err());

    config.time_zone = Some("Mars/Olympus_Mons".to_string());
    assert!(connect(&config, Arc::new(LogNotifier)).is_err());
}
