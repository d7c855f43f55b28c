use campus_domain::config::{ApiConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "campus");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_none());
    assert!(!db.seed);

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.dir.is_none());
}

#[test]
fn api_config_deserializes_partial_sections() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": {
            "url": "ws://db:8000",
            "credentials": { "username": "root", "password": "secret" },
            "seed": true
        },

        "logging": { "level": "debug", "dir": "/var/log/campus" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.url, "ws://db:8000");
    assert_eq!(cfg.database.namespace, "campus");
    assert!(cfg.database.seed);
    assert_eq!(cfg.database.credentials.as_ref().map(|c| c.username.as_str()), Some("root"));
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.max_files, 7);
}

#[test]
fn deref_mut_copies_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 9000;

    assert_eq!(original.server.port, 4583);
    assert_eq!(changed.server.port, 9000);
}
