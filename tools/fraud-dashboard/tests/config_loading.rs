use fraud_dashboard::config::{load_config, AppConfig, CliOverrides};
use fraud_dashboard::errors::DashboardError;
use fraud_dashboard::runtime::ProductionFileSystem;
use std::path::{Path, PathBuf};

fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn fixture_config_resolves_document_against_working_dir() {
    let overrides = CliOverrides {
        config_path: Some(PathBuf::from("tests/fixtures/configs/two-models.toml")),
        ..CliOverrides::default()
    };
    let cfg = load_config(&overrides, manifest_dir(), &ProductionFileSystem).expect("config");
    assert_eq!(
        cfg.document.path,
        Some(manifest_dir().join("tests/fixtures/documents/two-models.json"))
    );
    assert_eq!((cfg.render.width, cfg.render.height), (132, 50));
    assert!(!cfg.logging.enabled);
}

#[test]
fn cli_flags_override_the_file() {
    let overrides = CliOverrides {
        config_path: Some(PathBuf::from("tests/fixtures/configs/minimal.toml")),
        document_path: Some(PathBuf::from("/tmp/elsewhere.json")),
        width: Some(90),
        height: None,
    };
    let cfg = load_config(&overrides, manifest_dir(), &ProductionFileSystem).expect("config");
    assert_eq!(cfg.document.path, Some(PathBuf::from("/tmp/elsewhere.json")));
    assert_eq!(cfg.render.width, 90);
    assert_eq!(cfg.render.height, AppConfig::default().render.height);
}

#[test]
fn tiny_payload_limit_is_rejected_when_logging() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dash.toml");
    std::fs::write(&path, "[logging]\nmax_payload_bytes = 8\n").expect("write");
    let overrides = CliOverrides {
        config_path: Some(path),
        ..CliOverrides::default()
    };
    assert!(matches!(
        load_config(&overrides, dir.path(), &ProductionFileSystem),
        Err(DashboardError::InvalidConfig(_))
    ));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let overrides = CliOverrides {
        config_path: Some(PathBuf::from("tests/fixtures/configs/absent.toml")),
        ..CliOverrides::default()
    };
    assert!(matches!(
        load_config(&overrides, manifest_dir(), &ProductionFileSystem),
        Err(DashboardError::Io(_))
    ));
}
