//! Config file and data file wiring, end to end.

use std::fs;

use folio_config::{ConfigError, ENV_BUILD_MODE, ENV_DATA_PATH, FolioConfig};
use folio_engine::{App, BuildMode, DataSource, FileSource, demo_snapshot};
use tempfile::tempdir;

#[test]
fn missing_config_file_is_not_an_error() {
    let dir = tempdir().unwrap();
    let loaded = FolioConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn config_file_drives_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[app]
env = "production"
ascii_only = true

[features]
export = false

[data]
source = "file"
path = "/srv/folio/portfolio.json"
"#,
    )
    .unwrap();

    let settings = FolioConfig::load_from(&path)
        .unwrap()
        .unwrap()
        .resolve_with(|_| None);

    assert_eq!(settings.build_mode, BuildMode::Production);
    assert!(settings.ui.ascii_only);
    assert!(!settings.features.export);
    assert!(settings.features.analytics);
    assert_eq!(
        settings.data,
        DataSource::File("/srv/folio/portfolio.json".into())
    );
}

#[test]
fn env_overrides_beat_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[app]\nenv = \"production\"\n").unwrap();
    let config = FolioConfig::load_from(&path).unwrap().unwrap();

    let settings = config.resolve_with(|key| match key {
        ENV_BUILD_MODE => Some("test".to_string()),
        ENV_DATA_PATH => Some("/tmp/other.json".to_string()),
        _ => None,
    });

    assert_eq!(settings.build_mode, BuildMode::Test);
    assert_eq!(settings.data, DataSource::File("/tmp/other.json".into()));
}

#[test]
fn malformed_config_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[app\nenv = ").unwrap();

    let err = FolioConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), path.as_path());
}

#[test]
fn exported_snapshot_loads_back_as_a_data_file() {
    let dir = tempdir().unwrap();
    let export_path = dir.path().join("exports").join("portfolio.json");

    let mut app = crate::common::demo_app();
    let written = app.export_snapshot(&export_path).unwrap();
    assert_eq!(written, export_path);

    let settings = FolioConfig::default().resolve_with(|key| {
        (key == ENV_DATA_PATH).then(|| export_path.display().to_string())
    });
    let DataSource::File(data_path) = &settings.data else {
        panic!("expected a file source, got {:?}", settings.data);
    };
    let reloaded = App::new(settings.clone(), Box::new(FileSource::new(data_path.clone())));

    assert!(reloaded.status().is_none());
    assert_eq!(reloaded.snapshot().portfolio, demo_snapshot().portfolio);
    assert_eq!(reloaded.snapshot().tags, demo_snapshot().tags);
}
