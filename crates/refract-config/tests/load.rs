//! Loading the configuration document from disk.

use refract_config::{ConfigError, Configuration};
use std::io::Write;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
routes:
  /things:
    transform: '{{ids: $ids, things: .}}'
    backend: http://things.internal:8081/all
"#
    )
    .unwrap();

    let config = Configuration::from_path(file.path()).unwrap();
    assert_eq!(config.routes.len(), 1);
    assert_eq!(
        config.routes["/things"].backend.url().as_str(),
        "http://things.internal:8081/all"
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Configuration::from_path(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_file_is_yaml_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "routes: [not, a, mapping]").unwrap();
    let err = Configuration::from_path(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}
