use std::io::Write;
use std::path::{Path, PathBuf};

use zora::config::{AnnotatorConfig, Config};

#[test]
fn test_missing_config_file_gives_defaults() {
    let config = Config::load(Path::new("/no/such/zora.json")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.listen_addr, "127.0.0.1:5003");
    assert_eq!(config.ontology_path, PathBuf::from("ontology/zora.json"));
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_partial_config_fills_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "annotator": {{ "kind": "command", "program": "corenlp-cli", "args": ["--json"] }}, "log_filter": "zora=debug" }}"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();

    assert_eq!(
        config.annotator,
        AnnotatorConfig::Command {
            program: "corenlp-cli".to_string(),
            args: vec!["--json".to_string()],
        }
    );
    assert_eq!(config.log_filter, "zora=debug");
    assert_eq!(config.listen_addr, "127.0.0.1:5003");
}

#[test]
fn test_http_annotator_defaults() {
    let config: Config = serde_json::from_str(r#"{ "annotator": { "kind": "http" } }"#).unwrap();

    assert_eq!(
        config.annotator,
        AnnotatorConfig::Http {
            url: "http://localhost:9000".to_string(),
            timeout_ms: 15_000,
        }
    );
}

#[test]
fn test_invalid_config_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    assert!(Config::load(file.path()).is_err());
}

#[test]
fn test_open_session_with_command_annotator() {
    let config = Config {
        ontology_path: Path::new(env!("CARGO_MANIFEST_DIR")).join("ontology/zora.json"),
        annotator: AnnotatorConfig::Command {
            program: "true".to_string(),
            args: Vec::new(),
        },
        ..Config::default()
    };

    let session = config.open_session().unwrap();
    assert!(session.state().pose().is_default());
}
