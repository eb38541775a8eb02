mod common;

use std::io::Write;
use std::path::Path;

use common::*;
use zora::error::PipelineError;
use zora::kernel::{ActionCode, ActionComponents, OperatingMode, Rgb, Side, Subsystem};
use zora::knowledge::{Incompatibility, KnowledgeBase, OntologyStore};

fn codes(found: Vec<ActionCode>) -> Vec<String> {
    found.iter().map(ToString::to_string).collect()
}

fn code(raw: &str) -> ActionCode {
    ActionCode::parse(raw).unwrap()
}

#[test]
fn test_single_lookup_wildcards() {
    let store = store();

    assert_eq!(codes(store.single_actions("raise", "arm", Some(Side::Right)).unwrap()), vec!["AR-0"]);
    assert_eq!(codes(store.single_actions("raise", "arm", None).unwrap()), vec!["AL-0", "AR-0"]);
    assert_eq!(
        codes(store.single_actions("raise", "", None).unwrap()),
        vec!["AL-0", "AR-0", "HH-0"],
        "Empty object matches every part"
    );
    assert_eq!(codes(store.single_actions("sit", "", None).unwrap()), vec!["RR-01"]);
    assert!(store.single_actions("", "arm", None).unwrap().is_empty(), "No verb, no action");
    assert!(store.single_actions("wave", "head", None).unwrap().is_empty());
}

#[test]
fn test_compound_lookup() {
    let store = store();

    assert_eq!(codes(store.compound_actions("raise", "arms").unwrap()), vec!["ALAR-0"]);
    assert_eq!(codes(store.compound_actions("change color", "eyes").unwrap()), vec!["ELER-C"]);
    assert_eq!(
        codes(store.compound_actions("", "eyes").unwrap()),
        vec!["ELER-0", "ELER-1", "ELER-C"],
        "Empty verb matches every two-part action"
    );
    assert!(store.compound_actions("raise", "arm").unwrap().is_empty(), "Singular keyword is not a pair");
}

#[test]
fn test_incompatibilities_are_deduplicated() {
    let store = store();

    let found = store.incompatibilities(&code("RR-01")).unwrap();
    assert_eq!(
        found,
        vec![Incompatibility {
            keyword: "up".to_string(),
            subsystem: Some(Subsystem::Leg),
        }]
    );
}

#[test]
fn test_incompatibilities_skip_untracked_parts() {
    let store = store();

    let found = store.incompatibilities(&code("RR-02")).unwrap();
    assert_eq!(
        found,
        vec![Incompatibility {
            keyword: "sit".to_string(),
            subsystem: None,
        }]
    );
    assert!(store.incompatibilities(&code("QQ-1")).unwrap().is_empty());
}

#[test]
fn test_compound_code_finds_its_action() {
    let store = store();

    assert_eq!(
        store.incompatibilities(&code("ALAR-0")).unwrap(),
        vec![Incompatibility {
            keyword: "sit".to_string(),
            subsystem: None,
        }]
    );
    assert!(
        store.incompatibilities(&code("MLMR-0")).unwrap().is_empty(),
        "Same suffix on another part pair is a different action"
    );
}

#[test]
fn test_color_payload_code_finds_color_action() {
    let store = store();
    let expected = vec![Incompatibility {
        keyword: "nod".to_string(),
        subsystem: Some(Subsystem::Head),
    }];

    assert_eq!(store.incompatibilities(&code("ELER-C")).unwrap(), expected);
    assert_eq!(
        store.incompatibilities(&code("ELER-C:255,0,0")).unwrap(),
        expected,
        "RGB payload must not hide the color action"
    );
}

#[test]
fn test_components() {
    let store = store();

    assert_eq!(
        store.components(&code("MR-2")).unwrap(),
        ActionComponents::new(Some("wave"), Some("hand"), Some(Side::Right))
    );
    assert_eq!(
        store.components(&code("ALAR-0")).unwrap(),
        ActionComponents::new(Some("raise"), Some("arms"), None)
    );
    assert_eq!(
        store.components(&code("RR-00")).unwrap(),
        ActionComponents::new(Some("stand"), None, None)
    );

    let err = store.components(&code("AR-9")).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownAction(ref c) if c == "AR-9"), "got {:?}", err);
}

#[test]
fn test_tables() {
    let store = store();

    assert_eq!(store.operating_mode().unwrap(), OperatingMode::Hold);
    assert_eq!(store.action_words().unwrap().resolve("LIFT"), Some("raise"));
    assert_eq!(store.body_part_words().unwrap().resolve("fist"), Some("hand"));
    assert_eq!(store.colors().unwrap().lookup("Red"), Some(("red", Rgb::new(255, 0, 0))));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIXTURE_ONTOLOGY.as_bytes()).unwrap();

    let store = OntologyStore::load(file.path()).unwrap();
    assert_eq!(store.ontology().colors.len(), 3);

    let missing = OntologyStore::load(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(missing, PipelineError::KnowledgeBase(_)));

    let broken = OntologyStore::from_json("{ \"operating_mode\": \"SIDEWAYS\" }").unwrap_err();
    assert!(matches!(broken, PipelineError::KnowledgeBase(_)));
}

#[test]
fn test_shipped_ontology_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("ontology/zora.json");
    let store = OntologyStore::load(&path).unwrap();

    assert_eq!(store.operating_mode().unwrap(), OperatingMode::Sequential);
    assert_eq!(codes(store.single_actions("up", "leg", Some(Side::Left)).unwrap()), vec!["LL-0"]);
    assert_eq!(codes(store.compound_actions("open", "hands").unwrap()), vec!["MLMR-0"]);
    assert_eq!(
        store.components(&code("ELER-C")).unwrap(),
        ActionComponents::new(Some("change color"), Some("eyes"), None)
    );
}
