#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use zora::annotation::{Annotator, DependencyTag, SentenceAnnotations};
use zora::error::{PipelineError, PipelineResult};
use zora::kernel::{ActionToken, RobotState, Session};
use zora::knowledge::{KnowledgeBase, OntologyStore};

/// Small robot ontology shared by the integration tests. Starts in HOLD.
pub const FIXTURE_ONTOLOGY: &str = r#"{
  "operating_mode": "HOLD",
  "action_words": [
    { "keyword": "raise", "synonyms": ["lift"] },
    { "keyword": "up", "synonyms": ["move up", "put up"] },
    { "keyword": "down", "synonyms": ["lower", "move down"] },
    { "keyword": "stand", "synonyms": ["stand up", "get up"] },
    { "keyword": "sit", "synonyms": ["sit down"] },
    { "keyword": "crouch", "synonyms": [] },
    { "keyword": "dance", "synonyms": [] },
    { "keyword": "open", "synonyms": [] },
    { "keyword": "close", "synonyms": ["clench"] },
    { "keyword": "wave", "synonyms": ["greet"] },
    { "keyword": "blink", "synonyms": [] },
    { "keyword": "static", "synonyms": [] },
    { "keyword": "change color", "synonyms": ["color", "colour", "paint"] }
  ],
  "body_part_words": [
    { "keyword": "arm" },
    { "keyword": "arms" },
    { "keyword": "hand", "synonyms": ["fist"] },
    { "keyword": "hands" },
    { "keyword": "leg" },
    { "keyword": "legs" },
    { "keyword": "head" },
    { "keyword": "eye" },
    { "keyword": "eyes" }
  ],
  "body_parts": [
    { "code": "RR" },
    { "code": "HH", "keyword": "head" },
    { "code": "AL", "keyword": "arm", "side": "left", "plural": "arms" },
    { "code": "AR", "keyword": "arm", "side": "right", "plural": "arms" },
    { "code": "ML", "keyword": "hand", "side": "left", "plural": "hands" },
    { "code": "MR", "keyword": "hand", "side": "right", "plural": "hands" },
    { "code": "LL", "keyword": "leg", "side": "left", "plural": "legs" },
    { "code": "LR", "keyword": "leg", "side": "right", "plural": "legs" },
    { "code": "EL", "keyword": "eye", "side": "left", "plural": "eyes" },
    { "code": "ER", "keyword": "eye", "side": "right", "plural": "eyes" }
  ],
  "actions": [
    { "code": "00", "verb": "stand", "involves": ["RR"] },
    { "code": "01", "verb": "sit", "involves": ["RR"],
      "incompatible_with": [{ "verb": "up", "part": "leg" }, { "verb": "up", "part": "leg" }] },
    { "code": "02", "verb": "crouch", "involves": ["RR"],
      "incompatible_with": [{ "verb": "sit" }, { "verb": "dance", "part": "tail" }] },
    { "code": "03", "verb": "dance", "involves": ["RR"],
      "incompatible_with": [{ "verb": "sit" }, { "verb": "crouch" }] },
    { "code": "0", "verb": "raise", "involves": ["AL", "AR", "HH"] },
    { "code": "1", "verb": "down", "involves": ["AL", "AR", "LL", "LR"] },
    { "code": "0", "verb": "raise", "involves_both": ["AL", "AR"],
      "incompatible_with": [{ "verb": "sit" }] },
    { "code": "0", "verb": "open", "involves": ["ML", "MR"] },
    { "code": "1", "verb": "close", "involves": ["ML", "MR"] },
    { "code": "2", "verb": "wave", "involves": ["ML", "MR"],
      "incompatible_with": [{ "verb": "raise", "part": "arm" }] },
    { "code": "0", "verb": "open", "involves_both": ["ML", "MR"] },
    { "code": "0", "verb": "up", "involves": ["LL", "LR"],
      "incompatible_with": [{ "verb": "up", "part": "leg" }, { "verb": "sit" }] },
    { "code": "0", "verb": "static", "involves_both": ["EL", "ER"] },
    { "code": "1", "verb": "blink", "involves_both": ["EL", "ER"] },
    { "code": "C", "verb": "change color", "involves_both": ["EL", "ER"],
      "incompatible_with": [{ "verb": "nod", "part": "head" }] }
  ],
  "colors": [
    { "name": "red", "rgb": [255, 0, 0] },
    { "name": "green", "rgb": [0, 255, 0] },
    { "name": "blue", "rgb": [0, 0, 255] }
  ]
}"#;

pub fn store() -> OntologyStore {
    OntologyStore::from_json(FIXTURE_ONTOLOGY).expect("fixture ontology parses")
}

/// Fixture knowledge base starting in the given mode (`"HOLD"` / `"SEQUENTIAL"`).
pub fn kb_in_mode(mode: &str) -> Arc<dyn KnowledgeBase> {
    let json = FIXTURE_ONTOLOGY.replace(
        r#""operating_mode": "HOLD""#,
        &format!(r#""operating_mode": "{}""#, mode),
    );
    Arc::new(OntologyStore::from_json(&json).expect("fixture ontology parses"))
}

pub fn hold_kb() -> Arc<dyn KnowledgeBase> {
    kb_in_mode("HOLD")
}

pub fn sequential_kb() -> Arc<dyn KnowledgeBase> {
    kb_in_mode("SEQUENTIAL")
}

pub fn state_in(kb: &Arc<dyn KnowledgeBase>) -> RobotState {
    RobotState::new(kb.clone()).expect("state builds")
}

/// Builds annotations from `(word, pos)` tokens and `(governor, label, dependent)` edges.
pub fn annotate(tokens: &[(&str, &str)], edges: &[(&str, &str, &str)]) -> SentenceAnnotations {
    let mut annotations = SentenceAnnotations::new();
    for (word, pos) in tokens {
        annotations.add_token(word, pos);
    }
    for (governor, label, dependent) in edges {
        annotations.add_edge(governor, DependencyTag::from_label(label), dependent);
    }
    annotations
}

pub fn raise_right_arm() -> SentenceAnnotations {
    annotate(
        &[("Zora", "NNP"), ("raise", "VB"), ("your", "PRP$"), ("right", "JJ"), ("arm", "NN")],
        &[
            ("raise", "nsubj", "Zora"),
            ("raise", "dobj", "arm"),
            ("arm", "nmod:poss", "your"),
            ("arm", "amod", "right"),
        ],
    )
}

/// "Zora raise your arm and open your right hand": the arm has no side.
pub fn raise_arm_and_open_right_hand() -> SentenceAnnotations {
    annotate(
        &[
            ("Zora", "NNP"),
            ("raise", "VB"),
            ("your", "PRP$"),
            ("arm", "NN"),
            ("and", "CC"),
            ("open", "VB"),
            ("right", "JJ"),
            ("hand", "NN"),
        ],
        &[
            ("raise", "nsubj", "Zora"),
            ("raise", "dobj", "arm"),
            ("arm", "nmod:poss", "your"),
            ("raise", "cc", "and"),
            ("raise", "conj", "open"),
            ("open", "dobj", "hand"),
            ("hand", "amod", "right"),
        ],
    )
}

pub fn move_up_left_leg() -> SentenceAnnotations {
    annotate(
        &[("Zora", "NNP"), ("move", "VB"), ("up", "RP"), ("your", "PRP$"), ("left", "JJ"), ("leg", "NN")],
        &[
            ("move", "nsubj", "Zora"),
            ("move", "compound:prt", "up"),
            ("move", "dobj", "leg"),
            ("leg", "nmod:poss", "your"),
            ("leg", "amod", "left"),
        ],
    )
}

pub fn sit_down() -> SentenceAnnotations {
    annotate(
        &[("Zora", "NNP"), ("sit", "VB"), ("down", "RP")],
        &[("sit", "nsubj", "Zora"), ("sit", "prt", "down")],
    )
}

pub fn color_eyes(color: &str) -> SentenceAnnotations {
    annotate(
        &[("Zora", "NNP"), ("color", "VB"), ("your", "PRP$"), ("eyes", "NNS"), (color, "JJ")],
        &[
            ("color", "nsubj", "Zora"),
            ("color", "dobj", "eyes"),
            ("eyes", "nmod:poss", "your"),
            ("color", "xcomp", color),
        ],
    )
}

/// Annotator answering from a fixed sentence -> annotations table.
#[derive(Default)]
pub struct FixedAnnotator {
    parses: HashMap<String, SentenceAnnotations>,
}

impl FixedAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sentence: &str, annotations: SentenceAnnotations) -> Self {
        self.parses.insert(sentence.to_string(), annotations);
        self
    }
}

impl Annotator for FixedAnnotator {
    fn annotate(&self, sentence: &str) -> PipelineResult<SentenceAnnotations> {
        self.parses
            .get(sentence)
            .cloned()
            .ok_or_else(|| PipelineError::Annotator(format!("no parse for '{}'", sentence)))
    }
}

/// Annotator whose backend is down.
pub struct FailingAnnotator;

impl Annotator for FailingAnnotator {
    fn annotate(&self, _sentence: &str) -> PipelineResult<SentenceAnnotations> {
        Err(PipelineError::Annotator("connection refused".to_string()))
    }
}

pub fn session_with(kb: Arc<dyn KnowledgeBase>, annotator: FixedAnnotator) -> Session {
    Session::new(kb, Box::new(annotator)).expect("session opens")
}

pub fn strings(tokens: &[ActionToken]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}
