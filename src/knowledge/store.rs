use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::keywords::{KeywordEntry, KeywordTable};
use super::{ColorTable, Incompatibility, KnowledgeBase};
use crate::error::{PipelineError, PipelineResult};
use crate::kernel::types::{ActionCode, ActionComponents, OperatingMode, Rgb, Side, Subsystem};

/// A robot body part as registered in the ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPartRecord {
    /// Two-character part code, e.g. `AR`.
    pub code: String,
    /// Body-part keyword; absent for the whole robot.
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub side: Option<Side>,
    /// Keyword used when this part takes part in a two-part action (`arms`).
    #[serde(default)]
    pub plural: Option<String>,
}

/// An earlier action that blocks this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompatibilityRecord {
    pub verb: String,
    #[serde(default)]
    pub part: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Action suffix, e.g. `0` in `AR-0`.
    pub code: String,
    pub verb: String,
    /// Parts this action can be performed with, one at a time.
    #[serde(default)]
    pub involves: Vec<String>,
    /// Parts this action moves together (left part first).
    #[serde(default)]
    pub involves_both: Option<[String; 2]>,
    #[serde(default)]
    pub incompatible_with: Vec<IncompatibilityRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub name: String,
    pub rgb: [u8; 3],
}

/// Serialized form of the robot ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    pub operating_mode: OperatingMode,
    #[serde(default)]
    pub action_words: Vec<KeywordEntry>,
    #[serde(default)]
    pub body_part_words: Vec<KeywordEntry>,
    #[serde(default)]
    pub body_parts: Vec<BodyPartRecord>,
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
    #[serde(default)]
    pub colors: Vec<ColorRecord>,
}

/// File-backed, read-only knowledge base.
#[derive(Debug, Clone)]
pub struct OntologyStore {
    ontology: Ontology,
}

impl OntologyStore {
    pub fn new(ontology: Ontology) -> Self {
        Self { ontology }
    }

    pub fn from_json(json: &str) -> PipelineResult<Self> {
        let ontology: Ontology = serde_json::from_str(json)
            .map_err(|e| PipelineError::KnowledgeBase(format!("invalid ontology: {}", e)))?;
        Ok(Self::new(ontology))
    }

    pub fn load(path: &Path) -> PipelineResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::KnowledgeBase(format!("cannot read ontology {}: {}", path.display(), e))
        })?;
        let store = Self::from_json(&content)?;
        tracing::info!(
            "Ontology loaded from {}: {} actions, {} parts, {} colors",
            path.display(),
            store.ontology.actions.len(),
            store.ontology.body_parts.len(),
            store.ontology.colors.len()
        );
        Ok(store)
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    fn part(&self, code: &str) -> Option<&BodyPartRecord> {
        self.ontology.body_parts.iter().find(|p| p.code == code)
    }

    /// Locates the action record behind a code. Color suffixes (`C...`) collapse to `C`.
    fn action_for(&self, code: &ActionCode, normalize_color: bool) -> Option<&ActionRecord> {
        let suffix = if normalize_color && code.is_color_action() {
            "C"
        } else {
            code.suffix()
        };
        let segment = code.part_segment();

        if code.is_compound() {
            let (first, second) = split_compound(segment);
            self.ontology.actions.iter().find(|a| {
                a.code == suffix
                    && a.involves_both
                        .as_ref()
                        .is_some_and(|both| both.iter().any(|p| p == first) && both.iter().any(|p| p == second))
            })
        } else {
            self.ontology
                .actions
                .iter()
                .find(|a| a.code == suffix && a.involves.iter().any(|p| p == segment))
        }
    }
}

/// `ALAR` -> (`AL`, `AR`).
fn split_compound(segment: &str) -> (&str, &str) {
    let mid = segment.char_indices().nth(2).map(|(i, _)| i).unwrap_or(segment.len());
    segment.split_at(mid)
}

fn compound_code(first: &str, second: &str, suffix: &str) -> PipelineResult<ActionCode> {
    let lead = |code: &str| {
        code.chars()
            .next()
            .ok_or_else(|| PipelineError::KnowledgeBase("body part with empty code".to_string()))
    };
    ActionCode::parse(&format!("{}L{}R-{}", lead(first)?, lead(second)?, suffix))
}

impl KnowledgeBase for OntologyStore {
    fn operating_mode(&self) -> PipelineResult<OperatingMode> {
        Ok(self.ontology.operating_mode)
    }

    fn action_words(&self) -> PipelineResult<KeywordTable> {
        Ok(KeywordTable::new(self.ontology.action_words.clone()))
    }

    fn body_part_words(&self) -> PipelineResult<KeywordTable> {
        Ok(KeywordTable::new(self.ontology.body_part_words.clone()))
    }

    fn colors(&self) -> PipelineResult<ColorTable> {
        Ok(ColorTable::new(
            self.ontology
                .colors
                .iter()
                .map(|c| (c.name.clone(), Rgb::new(c.rgb[0], c.rgb[1], c.rgb[2])))
                .collect(),
        ))
    }

    fn single_actions(&self, verb: &str, object: &str, side: Option<Side>) -> PipelineResult<Vec<ActionCode>> {
        let mut codes = Vec::new();
        if verb.is_empty() {
            return Ok(codes);
        }

        for action in self.ontology.actions.iter().filter(|a| a.verb == verb) {
            for part_code in &action.involves {
                let Some(part) = self.part(part_code) else {
                    tracing::debug!("Action {} involves unknown part {}", action.code, part_code);
                    continue;
                };
                if !object.is_empty() && part.keyword.as_deref() != Some(object) {
                    continue;
                }
                if side.is_some() && part.side != side {
                    continue;
                }
                codes.push(ActionCode::parse(&format!("{}-{}", part.code, action.code))?);
            }
        }

        Ok(codes)
    }

    fn compound_actions(&self, verb: &str, object: &str) -> PipelineResult<Vec<ActionCode>> {
        let mut codes = Vec::new();

        for action in &self.ontology.actions {
            let Some([first, second]) = &action.involves_both else {
                continue;
            };
            if !verb.is_empty() && action.verb != verb {
                continue;
            }
            let (Some(a), Some(b)) = (self.part(first), self.part(second)) else {
                continue;
            };
            if a.plural.as_deref() != Some(object) || b.plural.as_deref() != Some(object) {
                continue;
            }
            codes.push(compound_code(&a.code, &b.code, &action.code)?);
        }

        Ok(codes)
    }

    fn incompatibilities(&self, code: &ActionCode) -> PipelineResult<Vec<Incompatibility>> {
        let Some(action) = self.action_for(code, true) else {
            return Ok(Vec::new());
        };

        let mut found: Vec<Incompatibility> = Vec::new();
        for record in &action.incompatible_with {
            let subsystem = match record.part.as_deref() {
                None => None,
                Some(part) => match Subsystem::from_keyword(part) {
                    Some(s) => Some(s),
                    None => {
                        tracing::debug!("Skipping incompatibility on untracked part '{}'", part);
                        continue;
                    }
                },
            };
            let descriptor = Incompatibility {
                keyword: record.verb.clone(),
                subsystem,
            };
            if !found.contains(&descriptor) {
                found.push(descriptor);
            }
        }

        Ok(found)
    }

    fn components(&self, code: &ActionCode) -> PipelineResult<ActionComponents> {
        let action = self
            .action_for(code, false)
            .ok_or_else(|| PipelineError::UnknownAction(code.to_string()))?;

        if code.is_compound() {
            let (first, _) = split_compound(code.part_segment());
            let object = self.part(first).and_then(|p| p.plural.as_deref());
            return Ok(ActionComponents::new(Some(&action.verb), object, None));
        }

        let part = self
            .part(code.part_segment())
            .ok_or_else(|| PipelineError::UnknownAction(code.to_string()))?;
        Ok(ActionComponents::new(Some(&action.verb), part.keyword.as_deref(), part.side))
    }
}
