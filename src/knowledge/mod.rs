pub mod keywords;
pub mod store;

pub use keywords::*;
pub use store::*;

use crate::error::PipelineResult;
use crate::kernel::types::{ActionCode, ActionComponents, OperatingMode, Rgb, Side, Subsystem};

/// A prior action that blocks a new one while the pose still holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incompatibility {
    /// Verb keyword of the blocking action.
    pub keyword: String,
    /// `None` targets the whole-robot posture slot.
    pub subsystem: Option<Subsystem>,
}

/// Color names known to the knowledge base, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<(String, Rgb)>,
}

impl ColorTable {
    pub fn new(entries: Vec<(String, Rgb)>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, literal: &str) -> Option<(&str, Rgb)> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(literal))
            .map(|(name, rgb)| (name.as_str(), *rgb))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-only query surface of the robot knowledge base.
///
/// Injected into the extractor and the pose state machine at construction.
pub trait KnowledgeBase: Send + Sync {
    fn operating_mode(&self) -> PipelineResult<OperatingMode>;

    fn action_words(&self) -> PipelineResult<KeywordTable>;

    fn body_part_words(&self) -> PipelineResult<KeywordTable>;

    fn colors(&self) -> PipelineResult<ColorTable>;

    /// Single-part actions for (verb, object, side). Empty object or side act as wildcards.
    fn single_actions(&self, verb: &str, object: &str, side: Option<Side>) -> PipelineResult<Vec<ActionCode>>;

    /// Two-part actions for a plural object. An empty verb acts as a wildcard.
    fn compound_actions(&self, verb: &str, object: &str) -> PipelineResult<Vec<ActionCode>>;

    fn incompatibilities(&self, code: &ActionCode) -> PipelineResult<Vec<Incompatibility>>;

    /// Canonical (verb, object, side) of a code.
    fn components(&self, code: &ActionCode) -> PipelineResult<ActionComponents>;
}
