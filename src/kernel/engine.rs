use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::state::{AcceptRequest, ColorMatch, GateDecision, RobotState};
use super::token::ActionToken;
use super::types::{ActionCode, ActionComponents, OperatingMode, Side, Subsystem};
use crate::annotation::{SentenceAnnotations, Token, MODIFIER_TAGS, OBJECT_TAGS, VERB_EXTENSION_TAGS};
use crate::error::PipelineResult;
use crate::knowledge::{ColorTable, KeywordTable, KnowledgeBase, DELEXICAL};

/// Mode-change directive embedded anywhere in the sentence text.
pub fn detect_mode_directive(sentence: &str) -> Option<OperatingMode> {
    let lowered = sentence.to_lowercase();
    if lowered.contains("mode sequential") {
        Some(OperatingMode::Sequential)
    } else if lowered.contains("mode hold") {
        Some(OperatingMode::Hold)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Consumption {
    /// Looked at as an anchor without producing anything.
    Visited,
    /// Part of a non-empty component triple.
    Claimed,
}

/// Token literals already used during one sentence.
///
/// The main loop never revisits a consumed token. Probes only skip claimed
/// ones, so a word that produced nothing as an anchor can still complete a
/// later triple.
#[derive(Debug, Clone, Default)]
pub struct ConsumedSet {
    marks: HashMap<String, Consumption>,
}

impl ConsumedSet {
    pub fn visit(&mut self, literal: &str) {
        self.marks.entry(literal.to_string()).or_insert(Consumption::Visited);
    }

    pub fn claim(&mut self, literal: &str) {
        self.marks.insert(literal.to_string(), Consumption::Claimed);
    }

    pub fn is_consumed(&self, literal: &str) -> bool {
        self.marks.contains_key(literal)
    }

    pub fn is_claimed(&self, literal: &str) -> bool {
        self.marks.get(literal) == Some(&Consumption::Claimed)
    }

    pub fn claimed(&self) -> impl Iterator<Item = &str> {
        self.marks
            .iter()
            .filter(|(_, mark)| **mark == Consumption::Claimed)
            .map(|(literal, _)| literal.as_str())
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// What one anchor token contributed to the sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// Neither verb- nor noun-tagged.
    Ignored,
    /// No verb, object or side resolved.
    NoComponents,
    /// Components resolved but the knowledge base had no matching action.
    NoCandidate { components: ActionComponents },
    Accepted { code: ActionCode },
    Rejected {
        code: ActionCode,
        blocked_by: Option<Subsystem>,
    },
    Ambiguous { codes: Vec<ActionCode> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTrace {
    pub anchor: String,
    pub outcome: AnchorOutcome,
}

/// Everything extraction keeps for one sentence. Survives an ambiguity so the
/// sentence can be resumed once the operator picks an action.
#[derive(Debug, Clone)]
pub struct SentenceContext {
    pub annotations: SentenceAnnotations,
    pub consumed: ConsumedSet,
    pub actions: Vec<ActionToken>,
    pub trace: Vec<AnchorTrace>,
    /// Set while an `ERR-MA` answer is outstanding.
    pub awaiting_choice: bool,
}

impl SentenceContext {
    pub fn new(annotations: SentenceAnnotations) -> Self {
        Self {
            annotations,
            consumed: ConsumedSet::default(),
            actions: Vec::new(),
            trace: Vec::new(),
            awaiting_choice: false,
        }
    }
}

/// Resolved triple plus the sentence token the object came from.
struct Resolved {
    components: ActionComponents,
    object_token: Option<String>,
}

pub struct ActionExtractor {
    kb: Arc<dyn KnowledgeBase>,
    verbs: KeywordTable,
    body_parts: KeywordTable,
    colors: ColorTable,
}

impl ActionExtractor {
    pub fn new(kb: Arc<dyn KnowledgeBase>) -> PipelineResult<Self> {
        let verbs = kb.action_words()?.with_delexical();
        let body_parts = kb.body_part_words()?;
        let colors = kb.colors()?;
        debug!(
            "Extractor ready: {} verb keywords, {} body-part keywords, {} colors",
            verbs.len(),
            body_parts.len(),
            colors.len()
        );
        Ok(Self {
            kb,
            verbs,
            body_parts,
            colors,
        })
    }

    /// One-shot extraction over a fresh sentence context.
    pub fn extract(
        &self,
        annotations: SentenceAnnotations,
        state: &mut RobotState,
    ) -> PipelineResult<Vec<ActionToken>> {
        let mut ctx = SentenceContext::new(annotations);
        self.run(&mut ctx, state)
    }

    /// Walks every unconsumed token of the context. Returns the single
    /// ambiguity token on the first anchor with several candidates; the
    /// context is left resumable in that case.
    pub fn run(&self, ctx: &mut SentenceContext, state: &mut RobotState) -> PipelineResult<Vec<ActionToken>> {
        for literal in ctx.annotations.literals() {
            if ctx.consumed.is_consumed(&literal) {
                continue;
            }
            ctx.consumed.visit(&literal);

            let outcome = self.analyze_anchor(&literal, ctx, state)?;
            debug!("Anchor '{}': {:?}", literal, outcome);

            if let AnchorOutcome::Ambiguous { codes } = &outcome {
                let token = ActionToken::ambiguous(codes.clone());
                warn!("Ambiguous request: {}", token);
                ctx.awaiting_choice = true;
                ctx.trace.push(AnchorTrace {
                    anchor: literal,
                    outcome,
                });
                return Ok(vec![token]);
            }

            ctx.trace.push(AnchorTrace {
                anchor: literal,
                outcome,
            });
        }

        if ctx.actions.is_empty() {
            debug!("No action found in sentence");
            ctx.actions.push(ActionToken::NoAction);
        }
        Ok(ctx.actions.clone())
    }

    /// Operator's answer to an ambiguity: the code goes straight to the gate.
    pub fn apply_chosen(
        &self,
        code: &ActionCode,
        ctx: &mut SentenceContext,
        state: &mut RobotState,
    ) -> PipelineResult<GateDecision> {
        let components = self.kb.components(code)?;
        let color = if code.is_color_action() {
            self.sentence_color(&ctx.annotations)
        } else {
            None
        };
        ctx.awaiting_choice = false;

        state.verify_and_accept(
            AcceptRequest {
                code: code.clone(),
                components,
                color,
            },
            &mut ctx.actions,
        )
    }

    /// Last color name (in annotation order) present in the sentence.
    pub fn sentence_color(&self, annotations: &SentenceAnnotations) -> Option<ColorMatch> {
        annotations
            .iter()
            .filter_map(|token| self.colors.lookup(token.text()))
            .last()
            .map(|(name, rgb)| ColorMatch {
                name: name.to_string(),
                rgb,
            })
    }

    fn analyze_anchor(
        &self,
        literal: &str,
        ctx: &mut SentenceContext,
        state: &mut RobotState,
    ) -> PipelineResult<AnchorOutcome> {
        let Some(anchor) = ctx.annotations.get(literal) else {
            return Ok(AnchorOutcome::Ignored);
        };

        // 1. Classify by POS tag
        let pos = anchor.pos();
        if !(pos.is_verb() || pos.is_noun() || pos.is_comparative()) {
            return Ok(AnchorOutcome::Ignored);
        }

        // 2. Build the triple
        let resolved = self.resolve_components(anchor, &ctx.annotations, &mut ctx.consumed);
        if resolved.components.is_empty() {
            return Ok(AnchorOutcome::NoComponents);
        }
        ctx.consumed.claim(literal);
        let components = resolved.components;
        debug!("Components for '{}': {}", literal, components);

        // 3. Query shape: plural object -> two-part action
        let plural = resolved
            .object_token
            .as_deref()
            .and_then(|t| ctx.annotations.get(t))
            .is_some_and(|t| t.pos().is_plural_noun());

        let mut codes = if plural {
            self.kb.compound_actions(components.verb_str(), components.object_str())?
        } else {
            self.kb
                .single_actions(components.verb_str(), components.object_str(), components.side)?
        };

        // 4. Outcome
        match codes.len() {
            0 => Ok(AnchorOutcome::NoCandidate { components }),
            1 => {
                let code = codes.remove(0);
                let color = if code.is_color_action() {
                    self.sentence_color(&ctx.annotations)
                } else {
                    None
                };
                let decision = state.verify_and_accept(
                    AcceptRequest {
                        code: code.clone(),
                        components,
                        color,
                    },
                    &mut ctx.actions,
                )?;
                Ok(match decision {
                    GateDecision::Accepted => AnchorOutcome::Accepted { code },
                    GateDecision::Rejected { blocked_by } => AnchorOutcome::Rejected { code, blocked_by },
                })
            }
            _ => Ok(AnchorOutcome::Ambiguous { codes }),
        }
    }

    fn resolve_components(
        &self,
        anchor: &Token,
        annotations: &SentenceAnnotations,
        consumed: &mut ConsumedSet,
    ) -> Resolved {
        let mut verb: Option<&str> = None;

        // a. Multi-word verb: "anchor referenced"
        for target in anchor.targets_in(&VERB_EXTENSION_TAGS) {
            if consumed.is_claimed(target) {
                continue;
            }
            if let Some(keyword) = self.verbs.resolve(&format!("{} {}", anchor.text(), target)) {
                verb = Some(keyword);
                consumed.claim(target);
                break;
            }
        }

        // b. Anchor alone
        if verb.is_none() {
            verb = self.verbs.resolve(anchor.text());
        }

        let object_targets = anchor.targets_in(&OBJECT_TAGS);

        // c. Missing or delexical verb: take the meaning from the object
        if verb.map_or(true, |v| v == DELEXICAL) {
            verb = None;
            for target in &object_targets {
                if consumed.is_claimed(target) {
                    continue;
                }
                if let Some(keyword) = self.verbs.resolve(target).filter(|k| *k != DELEXICAL) {
                    verb = Some(keyword);
                    consumed.claim(target);
                    break;
                }
            }
        }

        // d. Body part
        let mut object: Option<&str> = None;
        let mut object_token: Option<String> = None;
        for target in &object_targets {
            if consumed.is_claimed(target) {
                continue;
            }
            if let Some(keyword) = self.body_parts.resolve(target) {
                object = Some(keyword);
                object_token = Some(target.to_string());
                consumed.claim(target);
                break;
            }
        }

        // e. Side modifier on the object token
        let mut side: Option<Side> = None;
        if let Some(object_literal) = object_token.as_deref() {
            if let Some(object_anchor) = annotations.get(object_literal) {
                for modifier in object_anchor.targets_in(&MODIFIER_TAGS) {
                    if consumed.is_claimed(modifier) {
                        continue;
                    }
                    if let Some(found) = Side::from_literal(modifier) {
                        side = Some(found);
                        consumed.claim(modifier);
                        break;
                    }
                }
            }
        }

        Resolved {
            components: ActionComponents::new(verb, object, side),
            object_token,
        }
    }
}
