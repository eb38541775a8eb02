use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::engine::{detect_mode_directive, ActionExtractor, AnchorOutcome, AnchorTrace, SentenceContext};
use super::pose::RobotPose;
use super::state::{GateDecision, RobotState};
use super::telemetry::{TelemetryEvent, TelemetryRecorder, TelemetrySnapshot};
use super::token::ActionToken;
use super::types::{ActionCode, OperatingMode};
use crate::annotation::{Annotator, SentenceAnnotations};
use crate::error::PipelineResult;
use crate::knowledge::KnowledgeBase;

/// Leading character of a disambiguation answer (`*AR-0`).
pub const CHOICE_MARKER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Splits console input into sentences after every ". ".
pub fn split_sentences(input: &str) -> Vec<String> {
    input
        .split_inclusive(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub id: SessionId,
    pub mode: OperatingMode,
    pub pose: RobotPose,
    pub version: u64,
    pub awaiting_choice: bool,
    pub telemetry: TelemetrySnapshot,
}

/// One robot conversation: an extractor, the robot state and the sentence
/// currently being worked on. Not shareable; callers serialize access.
pub struct Session {
    pub id: SessionId,
    extractor: ActionExtractor,
    state: RobotState,
    annotator: Box<dyn Annotator>,
    sentence: Option<SentenceContext>,
    telemetry: TelemetryRecorder,
}

impl Session {
    pub fn new(kb: Arc<dyn KnowledgeBase>, annotator: Box<dyn Annotator>) -> PipelineResult<Self> {
        let extractor = ActionExtractor::new(kb.clone())?;
        let state = RobotState::new(kb)?;
        let id = SessionId::new();
        info!("Session {} opened in {} mode", id, state.mode());

        Ok(Self {
            id,
            extractor,
            state,
            annotator,
            sentence: None,
            telemetry: TelemetryRecorder::new(),
        })
    }

    /// Entry point for one inbound payload: either a sentence or a
    /// disambiguation answer.
    pub fn handle(&mut self, payload: &str) -> PipelineResult<Vec<ActionToken>> {
        let payload = payload.trim();
        match payload.strip_prefix(CHOICE_MARKER) {
            Some(code) => self.resolve_ambiguity(code),
            None => self.process_sentence(payload),
        }
    }

    pub fn process_sentence(&mut self, sentence: &str) -> PipelineResult<Vec<ActionToken>> {
        // 1. A new sentence drops whatever the previous one left behind
        self.sentence = None;

        // 2. Mode directives skip annotation entirely
        if let Some(requested) = detect_mode_directive(sentence) {
            let from = self.state.mode();
            let tokens = self.state.change_mode(requested);
            if self.state.mode() != from {
                self.telemetry.record(TelemetryEvent::ModeChanged { from, to: requested });
            }
            self.record_resets(&tokens);
            return Ok(tokens);
        }

        // 3. Annotate
        let annotations = self.annotator.annotate(sentence).inspect_err(|e| {
            warn!("Annotation failed: {}", e);
        })?;
        debug!("Annotated {} token(s)", annotations.len());

        // 4. Extract
        let mut ctx = SentenceContext::new(annotations);
        let result = self.extractor.run(&mut ctx, &mut self.state)?;

        self.record_progress(&ctx, 0, 0, &result);
        self.telemetry.record(TelemetryEvent::SentenceAnalyzed {
            tokens: ctx.annotations.len(),
            results: result.len(),
        });
        self.sentence = Some(ctx);
        Ok(result)
    }

    /// Applies the operator's pick for an ambiguous sentence and resumes it.
    ///
    /// Returns the whole action list of the sentence. Without a sentence
    /// awaiting a choice, the action is applied on its own.
    pub fn resolve_ambiguity(&mut self, raw_code: &str) -> PipelineResult<Vec<ActionToken>> {
        let code = ActionCode::parse(raw_code)?;

        match self.sentence.take() {
            Some(mut ctx) if ctx.awaiting_choice => {
                let outcome = self.resume(&code, &mut ctx, true);
                self.sentence = Some(ctx);
                outcome
            }
            previous => {
                // The finished sentence stays the current one
                debug!("No sentence awaiting a choice, applying {} alone", code);
                let mut ctx = SentenceContext::new(SentenceAnnotations::new());
                let outcome = self.resume(&code, &mut ctx, false);
                self.sentence = previous;
                outcome
            }
        }
    }

    fn resume(&mut self, code: &ActionCode, ctx: &mut SentenceContext, resumed: bool) -> PipelineResult<Vec<ActionToken>> {
        let trace_mark = ctx.trace.len();
        let action_mark = ctx.actions.len();

        let decision = self.extractor.apply_chosen(code, ctx, &mut self.state)?;
        info!("Operator chose {} ({:?})", code, decision);
        self.telemetry.record(TelemetryEvent::DisambiguationApplied {
            code: code.to_string(),
            resumed,
        });
        self.record_decision(code, decision);

        let result = self.extractor.run(ctx, &mut self.state)?;
        self.record_progress(ctx, trace_mark, action_mark, &result);
        Ok(result)
    }

    pub fn state(&self) -> &RobotState {
        &self.state
    }

    pub fn telemetry(&self) -> &TelemetryRecorder {
        &self.telemetry
    }

    /// Per-anchor outcomes of the current sentence.
    pub fn last_trace(&self) -> &[AnchorTrace] {
        self.sentence.as_ref().map(|ctx| ctx.trace.as_slice()).unwrap_or(&[])
    }

    pub fn awaiting_choice(&self) -> bool {
        self.sentence.as_ref().is_some_and(|ctx| ctx.awaiting_choice)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            id: self.id,
            mode: self.state.mode(),
            pose: self.state.pose().clone(),
            version: self.state.version,
            awaiting_choice: self.awaiting_choice(),
            telemetry: self.telemetry.snapshot(),
        }
    }

    fn record_decision(&mut self, code: &ActionCode, decision: GateDecision) {
        let event = match decision {
            GateDecision::Accepted => TelemetryEvent::ActionAccepted { code: code.to_string() },
            GateDecision::Rejected { blocked_by } => TelemetryEvent::ActionRejected {
                code: code.to_string(),
                blocked_by: blocked_by.into(),
            },
        };
        self.telemetry.record(event);
    }

    fn record_resets(&mut self, tokens: &[ActionToken]) {
        let steps = tokens.iter().filter(|t| matches!(t, ActionToken::Reset(_))).count();
        if steps > 0 {
            self.telemetry.record(TelemetryEvent::PoseReset { steps });
        }
    }

    /// Records only what happened since the marks, so a resumed sentence is not
    /// counted twice.
    fn record_progress(&mut self, ctx: &SentenceContext, trace_mark: usize, action_mark: usize, result: &[ActionToken]) {
        self.record_resets(ctx.actions.get(action_mark..).unwrap_or(&[]));

        for entry in ctx.trace.get(trace_mark..).unwrap_or(&[]) {
            match &entry.outcome {
                AnchorOutcome::Accepted { code } => self.record_decision(code, GateDecision::Accepted),
                AnchorOutcome::Rejected { code, blocked_by } => self.record_decision(
                    code,
                    GateDecision::Rejected {
                        blocked_by: *blocked_by,
                    },
                ),
                AnchorOutcome::Ambiguous { codes } => {
                    self.telemetry.record(TelemetryEvent::Ambiguity { candidates: codes.len() });
                }
                AnchorOutcome::Ignored | AnchorOutcome::NoComponents | AnchorOutcome::NoCandidate { .. } => {}
            }
        }

        if matches!(result, [ActionToken::NoAction]) {
            self.telemetry.record(TelemetryEvent::NoAction);
        }
    }
}
