use std::sync::Arc;
use tracing::{debug, info};

use super::pose::{RobotPose, DEFAULT_EYES_ANIMATION, DEFAULT_EYES_COLOR, RAISED_LEG};
use super::token::{ActionToken, ResetStep};
use super::types::{ActionCode, ActionComponents, BodyPart, OperatingMode, Rgb, Side, Subsystem};
use crate::error::PipelineResult;
use crate::knowledge::{Incompatibility, KnowledgeBase};

/// Strict state delta. This is the ONLY way the pose and mode mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoseDelta {
    Apply {
        verb: String,
        part: BodyPart,
        side: Option<Side>,
        color: Option<String>,
    },
    Reset,
    ModeSwitch(OperatingMode),
}

/// A color name found in the sentence together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMatch {
    pub name: String,
    pub rgb: Rgb,
}

/// Candidate handed to the acceptance gate.
#[derive(Debug, Clone)]
pub struct AcceptRequest {
    pub code: ActionCode,
    pub components: ActionComponents,
    /// Only consulted for color actions.
    pub color: Option<ColorMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Accepted,
    /// `blocked_by` is `None` when the whole-robot posture blocked the action.
    Rejected { blocked_by: Option<Subsystem> },
}

/// Pose and operating mode of one robot session.
pub struct RobotState {
    // Private fields to enforce encapsulation
    pose: RobotPose,
    mode: OperatingMode,
    kb: Arc<dyn KnowledgeBase>,
    // Monotonic version, bumped by every reduction
    pub version: u64,
}

impl RobotState {
    /// Default pose, mode taken from the knowledge base.
    pub fn new(kb: Arc<dyn KnowledgeBase>) -> PipelineResult<Self> {
        let mode = kb.operating_mode()?;
        info!("Robot state initialised in {} mode", mode);
        Ok(Self {
            pose: RobotPose::default(),
            mode,
            kb,
            version: 0,
        })
    }

    pub fn pose(&self) -> &RobotPose {
        &self.pose
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Pure reduction: State + Delta -> Mutated State
    pub fn reduce(&mut self, delta: PoseDelta) {
        self.version += 1;

        match delta {
            PoseDelta::Apply {
                verb,
                part,
                side,
                color,
            } => self.pose.apply(&verb, part, side, color.as_deref()),
            PoseDelta::Reset => self.pose = RobotPose::default(),
            PoseDelta::ModeSwitch(mode) => self.mode = mode,
        }
    }

    /// Acceptance gate. Appends the outcome token (and, at the start of a
    /// SEQUENTIAL sentence, the reset sequence before it) to `actions`.
    pub fn verify_and_accept(
        &mut self,
        request: AcceptRequest,
        actions: &mut Vec<ActionToken>,
    ) -> PipelineResult<GateDecision> {
        // 1. SEQUENTIAL sentences start from a known baseline
        if self.mode == OperatingMode::Sequential && actions.is_empty() {
            actions.extend(self.reset_pose().into_iter().map(ActionToken::Reset));
            self.accept(request, actions);
            return Ok(GateDecision::Accepted);
        }

        // 2. Compare every blocking descriptor against the current pose
        for incompatibility in self.kb.incompatibilities(&request.code)? {
            if self.conflicts_with(&incompatibility) {
                info!(
                    "Rejected {}: {} is currently '{}'",
                    request.code,
                    incompatibility.subsystem.map(|s| s.as_str()).unwrap_or("robot"),
                    incompatibility.keyword
                );
                let blocked_by = incompatibility.subsystem;
                actions.push(ActionToken::Incompatible {
                    subsystem: blocked_by,
                    keyword: incompatibility.keyword,
                });
                return Ok(GateDecision::Rejected { blocked_by });
            }
        }

        // 3. Accept
        self.accept(request, actions);
        Ok(GateDecision::Accepted)
    }

    fn accept(&mut self, request: AcceptRequest, actions: &mut Vec<ActionToken>) {
        let AcceptRequest {
            code,
            components,
            color,
        } = request;

        self.reduce(PoseDelta::Apply {
            verb: components.verb_str().to_string(),
            part: components.body_part(),
            side: components.side,
            color: color.as_ref().map(|c| c.name.clone()),
        });
        debug!("Pose after {}:\n{}", code, self.pose);
        info!("Accepted {} ({})", code, components);

        if code.is_color_action() {
            actions.push(ActionToken::ColorAction {
                code,
                rgb: color.map(|c| c.rgb),
            });
        } else {
            actions.push(ActionToken::Action(code));
        }
    }

    fn conflicts_with(&self, incompatibility: &Incompatibility) -> bool {
        let keyword = incompatibility.keyword.as_str();
        let holds = |slot: &str| slot.eq_ignore_ascii_case(keyword);
        let pose = &self.pose;

        match incompatibility.subsystem {
            None => holds(&pose.posture),
            Some(Subsystem::Head) => holds(&pose.head),
            Some(Subsystem::Arm) => holds(&pose.left_arm) || holds(&pose.right_arm),
            Some(Subsystem::Hand) => holds(&pose.left_hand) || holds(&pose.right_hand),
            Some(Subsystem::Leg) => holds(&pose.left_leg) || holds(&pose.right_leg),
        }
    }

    /// Steps needed to bring the robot back to its default pose, then resets it.
    pub fn reset_pose(&mut self) -> Vec<ResetStep> {
        let mut steps = Vec::new();

        let pose = &self.pose;
        if pose.left_leg.eq_ignore_ascii_case(RAISED_LEG) {
            steps.push(ResetStep::LowerLeftLeg);
        }
        if pose.right_leg.eq_ignore_ascii_case(RAISED_LEG) {
            steps.push(ResetStep::LowerRightLeg);
        }
        steps.push(ResetStep::Stand);
        if !pose.eyes_animation.eq_ignore_ascii_case(DEFAULT_EYES_ANIMATION) {
            steps.push(ResetStep::StaticEyes);
        }
        if !pose.eyes_color.eq_ignore_ascii_case(DEFAULT_EYES_COLOR) {
            steps.push(ResetStep::WhiteEyes);
        }

        self.reduce(PoseDelta::Reset);
        debug!("Pose reset: {} step(s)", steps.len());
        steps
    }

    pub fn change_mode(&mut self, requested: OperatingMode) -> Vec<ActionToken> {
        if requested == self.mode {
            debug!("Already in {} mode", requested);
            return vec![ActionToken::ModeUnchanged];
        }

        self.reduce(PoseDelta::ModeSwitch(requested));
        info!("Operating mode switched to {}", requested);

        let mut tokens = vec![ActionToken::ModeAdvisory(requested)];
        if requested == OperatingMode::Sequential {
            tokens.extend(self.reset_pose().into_iter().map(ActionToken::Reset));
        }
        tokens
    }
}
