use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::{BodyPart, Side};

pub const DEFAULT_POSTURE: &str = "stand";
pub const DEFAULT_HEAD: &str = "forward";
pub const DEFAULT_EYES_ANIMATION: &str = "static";
pub const DEFAULT_EYES_COLOR: &str = "white";
pub const DEFAULT_ARM: &str = "down";
pub const DEFAULT_HAND: &str = "close";
pub const DEFAULT_LEG: &str = "down";

/// Leg value that requires an explicit lowering step on reset.
pub const RAISED_LEG: &str = "up";

/// Verb keyword that recolors the eyes instead of animating them.
pub const CHANGE_COLOR: &str = "change color";

/// One slot per robot subsystem, each holding the verb keyword of the last
/// accepted action on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotPose {
    pub posture: String,
    pub head: String,
    pub eyes_animation: String,
    pub eyes_color: String,
    pub left_arm: String,
    pub right_arm: String,
    pub left_hand: String,
    pub right_hand: String,
    pub left_leg: String,
    pub right_leg: String,
}

impl Default for RobotPose {
    fn default() -> Self {
        Self {
            posture: DEFAULT_POSTURE.to_string(),
            head: DEFAULT_HEAD.to_string(),
            eyes_animation: DEFAULT_EYES_ANIMATION.to_string(),
            eyes_color: DEFAULT_EYES_COLOR.to_string(),
            left_arm: DEFAULT_ARM.to_string(),
            right_arm: DEFAULT_ARM.to_string(),
            left_hand: DEFAULT_HAND.to_string(),
            right_hand: DEFAULT_HAND.to_string(),
            left_leg: DEFAULT_LEG.to_string(),
            right_leg: DEFAULT_LEG.to_string(),
        }
    }
}

fn is_grip(verb: &str) -> bool {
    verb.eq_ignore_ascii_case("open") || verb.eq_ignore_ascii_case("close")
}

impl RobotPose {
    pub fn is_default(&self) -> bool {
        *self == RobotPose::default()
    }

    /// Pose-update table for an accepted action.
    pub fn apply(&mut self, verb: &str, part: BodyPart, side: Option<Side>, color: Option<&str>) {
        let verb = verb.to_string();

        match (side, part) {
            (Some(Side::Left), BodyPart::Arm) => self.left_arm = verb,
            (Some(Side::Right), BodyPart::Arm) => self.right_arm = verb,
            (Some(Side::Left), BodyPart::Hand) if is_grip(&verb) => self.left_hand = verb,
            (Some(Side::Right), BodyPart::Hand) if is_grip(&verb) => self.right_hand = verb,
            // Non-grip hand actions (waving, pointing) move the arm
            (Some(Side::Left), BodyPart::Hand) => self.left_arm = verb,
            (Some(Side::Right), BodyPart::Hand) => self.right_arm = verb,
            (Some(Side::Left), BodyPart::Leg) => self.left_leg = verb,
            (Some(Side::Right), BodyPart::Leg) => self.right_leg = verb,
            (Some(_), BodyPart::Eyes | BodyPart::Head | BodyPart::Arms | BodyPart::Hands | BodyPart::Other) => {
                tracing::debug!("No sided slot for {:?}, pose unchanged", part);
            }

            (None, BodyPart::Eyes) => {
                if verb.eq_ignore_ascii_case(CHANGE_COLOR) {
                    if let Some(color) = color {
                        self.eyes_color = color.to_string();
                    }
                } else {
                    self.eyes_animation = verb;
                }
            }
            (None, BodyPart::Head) => self.head = verb,
            (None, BodyPart::Arms) => {
                self.left_arm = verb.clone();
                self.right_arm = verb;
            }
            (None, BodyPart::Hands) => {
                if is_grip(&verb) {
                    self.left_hand = verb.clone();
                    self.right_hand = verb;
                } else {
                    self.left_arm = verb.clone();
                    self.right_arm = verb;
                }
            }
            (None, BodyPart::Arm | BodyPart::Hand | BodyPart::Leg | BodyPart::Other) => self.posture = verb,
        }
    }
}

fn marked(value: &str, default: &str) -> String {
    if value == default {
        format!("{} [default]", value)
    } else {
        value.to_string()
    }
}

impl fmt::Display for RobotPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Robot:\t\t{}", marked(&self.posture, DEFAULT_POSTURE))?;
        writeln!(f, "Head:\t\t{}", marked(&self.head, DEFAULT_HEAD))?;
        writeln!(f, "Eyes Anim:\t{}", marked(&self.eyes_animation, DEFAULT_EYES_ANIMATION))?;
        writeln!(f, "Eyes Color:\t{}", marked(&self.eyes_color, DEFAULT_EYES_COLOR))?;
        writeln!(f, "Right Arm:\t{}", marked(&self.right_arm, DEFAULT_ARM))?;
        writeln!(f, "Left Arm:\t{}", marked(&self.left_arm, DEFAULT_ARM))?;
        writeln!(f, "Right Hand:\t{}", marked(&self.right_hand, DEFAULT_HAND))?;
        writeln!(f, "Left Hand:\t{}", marked(&self.left_hand, DEFAULT_HAND))?;
        writeln!(f, "Right Leg:\t{}", marked(&self.right_leg, DEFAULT_LEG))?;
        write!(f, "Left Leg:\t{}", marked(&self.left_leg, DEFAULT_LEG))
    }
}
