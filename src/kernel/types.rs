use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// How the pose carries over between sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingMode {
    /// Every sentence starts from the default pose.
    Sequential,
    /// Pose is preserved across sentences.
    Hold,
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingMode::Sequential => write!(f, "SEQUENTIAL"),
            OperatingMode::Hold => write!(f, "HOLD"),
        }
    }
}

impl FromStr for OperatingMode {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(OperatingMode::Sequential),
            "hold" => Ok(OperatingMode::Hold),
            other => Err(PipelineError::Malformed(format!("unknown operating mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Case-insensitive match of a sentence literal ("Left", "right", ...).
    pub fn from_literal(literal: &str) -> Option<Self> {
        if literal.eq_ignore_ascii_case("left") {
            Some(Side::Left)
        } else if literal.eq_ignore_ascii_case("right") {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body part keyword as seen by the pose-update table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Arm,
    Hand,
    Leg,
    Eyes,
    Head,
    Arms,
    Hands,
    /// Whole robot, or a part the pose does not track.
    Other,
}

impl BodyPart {
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(|k| k.to_ascii_lowercase()).as_deref() {
            Some("arm") => BodyPart::Arm,
            Some("hand") => BodyPart::Hand,
            Some("leg") => BodyPart::Leg,
            Some("eyes") => BodyPart::Eyes,
            Some("head") => BodyPart::Head,
            Some("arms") => BodyPart::Arms,
            Some("hands") => BodyPart::Hands,
            _ => BodyPart::Other,
        }
    }
}

/// Subsystem named by an incompatibility descriptor. `None` at use sites means
/// the whole-robot posture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Head,
    Arm,
    Hand,
    Leg,
}

impl Subsystem {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "head" => Some(Subsystem::Head),
            "arm" => Some(Subsystem::Arm),
            "hand" => Some(Subsystem::Hand),
            "leg" => Some(Subsystem::Leg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Subsystem::Head => "head",
            Subsystem::Arm => "arm",
            Subsystem::Hand => "hand",
            Subsystem::Leg => "leg",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque robot action identifier, `<parts>-<suffix>`.
///
/// The part segment is two characters for single actions (`AR-0`) and four for
/// compound ones (`ALAR-0`). The suffix is never interpreted beyond the leading
/// `C` of color actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionCode(String);

impl ActionCode {
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        let raw = raw.trim();
        match raw.split_once('-') {
            Some((parts, suffix)) if !parts.is_empty() && !suffix.is_empty() => {
                Ok(Self(raw.to_string()))
            }
            _ => Err(PipelineError::Malformed(format!("action code '{}' has no <part>-<action> shape", raw))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn part_segment(&self) -> &str {
        self.0.split_once('-').map(|(p, _)| p).unwrap_or(&self.0)
    }

    pub fn suffix(&self) -> &str {
        self.0.split_once('-').map(|(_, s)| s).unwrap_or("")
    }

    pub fn is_compound(&self) -> bool {
        self.part_segment().chars().count() == 4
    }

    /// Color actions carry an RGB payload once accepted.
    pub fn is_color_action(&self) -> bool {
        self.suffix().starts_with('C')
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ActionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// (verb, object, side) triple. Every slot may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionComponents {
    pub verb: Option<String>,
    pub object: Option<String>,
    pub side: Option<Side>,
}

impl ActionComponents {
    pub fn new(verb: Option<&str>, object: Option<&str>, side: Option<Side>) -> Self {
        Self {
            verb: verb.map(str::to_string),
            object: object.map(str::to_string),
            side,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.verb.is_none() && self.object.is_none() && self.side.is_none()
    }

    pub fn verb_str(&self) -> &str {
        self.verb.as_deref().unwrap_or("")
    }

    pub fn object_str(&self) -> &str {
        self.object.as_deref().unwrap_or("")
    }

    pub fn body_part(&self) -> BodyPart {
        BodyPart::from_keyword(self.object.as_deref())
    }
}

impl fmt::Display for ActionComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side.map(|s| s.as_str()).unwrap_or("");
        write!(f, "vb='{}' side='{}' obj='{}'", self.verb_str(), side, self.object_str())
    }
}

/// RGB payload of a color action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { red: 255, green: 255, blue: 255 };

    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}
