use serde::{Serialize, Serializer};
use std::fmt;

use super::types::{ActionCode, OperatingMode, Rgb, Subsystem};

/// Steps of the pose reset sequence, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResetStep {
    LowerLeftLeg,
    LowerRightLeg,
    Stand,
    StaticEyes,
    WhiteEyes,
}

impl fmt::Display for ResetStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetStep::LowerLeftLeg => write!(f, "LL-1"),
            ResetStep::LowerRightLeg => write!(f, "LR-1"),
            ResetStep::Stand => write!(f, "RR-00"),
            ResetStep::StaticEyes => write!(f, "ELER-0"),
            ResetStep::WhiteEyes => write!(f, "ELER-C:{}", Rgb::WHITE),
        }
    }
}

/// One entry of a sentence's result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionToken {
    /// Accepted action.
    Action(ActionCode),
    /// Accepted color action; `None` when the sentence named no known color.
    ColorAction { code: ActionCode, rgb: Option<Rgb> },
    Reset(ResetStep),
    /// `ERR-NA`
    NoAction,
    /// `ERR-MA:c1/c2/`
    Ambiguous(Vec<ActionCode>),
    /// `ERR-INC:...`
    Incompatible {
        subsystem: Option<Subsystem>,
        keyword: String,
    },
    /// `SAY-MH` / `SAY-MS`
    ModeAdvisory(OperatingMode),
    /// Mode request that matched the current mode.
    ModeUnchanged,
}

impl ActionToken {
    /// Ambiguity token. A code equal (ignoring case) to the one right before it is dropped.
    pub fn ambiguous(codes: Vec<ActionCode>) -> Self {
        let mut listed: Vec<ActionCode> = Vec::with_capacity(codes.len());
        for code in codes {
            let repeat = listed
                .last()
                .is_some_and(|prev| prev.as_str().eq_ignore_ascii_case(code.as_str()));
            if !repeat {
                listed.push(code);
            }
        }
        ActionToken::Ambiguous(listed)
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ActionToken::NoAction | ActionToken::Ambiguous(_) | ActionToken::Incompatible { .. }
        )
    }

    /// Accepted action code, if this token is one.
    pub fn accepted_code(&self) -> Option<&ActionCode> {
        match self {
            ActionToken::Action(code) | ActionToken::ColorAction { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionToken::Action(code) => write!(f, "{}", code),
            ActionToken::ColorAction { code, rgb: Some(rgb) } => write!(f, "{}:{}", code, rgb),
            ActionToken::ColorAction { code, rgb: None } => write!(f, "{}:", code),
            ActionToken::Reset(step) => write!(f, "{}", step),
            ActionToken::NoAction => write!(f, "ERR-NA"),
            ActionToken::Ambiguous(codes) => {
                write!(f, "ERR-MA:")?;
                for code in codes {
                    write!(f, "{}/", code)?;
                }
                Ok(())
            }
            ActionToken::Incompatible {
                subsystem: Some(subsystem),
                keyword,
            } => write!(f, "ERR-INC:{} {}", subsystem, keyword),
            ActionToken::Incompatible { subsystem: None, keyword } => write!(f, "ERR-INC:{}", keyword),
            ActionToken::ModeAdvisory(OperatingMode::Hold) => write!(f, "SAY-MH"),
            ActionToken::ModeAdvisory(OperatingMode::Sequential) => write!(f, "SAY-MS"),
            ActionToken::ModeUnchanged => Ok(()),
        }
    }
}

impl Serialize for ActionToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Wire framing: every token followed by `;`.
pub fn frame(tokens: &[ActionToken]) -> String {
    tokens.iter().map(|t| format!("{};", t)).collect()
}

/// Plain string form of a result list.
pub fn render(tokens: &[ActionToken]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}
