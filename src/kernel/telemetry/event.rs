use serde::{Deserialize, Serialize};

use crate::kernel::types::{OperatingMode, Subsystem};

// Allowed: action codes, modes, counts
// Forbidden: sentence text, token literals

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    SentenceAnalyzed {
        tokens: usize,
        results: usize,
    },

    ActionAccepted {
        code: String,
    },

    ActionRejected {
        code: String,
        blocked_by: RejectionTarget,
    },

    Ambiguity {
        candidates: usize,
    },

    NoAction,

    ModeChanged {
        from: OperatingMode,
        to: OperatingMode,
    },

    PoseReset {
        steps: usize,
    },

    DisambiguationApplied {
        code: String,
        resumed: bool,
    },
}

/// Slot that blocked a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionTarget {
    Robot,
    Subsystem(Subsystem),
}

impl From<Option<Subsystem>> for RejectionTarget {
    fn from(subsystem: Option<Subsystem>) -> Self {
        match subsystem {
            Some(s) => RejectionTarget::Subsystem(s),
            None => RejectionTarget::Robot,
        }
    }
}
