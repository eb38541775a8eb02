pub mod engine;
pub mod pose;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod token;
pub mod types;

pub use engine::{detect_mode_directive, ActionExtractor, AnchorOutcome, AnchorTrace, ConsumedSet, SentenceContext};
pub use pose::RobotPose;
pub use session::{split_sentences, Session, SessionId, SessionStatus, CHOICE_MARKER};
pub use state::{AcceptRequest, ColorMatch, GateDecision, PoseDelta, RobotState};
pub use token::{frame, render, ActionToken, ResetStep};
pub use types::*;
