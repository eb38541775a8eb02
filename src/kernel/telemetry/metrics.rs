use serde::Serialize;
use std::collections::{HashMap, VecDeque};

use super::event::{RejectionTarget, TelemetryEvent};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub sentence_stats: SentenceStats,
    pub action_stats: ActionStats,
    pub mode_stats: ModeStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentenceStats {
    pub analyzed: u64,
    pub no_action: u64,
    pub ambiguous: u64,
    pub avg_tokens: f64,
    pub avg_results: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionStats {
    pub accepted: u64,
    pub rejected: u64,
    pub rejected_by_robot: u64,
    pub disambiguated: u64,
    pub per_code: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModeStats {
    pub switches: u64,
    pub resets: u64,
    pub reset_steps: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    let mut total_tokens = 0u64;
    let mut total_results = 0u64;

    for event in events {
        match event {
            TelemetryEvent::SentenceAnalyzed { tokens, results } => {
                snap.sentence_stats.analyzed += 1;
                total_tokens += *tokens as u64;
                total_results += *results as u64;
            }
            TelemetryEvent::ActionAccepted { code } => {
                snap.action_stats.accepted += 1;
                *snap.action_stats.per_code.entry(code.clone()).or_insert(0) += 1;
            }
            TelemetryEvent::ActionRejected { blocked_by, .. } => {
                snap.action_stats.rejected += 1;
                if *blocked_by == RejectionTarget::Robot {
                    snap.action_stats.rejected_by_robot += 1;
                }
            }
            TelemetryEvent::Ambiguity { .. } => snap.sentence_stats.ambiguous += 1,
            TelemetryEvent::NoAction => snap.sentence_stats.no_action += 1,
            TelemetryEvent::ModeChanged { .. } => snap.mode_stats.switches += 1,
            TelemetryEvent::PoseReset { steps } => {
                snap.mode_stats.resets += 1;
                snap.mode_stats.reset_steps += *steps as u64;
            }
            TelemetryEvent::DisambiguationApplied { .. } => snap.action_stats.disambiguated += 1,
        }
    }

    // Averages
    if snap.sentence_stats.analyzed > 0 {
        let n = snap.sentence_stats.analyzed as f64;
        snap.sentence_stats.avg_tokens = total_tokens as f64 / n;
        snap.sentence_stats.avg_results = total_results as f64 / n;
    }

    snap
}
