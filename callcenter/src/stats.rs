//! Per-phase aggregation over a materialized contract collection.
//!
//! Recomputed from scratch on every call; linear in collection size.

use crate::models::Contract;
use crate::phase::Phase;
use crate::protocol::PhaseStats;

/// Count contracts per phase. The per-phase counts always sum to `total`.
pub fn phase_counts(contracts: &[Contract]) -> PhaseStats {
    let count = |phase: Phase| contracts.iter().filter(|c| c.phase == phase).count();
    PhaseStats {
        entry: count(Phase::Entry),
        preconfirm: count(Phase::Preconfirm),
        handling: count(Phase::Handling),
        postconfirm: count(Phase::Postconfirm),
        completed: count(Phase::Completed),
        total: contracts.len(),
    }
}
