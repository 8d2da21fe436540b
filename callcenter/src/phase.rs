//! Contract lifecycle phases and the status-label transition table.
//!
//! The lifecycle is linear: entry → preconfirm → handling → postconfirm →
//! completed. Transitions are driven by four fixed status labels; the
//! table applies whatever phase the label maps to, so an out-of-order
//! label can regress the phase. `completed` has no outgoing label but is
//! not otherwise protected.

use serde::{Deserialize, Serialize};

/// One of the five fixed lifecycle stages of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Entry,
    Preconfirm,
    Handling,
    Postconfirm,
    Completed,
}

impl Phase {
    /// The phase a recognized status label transitions to, if any.
    pub fn for_status_label(label: &str) -> Option<Phase> {
        match label {
            "エントリ完了→前確へ" => Some(Phase::Preconfirm),
            "前確OK→対応へ" => Some(Phase::Handling),
            "対応完了→後確へ" => Some(Phase::Postconfirm),
            "後確OK→完了" => Some(Phase::Completed),
            _ => None,
        }
    }
}

/// Resolve the phase an update-status call lands on.
///
/// A matching label wins over an explicitly supplied `phase`; the
/// explicit value is consulted only when no label matches, and the
/// current phase is kept otherwise.
pub fn next_phase(current: Phase, explicit: Option<Phase>, status_label: &str) -> Phase {
    Phase::for_status_label(status_label)
        .or(explicit)
        .unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_table_maps_all_four_transitions() {
        assert_eq!(
            Phase::for_status_label("エントリ完了→前確へ"),
            Some(Phase::Preconfirm)
        );
        assert_eq!(
            Phase::for_status_label("前確OK→対応へ"),
            Some(Phase::Handling)
        );
        assert_eq!(
            Phase::for_status_label("対応完了→後確へ"),
            Some(Phase::Postconfirm)
        );
        assert_eq!(
            Phase::for_status_label("後確OK→完了"),
            Some(Phase::Completed)
        );
    }

    #[test]
    fn unknown_label_maps_to_nothing() {
        assert_eq!(Phase::for_status_label("再コール"), None);
        assert_eq!(Phase::for_status_label(""), None);
    }

    #[test]
    fn matching_label_wins_over_explicit_phase() {
        let phase = next_phase(Phase::Entry, Some(Phase::Completed), "エントリ完了→前確へ");
        assert_eq!(phase, Phase::Preconfirm);
    }

    #[test]
    fn explicit_phase_used_when_no_label_matches() {
        let phase = next_phase(Phase::Entry, Some(Phase::Handling), "再コール");
        assert_eq!(phase, Phase::Handling);
    }

    #[test]
    fn current_phase_kept_without_label_or_explicit() {
        let phase = next_phase(Phase::Handling, None, "顧客不在");
        assert_eq!(phase, Phase::Handling);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&Phase::Preconfirm).unwrap(),
            "\"preconfirm\""
        );
        let parsed: Phase = serde_json::from_str("\"postconfirm\"").unwrap();
        assert_eq!(parsed, Phase::Postconfirm);
    }
}
