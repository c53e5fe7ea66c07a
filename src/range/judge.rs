//! Verdict production.
//!
//! The judge glues the range table and the expected-action resolver into a
//! single-call API per strategy kind, and normalizes the user's free-form
//! action string into the resolver's vocabulary before comparing.

use super::resolver::{
    call_vs_open_threshold, limp_call_threshold, resolve_expected_action, Action, ExpectedAction,
    ProblemContext,
};
use super::table::{LookupTrace, RangeTable};

/// Kind key for the open-raise table (EP/MP/CO/BTN).
pub const KIND_OR: &str = "OR";
/// Kind key for the small-blind open table.
pub const KIND_OR_SB: &str = "OR_SB";
/// Kind key for the 3-bet pipeline table.
pub const KIND_3BET: &str = "3BET";
/// Kind key for the raise-over-limpers table.
pub const KIND_ROL: &str = "ROL";

/// Uniform debug payload attached to every verdict.
///
/// This is the contract the popup-rendering and progress-logging layers
/// rely on: `kind`, `position`, `hand`, `tag` and `expected_action` are
/// always populated regardless of kind.
#[derive(Debug, Clone)]
pub struct VerdictDebug {
    /// Strategy kind that was judged.
    pub kind: String,
    /// Position as given by the caller.
    pub position: String,
    /// Hand as given by the caller.
    pub hand: String,
    /// Raw tag from the range table.
    pub tag: String,
    /// Whether a loose opponent was in play.
    pub loose: bool,
    /// The user's action after normalization.
    pub user_action: String,
    /// The expected first-stage action.
    pub expected_action: String,
    /// Raise size or limp threshold, when the rule carries one.
    pub size_bb: Option<f64>,
    /// Whether the rule demands a second-stage question.
    pub requires_followup: bool,
    /// Numeric follow-up threshold encoded in the tag, when present.
    pub followup_expected_max_bb: Option<f64>,
    /// Trace from the repository lookup.
    pub repo: LookupTrace,
}

/// Result of judging one submitted answer.
#[derive(Debug, Clone)]
pub struct Verdict {
    /// The expected action, as a display string.
    pub action: String,
    /// Whether the user's answer matched it.
    pub correct: bool,
    /// Human-readable explanation.
    pub reason: String,
    /// Uniform debug payload.
    pub debug: VerdictDebug,
    /// The fully resolved expected action.
    pub expected: ExpectedAction,
}

/// Normalize a user-submitted action string into the action vocabulary.
///
/// `limp_action` decides what the limp-flavored synonyms mean: [`Action::Limp`]
/// for kinds where limping is a first-class choice (OR_SB), [`Action::Call`]
/// elsewhere (ROL, 3-bet family). Returns `None` for unrecognized input.
pub fn normalize_user_action(user_action: &str, limp_action: Action) -> Option<Action> {
    let ua = user_action.replace('\u{00A0}', " ").trim().to_ascii_uppercase();

    if ua.is_empty() || ua == "FOLD" {
        return Some(Action::Fold);
    }
    if ua.starts_with("OPEN") || ua.starts_with("RAISE") || ua.starts_with("3BET") {
        return Some(Action::Raise);
    }
    if ua == "LIMP_CALL" || ua == "LIMP" || ua == "CHECK_CALL" {
        return Some(limp_action);
    }
    if ua == "CALL" {
        return Some(Action::Call);
    }
    if ua == "CHECK" {
        return Some(Action::Check);
    }
    None
}

/// Single-call verdict API over a loaded range table.
#[derive(Debug, Clone, Copy)]
pub struct Judge<'a> {
    table: &'a RangeTable,
}

impl<'a> Judge<'a> {
    /// Create a judge over an immutable range table.
    pub fn new(table: &'a RangeTable) -> Self {
        Self { table }
    }

    /// Judge an open-raise question (EP/MP/CO/BTN).
    pub fn judge_or(&self, position: &str, hand: &str, user_action: &str, loose: bool) -> Verdict {
        self.judge(KIND_OR, position, hand, user_action, loose, Action::Limp)
    }

    /// Judge a small-blind open question. Position is always SB and the
    /// loose flag never applies.
    pub fn judge_or_sb(&self, hand: &str, user_action: &str) -> Verdict {
        self.judge(KIND_OR_SB, "SB", hand, user_action, false, Action::Limp)
    }

    /// Judge a 3-bet pipeline question. Limp synonyms mean Call here.
    pub fn judge_3bet(&self, position: &str, hand: &str, user_action: &str) -> Verdict {
        self.judge(KIND_3BET, position, hand, user_action, false, Action::Call)
    }

    /// Judge a raise-over-limpers question. Limp synonyms mean Call here.
    pub fn judge_rol(&self, position: &str, hand: &str, user_action: &str, loose: bool) -> Verdict {
        self.judge(KIND_ROL, position, hand, user_action, loose, Action::Call)
    }

    fn judge(
        &self,
        kind: &str,
        position: &str,
        hand: &str,
        user_action: &str,
        loose: bool,
        limp_action: Action,
    ) -> Verdict {
        let (tag, repo) = self.table.get_tag_for_hand(kind, position, hand);

        let ctx = ProblemContext::for_position(position, loose);
        let expected = resolve_expected_action(&tag, &ctx);

        let normalized = normalize_user_action(user_action, limp_action);
        let correct = normalized == Some(expected.action);

        let expected_str = expected.action.to_string();
        let reason = match expected.size_bb {
            Some(size) => format!("Tag={} -> {} ({}BB)", tag, expected_str, size),
            None => format!("Tag={} -> {}", tag, expected_str),
        };

        let debug = VerdictDebug {
            kind: kind.to_string(),
            position: position.to_string(),
            hand: hand.to_string(),
            tag: tag.clone(),
            loose,
            user_action: normalized
                .map(|a| a.to_string())
                .unwrap_or_else(|| user_action.trim().to_ascii_uppercase()),
            expected_action: expected_str.clone(),
            size_bb: expected.size_bb,
            requires_followup: expected.requires_followup,
            followup_expected_max_bb: limp_call_threshold(&tag)
                .or_else(|| call_vs_open_threshold(&tag)),
            repo,
        };

        Verdict {
            action: expected_str,
            correct,
            reason,
            debug,
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::table::RangeTable;

    const TEST_DOC: &str = r#"{
        "ranges": {
            "OR": {
                "BTN": { "AA": "OPEN_TIGHT", "T9S": "OPEN_RAISE_IF_FISH" },
                "EP": { "AA": "OPEN_RAISE" }
            },
            "OR_SB": {
                "SB": {
                    "KK": "SB_OPEN_RAISE_3BB",
                    "87S": "LIMP_CALL_2_5_BB"
                }
            },
            "3BET": {
                "BB VS SB": {
                    "QQ": "3BET_VS_4BET_SHOVE",
                    "76S": "CALL_VS_OPEN_LE_2_5X"
                }
            },
            "ROL": {
                "BBVSSB": { "AA": "ROL_RAISE_4BB__BB_VS_SB" },
                "CO": { "98S": "ROL_CALL__VS_FISH" }
            }
        },
        "legend_by_kind": {
            "OR": { "OPEN_TIGHT": "D7E4BC", "OPEN_RAISE": "D7E4BC", "OPEN_RAISE_IF_FISH": "FFF2CC" }
        }
    }"#;

    fn table() -> RangeTable {
        RangeTable::from_json_str(TEST_DOC).unwrap()
    }

    #[test]
    fn test_judge_or_open_tight_raise() {
        let t = table();
        let judge = Judge::new(&t);

        // AA on the button tagged OPEN_TIGHT: raise 2.5bb
        let v = judge.judge_or("BTN", "AA", "RAISE", false);
        assert!(v.correct);
        assert_eq!(v.action, "RAISE");
        assert_eq!(v.debug.size_bb, Some(2.5));

        let v = judge.judge_or("EP", "AA", "RAISE", false);
        assert!(v.correct);
        assert_eq!(v.debug.size_bb, Some(3.0));

        let v = judge.judge_or("EP", "AA", "FOLD", false);
        assert!(!v.correct);
        assert_eq!(v.debug.expected_action, "RAISE");
    }

    #[test]
    fn test_judge_or_fish_gate() {
        let t = table();
        let judge = Judge::new(&t);

        let v = judge.judge_or("BTN", "T9S", "RAISE", true);
        assert!(v.correct);
        assert_eq!(v.debug.size_bb, Some(2.5));

        let v = judge.judge_or("BTN", "T9S", "FOLD", false);
        assert!(v.correct);
    }

    #[test]
    fn test_judge_or_sb_limp_call() {
        let t = table();
        let judge = Judge::new(&t);

        let v = judge.judge_or_sb("87S", "LIMP_CALL");
        assert!(v.correct);
        assert_eq!(v.action, "LIMP_CALL");
        assert!(v.debug.requires_followup);
        assert_eq!(v.debug.followup_expected_max_bb, Some(2.5));

        // LIMP and CHECK_CALL are synonyms here
        assert!(judge.judge_or_sb("87S", "LIMP").correct);
        assert!(judge.judge_or_sb("87S", "CHECK_CALL").correct);
        assert!(!judge.judge_or_sb("87S", "RAISE").correct);
    }

    #[test]
    fn test_judge_3bet_two_stage_tag() {
        let t = table();
        let judge = Judge::new(&t);

        let v = judge.judge_3bet("BB vs SB", "QQ", "3BET");
        assert!(v.correct);
        assert_eq!(v.action, "RAISE");
        assert!(v.debug.requires_followup);
        assert_eq!(v.expected.followup_expected_action, Some(Action::Raise));

        // Limp synonyms mean Call in the 3-bet family
        let v = judge.judge_3bet("BB vs SB", "76S", "LIMP_CALL");
        assert!(v.correct);
        assert_eq!(v.action, "CALL");
        assert_eq!(v.debug.followup_expected_max_bb, Some(2.5));
    }

    #[test]
    fn test_judge_rol_bb_vs_sb() {
        let t = table();
        let judge = Judge::new(&t);

        let v = judge.judge_rol("BBvsSB", "AA", "RAISE", false);
        assert!(v.correct);
        assert_eq!(v.debug.size_bb, Some(4.0));

        let v = judge.judge_rol("CO", "98S", "CALL", true);
        assert!(v.correct);
        let v = judge.judge_rol("CO", "98S", "CALL", false);
        assert!(!v.correct);
        assert_eq!(v.debug.expected_action, "FOLD");
    }

    #[test]
    fn test_debug_payload_uniform() {
        let t = table();
        let judge = Judge::new(&t);

        // Lookup miss still fills the whole payload
        let v = judge.judge_or("ZZ_UNKNOWN_POS", "AKS", "FOLD", false);
        assert!(v.correct); // miss defaults to FOLD
        assert_eq!(v.debug.kind, "OR");
        assert_eq!(v.debug.tag, "FOLD");
        assert!(!v.debug.repo.found_position);
    }

    #[test]
    fn test_unrecognized_action_is_incorrect() {
        let t = table();
        let judge = Judge::new(&t);
        let v = judge.judge_or("EP", "AA", "JAM", false);
        assert!(!v.correct);
    }
}
