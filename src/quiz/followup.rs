//! Follow-up creation policy.
//!
//! Decides when a correct first-stage answer triggers a second question
//! ("up to how many big blinds do you call the reopen?") and what the
//! correct numeric answer is. The threshold comes from the tag itself.

use crate::range::resolver::{call_vs_open_threshold, limp_call_threshold, Action};

use super::generator::Kind;

/// The fixed numeric choices offered for a follow-up round.
pub const FOLLOWUP_CHOICES: [f64; 4] = [2.0, 2.25, 2.5, 3.0];

/// Prompt shown for the follow-up round.
pub const FOLLOWUP_PROMPT: &str =
    "Follow-up: up to how many big blinds do you call the reopen?";

/// A pending second-stage question.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowupContext {
    /// Hand key of the first-stage question.
    pub hand_key: String,
    /// The correct numeric answer, in big blinds.
    pub expected_max_bb: f64,
    /// Tag that produced this follow-up.
    pub source_tag: String,
}

/// Numeric follow-up threshold encoded in a tag, if any.
pub fn followup_threshold(tag: &str) -> Option<f64> {
    limp_call_threshold(tag).or_else(|| call_vs_open_threshold(tag))
}

/// Create the follow-up for a graded first stage, when one is due.
///
/// A follow-up only exists when the first stage was answered correctly:
/// - OR_SB with an expected limp whose tag carries a threshold, or
/// - 3-bet kind with an expected call on a `CALL_VS_OPEN_LE_*` tag.
pub fn maybe_create_followup(
    kind: Kind,
    tag: &str,
    expected_action: Action,
    hand_key: &str,
    stage1_correct: bool,
) -> Option<FollowupContext> {
    if !stage1_correct {
        return None;
    }

    let make = |threshold: f64| FollowupContext {
        hand_key: hand_key.to_string(),
        expected_max_bb: threshold,
        source_tag: tag.trim().to_string(),
    };

    match (kind, expected_action) {
        (Kind::OrSb, Action::Limp) => limp_call_threshold(tag).map(make),
        (Kind::ThreeBet, Action::Call) => call_vs_open_threshold(tag).map(make),
        _ => None,
    }
}
