//! Expected-action resolution.
//!
//! Pure mapping from a range tag plus situational context to the action the
//! reference strategy expects. All kind-specific business rules live here,
//! organized as a closed set of rule families recognized in one place, so
//! the tag space stays auditable as a single table-driven function.
//!
//! The resolver is total: every tag string and every context combination
//! yields exactly one [`ExpectedAction`], unknown tags included (safe
//! default: fold).

use std::fmt;

use super::table::sanitize_position;

/// The action vocabulary shared by the resolver and the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Muck the hand.
    Fold,
    /// Open, raise, or 3-bet.
    Raise,
    /// Flat call.
    Call,
    /// Check behind.
    Check,
    /// Limp in intending to call a reopen up to a threshold.
    Limp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Fold => "FOLD",
            Action::Raise => "RAISE",
            Action::Call => "CALL",
            Action::Check => "CHECK",
            Action::Limp => "LIMP_CALL",
        };
        write!(f, "{}", s)
    }
}

/// Situational context for one question, built fresh per judgment.
#[derive(Debug, Clone, Default)]
pub struct ProblemContext {
    /// Position label (kind-scoped, e.g. "EP", "BTN", "BB VS SB").
    pub position: String,
    /// Whether a loose opponent is at the table.
    pub loose_player_exists: bool,
    /// The heads-up big-blind-versus-small-blind subcase.
    pub bb_vs_sb: bool,
    /// Open/raise size shown to the user, in big blinds.
    pub open_size_bb: f64,
}

impl ProblemContext {
    /// Context for a position, deriving `bb_vs_sb` from the label.
    pub fn for_position(position: &str, loose_player_exists: bool) -> Self {
        Self {
            position: position.to_string(),
            loose_player_exists,
            bb_vs_sb: sanitize_position(position) == "BBVSSB",
            open_size_bb: 0.0,
        }
    }
}

/// What the reference strategy expects for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedAction {
    /// First-stage action.
    pub action: Action,
    /// Raise size or limp-call threshold, in big blinds.
    pub size_bb: Option<f64>,
    /// Whether a second-stage question must follow a correct answer.
    pub requires_followup: bool,
    /// Expected reaction for the second stage, when it is an action
    /// (3-bet-vs-4-bet reactions) rather than a numeric threshold.
    pub followup_expected_action: Option<Action>,
}

impl ExpectedAction {
    fn plain(action: Action) -> Self {
        Self {
            action,
            size_bb: None,
            requires_followup: false,
            followup_expected_action: None,
        }
    }

    fn fold() -> Self {
        Self::plain(Action::Fold)
    }

    fn call() -> Self {
        Self::plain(Action::Call)
    }

    fn check() -> Self {
        Self::plain(Action::Check)
    }

    fn raise(size_bb: f64) -> Self {
        Self {
            size_bb: Some(size_bb),
            ..Self::plain(Action::Raise)
        }
    }

    fn limp_call(threshold_bb: f64) -> Self {
        Self {
            size_bb: Some(threshold_bb),
            requires_followup: true,
            ..Self::plain(Action::Limp)
        }
    }

    fn raise_with_reaction(reaction: Action) -> Self {
        Self {
            requires_followup: true,
            followup_expected_action: Some(reaction),
            ..Self::plain(Action::Raise)
        }
    }
}

/// The closed set of rule families the tag space decomposes into.
#[derive(Debug, Clone, PartialEq)]
enum RuleFamily {
    Fold,
    OpenRaise { only_vs_fish: bool },
    SbOpenRaise3bb,
    SbLimpCall(f64),
    RolAlwaysRaise,
    RolRaise4bbBbVsSb,
    RolCall,
    RolCallVsFish,
    RolFoldNoFish,
    OverlimpCall,
    OverlimpCheckBbVsSb,
    ThreeBetWithReaction(Action),
    /// Deferred scenario: first-stage raise only, no follow-up rule.
    ThreeBetSituational,
    ThreeBetOther,
    CallVsOpen,
    FoldVsThreeBet,
    CallVsThreeBet,
    FourBetVsFiveBetFold,
    FourBetVsFiveBet,
    ShoveVs,
    Unknown,
}

/// Normalize a tag for family matching: NBSP squashed, trimmed, uppercased.
fn normalize_tag(tag: &str) -> String {
    tag.replace('\u{00A0}', " ").trim().to_ascii_uppercase()
}

/// Parse a numeric body where `_` stands for the decimal point ("2_25" -> 2.25).
fn parse_underscore_decimal(body: &str) -> Option<f64> {
    let s = body.replace('_', ".");
    if s.is_empty() {
        return None;
    }
    s.parse().ok()
}

/// Limp-call threshold encoded in a tag, across the spellings that occur
/// in real data builds:
/// - `SB_LIMP_CALL_LE_2_25BB` -> 2.25
/// - `LIMP_CALL_2_5_BB`       -> 2.5
/// - `LIMPCX2.5O` (legacy)    -> 2.5
pub fn limp_call_threshold(tag: &str) -> Option<f64> {
    let t = normalize_tag(tag).replace(' ', "");

    if let Some(body) = t.strip_prefix("SB_LIMP_CALL_LE_") {
        return parse_underscore_decimal(body.strip_suffix("BB")?);
    }
    if let Some(body) = t.strip_prefix("LIMP_CALL_") {
        return parse_underscore_decimal(body.strip_suffix("_BB")?);
    }
    if let Some(body) = t.strip_prefix("LIMPCX") {
        let body = body.strip_suffix('O').unwrap_or(body);
        if body.is_empty() {
            return None;
        }
        return body.parse().ok();
    }
    None
}

/// Call threshold encoded in a `CALL_VS_OPEN_LE_<N>X` tag.
pub fn call_vs_open_threshold(tag: &str) -> Option<f64> {
    let t = normalize_tag(tag).replace(' ', "");
    let body = t.strip_prefix("CALL_VS_OPEN_LE_")?.strip_suffix('X')?;
    parse_underscore_decimal(body)
}

/// Classify a normalized tag into its rule family.
fn classify(t: &str) -> RuleFamily {
    if t.is_empty() || t == "FOLD" || t == "OPEN_FOLD" {
        return RuleFamily::Fold;
    }
    // OPEN_TIGHT/TIGHT and OPEN_LOOSE/LOOSE are the legacy spellings of
    // the open family still present in older data builds.
    if t == "OPEN_RAISE" || t == "OPEN_TIGHT" || t == "TIGHT" {
        return RuleFamily::OpenRaise { only_vs_fish: false };
    }
    if t == "OPEN_RAISE_IF_FISH" || t == "OPEN_LOOSE" || t == "LOOSE" {
        return RuleFamily::OpenRaise { only_vs_fish: true };
    }
    if t == "SB_OPEN_RAISE_3BB" {
        return RuleFamily::SbOpenRaise3bb;
    }
    if let Some(threshold) = limp_call_threshold(t) {
        return RuleFamily::SbLimpCall(threshold);
    }

    match t {
        "ROL_ALWAYS_RAISE" => return RuleFamily::RolAlwaysRaise,
        "ROL_RAISE_4BB__BB_VS_SB" => return RuleFamily::RolRaise4bbBbVsSb,
        "ROL_CALL" => return RuleFamily::RolCall,
        "ROL_CALL__VS_FISH" => return RuleFamily::RolCallVsFish,
        "ROL_FOLD__NO_FISH" => return RuleFamily::RolFoldNoFish,
        "OVERLIMP_CALL" => return RuleFamily::OverlimpCall,
        "OVERLIMP_CHECK__BB_VS_SB" => return RuleFamily::OverlimpCheckBbVsSb,
        _ => {}
    }

    if t.starts_with("3BET_VS_4BET_") {
        return match t {
            "3BET_VS_4BET_SHOVE" => RuleFamily::ThreeBetWithReaction(Action::Raise),
            "3BET_VS_4BET_CALL" => RuleFamily::ThreeBetWithReaction(Action::Call),
            "3BET_VS_4BET_FOLD" => RuleFamily::ThreeBetWithReaction(Action::Fold),
            "3BET_VS_4BET_CALL_SITUATIONAL" => RuleFamily::ThreeBetSituational,
            _ => RuleFamily::ThreeBetOther,
        };
    }
    if t.starts_with("CALL_VS_OPEN_") {
        return RuleFamily::CallVsOpen;
    }
    if t == "FOLD_VS_3BET" {
        return RuleFamily::FoldVsThreeBet;
    }
    if t.starts_with("CALL_VS_3BET_") {
        return RuleFamily::CallVsThreeBet;
    }
    if t == "4BET_VS_5BET_FOLD" {
        return RuleFamily::FourBetVsFiveBetFold;
    }
    if t.starts_with("4BET_VS_5BET_") {
        return RuleFamily::FourBetVsFiveBet;
    }
    if t.starts_with("SHOVE_VS_") {
        return RuleFamily::ShoveVs;
    }

    RuleFamily::Unknown
}

/// Open-raise size by position: 2.5bb on the button, 3bb everywhere else.
fn open_raise_size(position: &str) -> f64 {
    match sanitize_position(position).as_str() {
        "BTN" => 2.5,
        _ => 3.0,
    }
}

/// Resolve a tag within its situational context.
pub fn resolve_expected_action(tag: &str, ctx: &ProblemContext) -> ExpectedAction {
    let t = normalize_tag(tag);

    match classify(&t) {
        RuleFamily::Fold => ExpectedAction::fold(),

        RuleFamily::OpenRaise { only_vs_fish } => {
            if only_vs_fish && !ctx.loose_player_exists {
                ExpectedAction::fold()
            } else {
                ExpectedAction::raise(open_raise_size(&ctx.position))
            }
        }
        RuleFamily::SbOpenRaise3bb => ExpectedAction::raise(3.0),
        RuleFamily::SbLimpCall(threshold) => ExpectedAction::limp_call(threshold),

        RuleFamily::RolAlwaysRaise => {
            // The BB-vs-SB subcase raises smaller
            if ctx.bb_vs_sb {
                ExpectedAction::raise(4.0)
            } else {
                ExpectedAction::raise(5.0)
            }
        }
        RuleFamily::RolRaise4bbBbVsSb => {
            if ctx.bb_vs_sb {
                ExpectedAction::raise(4.0)
            } else {
                ExpectedAction::call()
            }
        }
        RuleFamily::RolCall => ExpectedAction::call(),
        RuleFamily::RolCallVsFish => {
            if ctx.loose_player_exists {
                ExpectedAction::call()
            } else {
                ExpectedAction::fold()
            }
        }
        RuleFamily::RolFoldNoFish => ExpectedAction::fold(),
        RuleFamily::OverlimpCall => ExpectedAction::call(),
        RuleFamily::OverlimpCheckBbVsSb => {
            if ctx.bb_vs_sb {
                ExpectedAction::check()
            } else {
                ExpectedAction::call()
            }
        }

        RuleFamily::ThreeBetWithReaction(reaction) => ExpectedAction::raise_with_reaction(reaction),
        RuleFamily::ThreeBetSituational | RuleFamily::ThreeBetOther => {
            ExpectedAction::plain(Action::Raise)
        }
        RuleFamily::CallVsOpen | RuleFamily::CallVsThreeBet => ExpectedAction::call(),
        RuleFamily::FoldVsThreeBet | RuleFamily::FourBetVsFiveBetFold => ExpectedAction::fold(),
        RuleFamily::FourBetVsFiveBet | RuleFamily::ShoveVs => ExpectedAction::plain(Action::Raise),

        RuleFamily::Unknown => ExpectedAction::fold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(position: &str) -> ProblemContext {
        ProblemContext::for_position(position, false)
    }

    fn ctx_loose(position: &str) -> ProblemContext {
        ProblemContext::for_position(position, true)
    }

    #[test]
    fn test_open_raise_size_by_position() {
        let ea = resolve_expected_action("OPEN_RAISE", &ctx("BTN"));
        assert_eq!(ea.action, Action::Raise);
        assert_eq!(ea.size_bb, Some(2.5));

        // Legacy spellings resolve identically
        let ea = resolve_expected_action("OPEN_TIGHT", &ctx("BTN"));
        assert_eq!((ea.action, ea.size_bb), (Action::Raise, Some(2.5)));
        let ea = resolve_expected_action("OPEN_LOOSE", &ctx_loose("CO"));
        assert_eq!((ea.action, ea.size_bb), (Action::Raise, Some(3.0)));

        let ea = resolve_expected_action("OPEN_RAISE", &ctx("EP"));
        assert_eq!(ea.size_bb, Some(3.0));
        let ea = resolve_expected_action("OPEN_RAISE", &ctx("CO"));
        assert_eq!(ea.size_bb, Some(3.0));
    }

    #[test]
    fn test_open_raise_if_fish_gated() {
        let ea = resolve_expected_action("OPEN_RAISE_IF_FISH", &ctx("MP"));
        assert_eq!(ea.action, Action::Fold);

        let ea = resolve_expected_action("OPEN_RAISE_IF_FISH", &ctx_loose("MP"));
        assert_eq!(ea.action, Action::Raise);
        assert_eq!(ea.size_bb, Some(3.0));
    }

    #[test]
    fn test_sb_tags() {
        let ea = resolve_expected_action("SB_OPEN_RAISE_3BB", &ctx("SB"));
        assert_eq!(ea.action, Action::Raise);
        assert_eq!(ea.size_bb, Some(3.0));

        let ea = resolve_expected_action("SB_LIMP_CALL_LE_2_25BB", &ctx("SB"));
        assert_eq!(ea.action, Action::Limp);
        assert_eq!(ea.size_bb, Some(2.25));
        assert!(ea.requires_followup);
    }

    #[test]
    fn test_limp_call_threshold_spellings() {
        assert_eq!(limp_call_threshold("SB_LIMP_CALL_LE_3BB"), Some(3.0));
        assert_eq!(limp_call_threshold("SB_LIMP_CALL_LE_2_5BB"), Some(2.5));
        assert_eq!(limp_call_threshold("LIMP_CALL_2_5_BB"), Some(2.5));
        assert_eq!(limp_call_threshold("LIMP_CALL_2_BB"), Some(2.0));
        assert_eq!(limp_call_threshold("LimpCx2.25o"), Some(2.25));
        assert_eq!(limp_call_threshold("LimpCx3o"), Some(3.0));
        assert_eq!(limp_call_threshold("OPEN_RAISE"), None);
        assert_eq!(limp_call_threshold("LIMPCX"), None);
    }

    #[test]
    fn test_call_vs_open_threshold() {
        assert_eq!(call_vs_open_threshold("CALL_VS_OPEN_LE_2_5X"), Some(2.5));
        assert_eq!(call_vs_open_threshold("CALL_VS_OPEN_LE_3X"), Some(3.0));
        assert_eq!(call_vs_open_threshold("CALL_VS_3BET_IP"), None);
    }

    #[test]
    fn test_rol_family() {
        let ea = resolve_expected_action("ROL_ALWAYS_RAISE", &ctx("CO"));
        assert_eq!((ea.action, ea.size_bb), (Action::Raise, Some(5.0)));

        let ea = resolve_expected_action("ROL_ALWAYS_RAISE", &ctx("BB vs SB"));
        assert_eq!((ea.action, ea.size_bb), (Action::Raise, Some(4.0)));

        let ea = resolve_expected_action("ROL_RAISE_4BB__BB_VS_SB", &ctx("BBvsSB"));
        assert_eq!((ea.action, ea.size_bb), (Action::Raise, Some(4.0)));
        let ea = resolve_expected_action("ROL_RAISE_4BB__BB_VS_SB", &ctx("BTN"));
        assert_eq!(ea.action, Action::Call);

        assert_eq!(
            resolve_expected_action("ROL_CALL__VS_FISH", &ctx_loose("MP")).action,
            Action::Call
        );
        assert_eq!(
            resolve_expected_action("ROL_CALL__VS_FISH", &ctx("MP")).action,
            Action::Fold
        );

        let ea = resolve_expected_action("OVERLIMP_CHECK__BB_VS_SB", &ctx("BBvsSB"));
        assert_eq!(ea.action, Action::Check);
        // Non-BB-vs-SB context still resolves, never fails
        let ea = resolve_expected_action("OVERLIMP_CHECK__BB_VS_SB", &ctx("SB"));
        assert_eq!(ea.action, Action::Call);
    }

    #[test]
    fn test_three_bet_pipeline() {
        let ea = resolve_expected_action("3BET_VS_4BET_SHOVE", &ctx("BB vs SB"));
        assert_eq!(ea.action, Action::Raise);
        assert!(ea.requires_followup);
        assert_eq!(ea.followup_expected_action, Some(Action::Raise));

        let ea = resolve_expected_action("3BET_VS_4BET_CALL", &ctx("SB vs BTN"));
        assert_eq!(ea.followup_expected_action, Some(Action::Call));

        let ea = resolve_expected_action("3BET_VS_4BET_FOLD", &ctx("CO vs EP"));
        assert_eq!(ea.followup_expected_action, Some(Action::Fold));

        // Deferred scenario: first stage only
        let ea = resolve_expected_action("3BET_VS_4BET_CALL_SITUATIONAL", &ctx("BB vs SB"));
        assert_eq!(ea.action, Action::Raise);
        assert!(!ea.requires_followup);

        assert_eq!(
            resolve_expected_action("CALL_VS_OPEN_LE_2_5X", &ctx("BB vs SB")).action,
            Action::Call
        );
        assert_eq!(
            resolve_expected_action("FOLD_VS_3BET", &ctx("BTN vs CO")).action,
            Action::Fold
        );
        assert_eq!(
            resolve_expected_action("CALL_VS_3BET_IP", &ctx("BTN vs CO")).action,
            Action::Call
        );
        assert_eq!(
            resolve_expected_action("4BET_VS_5BET_FOLD", &ctx("BTN")).action,
            Action::Fold
        );
        assert_eq!(
            resolve_expected_action("4BET_VS_5BET_SHOVE", &ctx("BTN")).action,
            Action::Raise
        );
        assert_eq!(
            resolve_expected_action("SHOVE_VS_OPEN", &ctx("SB")).action,
            Action::Raise
        );
    }

    #[test]
    fn test_unknown_tags_fold() {
        assert_eq!(
            resolve_expected_action("SOME_FUTURE_TAG", &ctx("EP")).action,
            Action::Fold
        );
        assert_eq!(resolve_expected_action("", &ctx("EP")).action, Action::Fold);
    }

    #[test]
    fn test_determinism() {
        let c = ctx_loose("BTN");
        let a = resolve_expected_action("OPEN_RAISE_IF_FISH", &c);
        let b = resolve_expected_action("OPEN_RAISE_IF_FISH", &c);
        assert_eq!(a, b);
    }
}
