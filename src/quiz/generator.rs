//! Question generation.
//!
//! Deals random (kind, position, hand, flags) spots per difficulty pool.
//! The RNG is always passed in by the caller; the generator itself holds
//! no mutable state, so one instance can serve any number of sessions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::range::cards::{Deck, HoleCards};
use crate::range::grid::cards_to_hand_key;
use crate::range::judge::{KIND_3BET, KIND_OR, KIND_OR_SB, KIND_ROL};
use crate::range::table::RangeTable;

/// Quiz difficulty; each level owns a pool of question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Open-raise questions only.
    Beginner,
    /// Small-blind opens and the 3-bet pipeline.
    Intermediate,
    /// Raise-over-limpers questions.
    Advanced,
}

/// The strategy kinds the quiz can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Open raise from EP/MP/CO/BTN.
    Or,
    /// Small-blind open (raise / limp-call / fold).
    OrSb,
    /// Facing an open: call / 3-bet / fold.
    ThreeBet,
    /// Reacting to limpers: raise-over-limp / overlimp / fold.
    Rol,
}

impl Kind {
    /// The range-table kind key for this quiz kind.
    pub fn key(&self) -> &'static str {
        match self {
            Kind::Or => KIND_OR,
            Kind::OrSb => KIND_OR_SB,
            Kind::ThreeBet => KIND_3BET,
            Kind::Rol => KIND_ROL,
        }
    }

    /// Action strings a user may submit for this kind.
    pub fn allowed_actions(&self) -> &'static [&'static str] {
        match self {
            Kind::Rol => &["FOLD", "RAISE", "CALL", "CHECK", "LIMP_CALL"],
            Kind::ThreeBet => &["FOLD", "RAISE", "CALL"],
            _ => &["FOLD", "RAISE", "LIMP_CALL"],
        }
    }
}

/// One generated quiz spot.
#[derive(Debug, Clone)]
pub struct Question {
    /// Which strategy table the question is about.
    pub kind: Kind,
    /// The dealt hole cards.
    pub hole_cards: HoleCards,
    /// Canonical hand key for the dealt cards.
    pub hand_key: String,
    /// Position label for the spot.
    pub position: String,
    /// Open/raise size shown to the user, in big blinds.
    pub open_size_bb: f64,
    /// Whether a loose opponent is at the table.
    pub loose_player_exists: bool,
    /// Prompt line shown above the answer buttons.
    pub header: String,
}

/// Deals quiz spots from the standard 52-card deck.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    deck: Deck,
    /// 3-bet positions come from the data build, not from hardcoded names.
    positions_3bet: Vec<String>,
}

impl QuestionGenerator {
    /// Create a generator with an explicit 3-bet position list.
    pub fn new(positions_3bet: Vec<String>) -> Self {
        Self {
            deck: Deck::new(),
            positions_3bet,
        }
    }

    /// Create a generator taking its 3-bet positions from a loaded table.
    pub fn from_table(table: &RangeTable) -> Self {
        Self::new(table.list_positions(KIND_3BET))
    }

    /// Generate one question for a difficulty level.
    pub fn generate<R: Rng>(&self, rng: &mut R, difficulty: Difficulty) -> Question {
        let kind = self.pick_kind(rng, difficulty);
        self.generate_for_kind(rng, kind)
    }

    fn pick_kind<R: Rng>(&self, rng: &mut R, difficulty: Difficulty) -> Kind {
        let pool: &[Kind] = match difficulty {
            Difficulty::Beginner => &[Kind::Or],
            Difficulty::Intermediate => &[Kind::OrSb, Kind::ThreeBet],
            Difficulty::Advanced => &[Kind::Rol],
        };
        *pool.choose(rng).unwrap_or(&Kind::Or)
    }

    /// Generate one question of a specific kind.
    pub fn generate_for_kind<R: Rng>(&self, rng: &mut R, kind: Kind) -> Question {
        let hole_cards = self.deck.deal_two(rng);
        let hand_key = cards_to_hand_key(hole_cards.card1, hole_cards.card2);

        match kind {
            Kind::Or => {
                let position = *["EP", "MP", "CO", "BTN"].choose(rng).unwrap_or(&"EP");
                let loose = rng.gen_bool(0.5);
                let open_size = if position == "BTN" { 2.5 } else { 3.0 };
                let loose_msg = if loose { " | loose player at the table" } else { "" };
                Question {
                    kind,
                    hole_cards,
                    hand_key,
                    position: position.to_string(),
                    open_size_bb: open_size,
                    loose_player_exists: loose,
                    header: format!(
                        "[Beginner] Open raise (OR) | Pos: {} | {}BB{}",
                        position, open_size, loose_msg
                    ),
                }
            }
            Kind::OrSb => Question {
                kind,
                hole_cards,
                hand_key,
                position: "SB".to_string(),
                open_size_bb: 3.0,
                loose_player_exists: false,
                header: "[Intermediate] SB open (OR_SB) | Pos: SB | 3BB".to_string(),
            },
            Kind::ThreeBet => {
                let position = self
                    .positions_3bet
                    .choose(rng)
                    .cloned()
                    .unwrap_or_else(|| "BB VS SB".to_string());
                Question {
                    kind,
                    hole_cards,
                    hand_key,
                    header: format!("[Intermediate] 3-bet decision | Pos: {}", position),
                    position,
                    open_size_bb: 0.0,
                    loose_player_exists: false,
                }
            }
            Kind::Rol => {
                let position = *["MP", "CO", "BTN", "SB", "BB_OOP", "BBVSSB"]
                    .choose(rng)
                    .unwrap_or(&"MP");
                let loose = rng.gen_bool(0.5);
                let raise_size = if position == "BBVSSB" { 4.0 } else { 5.0 };
                let loose_msg = if loose { " | loose player at the table" } else { "" };
                Question {
                    kind,
                    hole_cards,
                    hand_key,
                    position: position.to_string(),
                    open_size_bb: raise_size,
                    loose_player_exists: loose,
                    header: format!(
                        "[Advanced] Facing limpers (ROL) | Pos: {} | Raise={}BB{}",
                        position, raise_size, loose_msg
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> QuestionGenerator {
        QuestionGenerator::new(vec!["BB VS SB".to_string(), "SB VS BTN".to_string()])
    }

    #[test]
    fn test_beginner_pool_is_or() {
        let g = generator();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let q = g.generate(&mut rng, Difficulty::Beginner);
            assert_eq!(q.kind, Kind::Or);
            assert!(["EP", "MP", "CO", "BTN"].contains(&q.position.as_str()));
            if q.position == "BTN" {
                assert_eq!(q.open_size_bb, 2.5);
            } else {
                assert_eq!(q.open_size_bb, 3.0);
            }
        }
    }

    #[test]
    fn test_or_sb_fixed_shape() {
        let g = generator();
        let mut rng = StdRng::seed_from_u64(2);
        let q = g.generate_for_kind(&mut rng, Kind::OrSb);
        assert_eq!(q.position, "SB");
        assert!(!q.loose_player_exists);
        assert_eq!(q.open_size_bb, 3.0);
    }

    #[test]
    fn test_3bet_positions_come_from_data() {
        let g = generator();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let q = g.generate_for_kind(&mut rng, Kind::ThreeBet);
            assert!(["BB VS SB", "SB VS BTN"].contains(&q.position.as_str()));
        }
    }

    #[test]
    fn test_rol_sizes() {
        let g = generator();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let q = g.generate_for_kind(&mut rng, Kind::Rol);
            if q.position == "BBVSSB" {
                assert_eq!(q.open_size_bb, 4.0);
            } else {
                assert_eq!(q.open_size_bb, 5.0);
            }
        }
    }

    #[test]
    fn test_hand_key_matches_cards() {
        let g = generator();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let q = g.generate(&mut rng, Difficulty::Intermediate);
            assert_eq!(
                q.hand_key,
                cards_to_hand_key(q.hole_cards.card1, q.hole_cards.card2)
            );
        }
    }

    #[test]
    fn test_generator_is_debug_and_clone() {
        let g = generator();
        let copy = g.clone();
        assert!(format!("{:?}", copy).contains("QuestionGenerator"));
    }

    #[test]
    fn test_allowed_actions_per_kind() {
        assert!(Kind::Rol.allowed_actions().contains(&"CHECK"));
        assert!(!Kind::ThreeBet.allowed_actions().contains(&"LIMP_CALL"));
        assert!(Kind::OrSb.allowed_actions().contains(&"LIMP_CALL"));
    }
}
