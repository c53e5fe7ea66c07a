//! Range-lookup engine.
//!
//! Everything needed to answer "given a strategy kind, a position, and two
//! hole cards, what is the single authoritative ruling?":
//!
//! - [`cards`]: concrete 52-card model (parsing, dealing)
//! - [`grid`]: 169-class hand keys and the 13x13 grid algebra
//! - [`table`]: the immutable range repository loaded from `final_tags.json`
//! - [`resolver`]: tag families -> expected action, per situational context
//! - [`judge`]: per-kind verdict API over table + resolver
//!
//! # Usage
//!
//! ```ignore
//! use range_trainer::range::{Judge, RangeTable};
//!
//! let table = RangeTable::load("final_tags.json")?;
//! let judge = Judge::new(&table);
//! let verdict = judge.judge_or("BTN", "AKS", "RAISE", false);
//! println!("{} ({})", verdict.reason, verdict.correct);
//! ```

pub mod cards;
pub mod grid;
pub mod judge;
pub mod resolver;
pub mod table;

pub use cards::{Card, Deck, HoleCards};
pub use grid::{cards_to_hand_key, hand_key_to_rc, rc_to_hand_key, HandKeyError};
pub use judge::{Judge, Verdict, VerdictDebug};
pub use resolver::{resolve_expected_action, Action, ExpectedAction, ProblemContext};
pub use table::{GridCell, GridView, LookupTrace, RangeTable, TableError};
