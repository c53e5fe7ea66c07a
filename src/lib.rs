//! # Range Trainer
//!
//! A preflop decision trainer core: deal a random hand+position spot,
//! compare the user's action against a reference strategy table, and
//! report correct/incorrect with an explanatory 13x13 range grid.
//!
//! This is not a solver — it computes no equities. It is a deterministic
//! table lookup plus a small rule engine translating table entries into
//! instructional verdicts.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use range_trainer::quiz::{Difficulty, QuestionEngine, QuestionGenerator};
//! use range_trainer::range::RangeTable;
//!
//! // 1. Load the pre-built range data (startup precondition)
//! let table = RangeTable::load("final_tags.json")?;
//!
//! // 2. One engine per quiz session
//! let generator = QuestionGenerator::from_table(&table);
//! let mut engine = QuestionEngine::new(&table, generator, StdRng::from_entropy());
//!
//! // 3. Ask and grade
//! let question = engine.start(Difficulty::Intermediate);
//! println!("{}", question.header);
//! let outcome = engine.submit("LIMP_CALL");
//! println!("{}", outcome.text);
//! ```
//!
//! ## Modules
//!
//! - [`range`]: hand-grid algebra, range table, resolver, judge
//! - [`quiz`]: question generation and the two-stage submit state machine
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                 QuestionEngine (per session)          │
//! │  - question lifecycle     - two-stage submit protocol │
//! └───────────────────────────────────────────────────────┘
//!           │                                │
//!           ▼                                ▼
//!    ┌─────────────┐                  ┌─────────────┐
//!    │   Judge     │ ───lookup──────▶ │ RangeTable  │
//!    │ (verdicts)  │ ◀──tag+trace──── │ (immutable) │
//!    └─────────────┘                  └─────────────┘
//!           │
//!           ▼
//!    ┌───────────────────────┐
//!    │ ExpectedActionResolver │  tag families -> action
//!    └───────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod quiz;
pub mod range;

// Re-export commonly used types at crate root for convenience
pub use quiz::{Difficulty, QuestionEngine, QuestionGenerator, SessionStats};
pub use range::{Action, ExpectedAction, Judge, RangeTable, Verdict};
