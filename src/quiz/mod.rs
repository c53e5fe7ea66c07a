//! Quiz session layer.
//!
//! Drives questions over the range engine:
//!
//! - [`generator`]: deals random (kind, position, hand, flags) spots
//! - [`followup`]: decides when a second sizing question is due
//! - [`engine`]: the per-session two-stage submit state machine
//! - [`stats`]: in-memory accuracy summaries
//!
//! Each session owns one [`engine::QuestionEngine`]; the loaded
//! [`crate::range::RangeTable`] is shared by reference across sessions.

pub mod engine;
pub mod followup;
pub mod generator;
pub mod stats;

pub use engine::{EngineError, EngineState, QuestionEngine, SubmitOutcome};
pub use followup::{FollowupContext, FOLLOWUP_CHOICES, FOLLOWUP_PROMPT};
pub use generator::{Difficulty, Kind, Question, QuestionGenerator};
pub use stats::{AttemptRecord, SessionStats, Summary};
