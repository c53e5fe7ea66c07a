//! In-memory session statistics.
//!
//! Collects one record per graded question and summarizes accuracy
//! overall, by kind, by position, and over the most recent attempts.
//! Persistence is a collaborator's concern; this log lives and dies with
//! the session.

use rustc_hash::FxHashMap;

use crate::range::judge::Verdict;

/// One graded attempt.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// Strategy kind key ("OR", "OR_SB", ...).
    pub kind: String,
    /// Position label.
    pub position: String,
    /// Canonical hand key.
    pub hand: String,
    /// The user's (normalized) action.
    pub user_action: String,
    /// The expected action.
    pub expected_action: String,
    /// Whether the attempt was correct.
    pub correct: bool,
}

impl AttemptRecord {
    /// Build a record from a verdict's debug payload.
    pub fn from_verdict(verdict: &Verdict) -> Self {
        Self {
            kind: verdict.debug.kind.clone(),
            position: verdict.debug.position.clone(),
            hand: verdict.debug.hand.clone(),
            user_action: verdict.debug.user_action.clone(),
            expected_action: verdict.debug.expected_action.clone(),
            correct: verdict.correct,
        }
    }
}

/// Accuracy for one grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct RateByKey {
    /// Grouping key (a kind or a position).
    pub key: String,
    /// Attempts in the group.
    pub attempts: usize,
    /// Correct attempts in the group.
    pub correct: usize,
    /// correct / attempts, 0.0 when empty.
    pub accuracy: f64,
}

/// Accuracy over the most recent attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentTrend {
    /// Window size requested.
    pub recent_n: usize,
    /// Attempts inside the window.
    pub attempts: usize,
    /// Correct attempts inside the window.
    pub correct: usize,
    /// Window accuracy.
    pub accuracy: f64,
}

/// Summary over a session's attempt log.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Total graded attempts.
    pub total_attempts: usize,
    /// Total correct attempts.
    pub total_correct: usize,
    /// Overall accuracy.
    pub total_accuracy: f64,
    /// Accuracy per kind, most-played first.
    pub by_kind: Vec<RateByKey>,
    /// Accuracy per position, most-played first.
    pub by_position: Vec<RateByKey>,
    /// Recent-window trend.
    pub recent: RecentTrend,
}

fn safe_accuracy(correct: usize, attempts: usize) -> f64 {
    if attempts > 0 {
        correct as f64 / attempts as f64
    } else {
        0.0
    }
}

fn rates_by<F>(records: &[AttemptRecord], key_of: F) -> Vec<RateByKey>
where
    F: Fn(&AttemptRecord) -> &str,
{
    let mut counts: FxHashMap<String, (usize, usize)> = FxHashMap::default();
    for r in records {
        let entry = counts.entry(key_of(r).to_string()).or_default();
        entry.0 += 1;
        if r.correct {
            entry.1 += 1;
        }
    }
    let mut rates: Vec<RateByKey> = counts
        .into_iter()
        .map(|(key, (attempts, correct))| RateByKey {
            key,
            attempts,
            correct,
            accuracy: safe_accuracy(correct, attempts),
        })
        .collect();
    rates.sort_by(|a, b| b.attempts.cmp(&a.attempts).then(a.key.cmp(&b.key)));
    rates
}

/// Session attempt log.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    records: Vec<AttemptRecord>,
}

impl SessionStats {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one graded attempt.
    pub fn record(&mut self, record: AttemptRecord) {
        self.records.push(record);
    }

    /// Number of recorded attempts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Summarize the log with a recent window of `recent_n` attempts.
    pub fn summary(&self, recent_n: usize) -> Summary {
        let recent_n = recent_n.max(1);
        let total_attempts = self.records.len();
        let total_correct = self.records.iter().filter(|r| r.correct).count();

        let window_start = total_attempts.saturating_sub(recent_n);
        let window = &self.records[window_start..];
        let recent_correct = window.iter().filter(|r| r.correct).count();

        Summary {
            total_attempts,
            total_correct,
            total_accuracy: safe_accuracy(total_correct, total_attempts),
            by_kind: rates_by(&self.records, |r| &r.kind),
            by_position: rates_by(&self.records, |r| &r.position),
            recent: RecentTrend {
                recent_n,
                attempts: window.len(),
                correct: recent_correct,
                accuracy: safe_accuracy(recent_correct, window.len()),
            },
        }
    }
}
