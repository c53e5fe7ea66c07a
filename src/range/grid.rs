//! Hand-grid algebra: 169 canonical hand keys and 13x13 coordinates.
//!
//! A canonical hand key names one of the 169 starting-hand classes: two
//! rank characters (high rank first) plus `S` for suited, `O` for offsuit,
//! and no suffix for a pair. The key maps bijectively onto a 13x13 grid:
//! pairs on the diagonal, suited hands in the upper triangle, offsuit
//! hands in the lower triangle.

use thiserror::Error;

use super::cards::{Card, HoleCards};

/// Rank characters in strength order; index 0 is the strongest (A).
pub const RANKS: &str = "AKQJT98765432";

/// Errors from hand-key parsing and coordinate conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandKeyError {
    /// The string is not a well-formed canonical hand key.
    #[error("invalid hand key: {0}")]
    InvalidHandKey(String),
    /// Row or column outside [0, 12].
    #[error("grid coordinate out of range: ({0}, {1})")]
    OutOfRange(usize, usize),
}

/// Strength index (0 = A .. 12 = 2) of a rank character.
fn rank_index(r: char) -> Option<usize> {
    RANKS.find(r.to_ascii_uppercase())
}

/// Convert a canonical hand key to 0-based (row, col) in the 13x13 grid.
///
/// - Pair `"AA"` lands on the diagonal.
/// - Suited `"AKS"` lands in the upper triangle (row < col).
/// - Offsuit `"AKO"` lands in the lower triangle (row > col).
pub fn hand_key_to_rc(hand_key: &str) -> Result<(usize, usize), HandKeyError> {
    let hk = hand_key.trim().to_ascii_uppercase();
    let chars: Vec<char> = hk.chars().collect();

    let bad = || HandKeyError::InvalidHandKey(hand_key.to_string());

    match chars.len() {
        2 => {
            if chars[0] != chars[1] {
                return Err(bad());
            }
            let i = rank_index(chars[0]).ok_or_else(bad)?;
            Ok((i, i))
        }
        3 => {
            let i1 = rank_index(chars[0]).ok_or_else(bad)?;
            let i2 = rank_index(chars[1]).ok_or_else(bad)?;
            if i1 == i2 {
                return Err(bad());
            }
            let hi = i1.min(i2);
            let lo = i1.max(i2);
            match chars[2] {
                'S' => Ok((hi, lo)),
                'O' => Ok((lo, hi)),
                _ => Err(bad()),
            }
        }
        _ => Err(bad()),
    }
}

/// Convert a 13x13 grid coordinate back to its canonical hand key.
pub fn rc_to_hand_key(row: usize, col: usize) -> Result<String, HandKeyError> {
    if row > 12 || col > 12 {
        return Err(HandKeyError::OutOfRange(row, col));
    }

    let ranks: Vec<char> = RANKS.chars().collect();
    if row == col {
        return Ok(format!("{}{}", ranks[row], ranks[row]));
    }

    let hi = row.min(col);
    let lo = row.max(col);
    let suffix = if row < col { 'S' } else { 'O' };
    Ok(format!("{}{}{}", ranks[hi], ranks[lo], suffix))
}

/// Display label for a grid cell: the hand key without the S/O suffix.
pub fn cell_label(row: usize, col: usize) -> Result<String, HandKeyError> {
    let mut key = rc_to_hand_key(row, col)?;
    key.truncate(2);
    Ok(key)
}

/// Canonicalize two concrete cards into a hand key.
///
/// Total over all distinct card pairs: the stronger rank always comes
/// first and only suited-vs-offsuit survives, never suit identity.
pub fn cards_to_hand_key(card1: Card, card2: Card) -> String {
    let hc = HoleCards::new(card1, card2);
    let r1 = hc.card1.rank_char();
    let r2 = hc.card2.rank_char();

    if hc.is_pair() {
        format!("{}{}", r1, r2)
    } else if hc.is_suited() {
        format!("{}{}S", r1, r2)
    } else {
        format!("{}{}O", r1, r2)
    }
}

/// Iterate all 169 canonical hand keys in grid order (row-major).
pub fn all_hand_keys() -> impl Iterator<Item = String> {
    (0..13).flat_map(|row| {
        (0..13).map(move |col| {
            // rows/cols are in-range by construction
            rc_to_hand_key(row, col).unwrap_or_default()
        })
    })
}
