//! Range table repository.
//!
//! Loads the pre-built range-data document (`final_tags.json`) and answers
//! two questions at quiz time:
//! - which tag does a (kind, position, hand) triple carry, and
//! - what does the full 13x13 grid look like for the explanatory popup.
//!
//! The table is immutable after load; lookups never mutate and the whole
//! struct can be shared by reference across quiz sessions.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use log::warn;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use super::cards::{Card, HoleCards};
use super::grid::{cards_to_hand_key, cell_label, rc_to_hand_key, HandKeyError};

/// Sentinel tag for "no distinguishing entry": treated as a fold by rule.
pub const DEFAULT_TAG: &str = "FOLD";

/// Background color used for cells whose tag has no legend color.
pub const DEFAULT_CELL_COLOR: &str = "FFFFFF";

/// Errors from loading or rendering range data.
///
/// Lookup misses are deliberately not represented here: a missing kind,
/// position, or hand key degrades to [`DEFAULT_TAG`], because sparse range
/// data is an expected condition, not a failure.
#[derive(Debug, Error)]
pub enum TableError {
    /// Range-data document could not be read.
    #[error("failed to read range data: {0}")]
    Io(#[from] std::io::Error),
    /// Range-data document is not valid JSON.
    #[error("failed to parse range data: {0}")]
    Json(#[from] serde_json::Error),
    /// Document has no `ranges` section.
    #[error("range data has no 'ranges' section")]
    MissingRanges,
    /// Grid-view rendering was requested for a kind without legend data.
    #[error("no legend data for kind {kind}")]
    MissingLegend {
        /// The kind whose legend is absent.
        kind: String,
    },
    /// A grid coordinate or hand key was malformed.
    #[error(transparent)]
    HandKey(#[from] HandKeyError),
}

/// On-disk document schema.
#[derive(Debug, Deserialize)]
struct RangeDocument {
    ranges: Option<HashMap<String, HashMap<String, HashMap<String, String>>>>,
    #[serde(default)]
    legend_by_kind: HashMap<String, HashMap<String, Option<String>>>,
    #[serde(default)]
    positions_by_kind: HashMap<String, Vec<String>>,
}

/// Debug trace attached to every tag lookup, so callers can distinguish
/// "not in range data" from "tag is FOLD by rule".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTrace {
    /// Normalized kind used for the lookup.
    pub kind: String,
    /// Sanitized position used for the lookup.
    pub position: String,
    /// Hand input as given by the caller.
    pub hand_in: String,
    /// Normalized hand key used for the lookup.
    pub hand_key: String,
    /// Whether the kind exists in the range data.
    pub found_kind: bool,
    /// Whether the position exists under that kind.
    pub found_position: bool,
}

/// One cell of a materialized range grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Display label, e.g. "AK" or "AA" (no suited/offsuit suffix).
    pub label: String,
    /// 6-hex-digit RGB background color.
    pub color: String,
}

/// A fully materialized 13x13 display grid for one (kind, position).
#[derive(Debug, Clone)]
pub struct GridView {
    /// Kind the grid belongs to.
    pub kind: String,
    /// Sanitized position the grid belongs to.
    pub position: String,
    /// Row-major 13x13 cells.
    pub cells: Vec<Vec<GridCell>>,
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} / {}", self.kind, self.position)?;
        for row in &self.cells {
            for cell in row {
                write!(f, "{:>4}", cell.label)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Immutable repository of range tags and legend colors per kind.
#[derive(Debug)]
pub struct RangeTable {
    /// kind -> position -> hand key -> tag (all keys normalized)
    ranges: FxHashMap<String, FxHashMap<String, FxHashMap<String, String>>>,
    /// kind -> tag -> 6-hex RGB (None means "no highlight")
    legend: FxHashMap<String, FxHashMap<String, Option<String>>>,
    /// kind -> declared position order, for generators and menus
    declared_positions: FxHashMap<String, Vec<String>>,
}

/// Canonicalize a position label: uppercase, separators (`_`, `-`) and
/// runs of whitespace removed, so "BB vs SB", "bb_vs_sb" and "BB-VS-SB"
/// all alias to "BBVSSB".
pub fn sanitize_position(position: &str) -> String {
    position
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Normalize a kind label.
fn sanitize_kind(kind: &str) -> String {
    kind.trim().to_ascii_uppercase()
}

/// Normalize a hand key string for lookup.
fn sanitize_hand_key(hand: &str) -> String {
    hand.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Normalize a legend color: strip a leading `#`, collapse 8-digit ARGB
/// to the trailing 6 RGB digits, uppercase. Malformed values are dropped
/// with a warning rather than failing the load.
fn normalize_color(raw: &str) -> Option<String> {
    let s = raw.trim().trim_start_matches('#').to_ascii_uppercase();
    let s = if s.len() == 8 { s[2..].to_string() } else { s };
    if s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(s)
    } else {
        warn!("dropping malformed legend color {:?}", raw);
        None
    }
}

impl RangeTable {
    /// Load the range-data document from a file.
    ///
    /// This is a startup precondition: a missing or malformed document is
    /// a fatal error, never a degraded mode.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build the table from a JSON document string.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let doc: RangeDocument = serde_json::from_str(json)?;
        let raw_ranges = doc.ranges.ok_or(TableError::MissingRanges)?;

        let mut ranges: FxHashMap<String, FxHashMap<String, FxHashMap<String, String>>> =
            FxHashMap::default();
        for (kind, pos_map) in raw_ranges {
            let k = sanitize_kind(&kind);
            let entry = ranges.entry(k).or_default();
            for (position, hand_map) in pos_map {
                let p = sanitize_position(&position);
                let hands = entry.entry(p).or_default();
                for (hand, tag) in hand_map {
                    hands.insert(sanitize_hand_key(&hand), tag.trim().to_string());
                }
            }
        }

        let mut legend: FxHashMap<String, FxHashMap<String, Option<String>>> =
            FxHashMap::default();
        for (kind, tag_map) in doc.legend_by_kind {
            let k = sanitize_kind(&kind);
            let entry = legend.entry(k).or_default();
            for (tag, color) in tag_map {
                let c = color.as_deref().and_then(normalize_color);
                entry.insert(tag.trim().to_string(), c);
            }
        }

        let mut declared_positions: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for (kind, positions) in doc.positions_by_kind {
            let list = positions
                .iter()
                .map(|p| p.trim().to_ascii_uppercase())
                .filter(|p| !p.is_empty())
                .collect();
            declared_positions.insert(sanitize_kind(&kind), list);
        }

        let table = Self {
            ranges,
            legend,
            declared_positions,
        };
        table.check_legend_integrity();
        Ok(table)
    }

    /// Warn about tags used in `ranges` that have no legend entry. Broken
    /// builds still run; the affected cells render with the default color.
    fn check_legend_integrity(&self) {
        for (kind, pos_map) in &self.ranges {
            let Some(legend) = self.legend.get(kind) else {
                continue;
            };
            for (position, hand_map) in pos_map {
                for tag in hand_map.values() {
                    if !tag.is_empty() && tag != DEFAULT_TAG && !legend.contains_key(tag) {
                        warn!(
                            "tag {:?} in ranges[{}][{}] has no legend entry",
                            tag, kind, position
                        );
                    }
                }
            }
        }
    }

    /// Look up the authoritative tag for a hand.
    ///
    /// `hand` may be a canonical hand key ("AKS") or four card characters
    /// ("AhKs"); the latter is canonicalized first. Missing kind, position
    /// or hand all degrade to [`DEFAULT_TAG`].
    pub fn get_tag_for_hand(
        &self,
        kind: &str,
        position: &str,
        hand: &str,
    ) -> (String, LookupTrace) {
        let hand_key = match HoleCards::from_str(hand) {
            Some(hc) => cards_to_hand_key(hc.card1, hc.card2),
            None => sanitize_hand_key(hand),
        };
        self.lookup(kind, position, hand, hand_key)
    }

    /// Look up the authoritative tag for two concrete cards.
    pub fn get_tag_for_cards(
        &self,
        kind: &str,
        position: &str,
        card1: Card,
        card2: Card,
    ) -> (String, LookupTrace) {
        let hand_in = format!("{}{}", card1, card2);
        let hand_key = cards_to_hand_key(card1, card2);
        self.lookup(kind, position, &hand_in, hand_key)
    }

    fn lookup(
        &self,
        kind: &str,
        position: &str,
        hand_in: &str,
        hand_key: String,
    ) -> (String, LookupTrace) {
        let k = sanitize_kind(kind);
        let p = sanitize_position(position);

        let mut trace = LookupTrace {
            kind: k.clone(),
            position: p.clone(),
            hand_in: hand_in.to_string(),
            hand_key: hand_key.clone(),
            found_kind: false,
            found_position: false,
        };

        let Some(pos_map) = self.ranges.get(&k) else {
            return (DEFAULT_TAG.to_string(), trace);
        };
        trace.found_kind = true;

        let Some(hand_map) = pos_map.get(&p) else {
            return (DEFAULT_TAG.to_string(), trace);
        };
        trace.found_position = true;

        let tag = hand_map
            .get(&hand_key)
            .filter(|t| !t.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_TAG.to_string());
        (tag, trace)
    }

    /// All positions declared for a kind.
    ///
    /// Uses the document's `positions_by_kind` order when present, else
    /// the sorted position keys of the range section.
    pub fn list_positions(&self, kind: &str) -> Vec<String> {
        let k = sanitize_kind(kind);
        if let Some(declared) = self.declared_positions.get(&k) {
            if !declared.is_empty() {
                return declared.clone();
            }
        }
        let mut positions: Vec<String> = self
            .ranges
            .get(&k)
            .map(|pos_map| pos_map.keys().cloned().collect())
            .unwrap_or_default();
        positions.sort();
        positions
    }

    /// All kinds present in the range data, sorted.
    pub fn list_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.ranges.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Legend color for a tag under a kind, if any.
    pub fn legend_color(&self, kind: &str, tag: &str) -> Option<String> {
        self.legend
            .get(&sanitize_kind(kind))?
            .get(tag.trim())
            .cloned()
            .flatten()
    }

    /// Materialize the full 13x13 display grid for one (kind, position).
    ///
    /// Errors when the kind has no legend at all: the popup cannot render
    /// correctly without one, and blank colors would hide a data-build
    /// defect. An unknown position is fine and yields an all-fold grid.
    pub fn get_range_grid_view(&self, kind: &str, position: &str) -> Result<GridView, TableError> {
        let k = sanitize_kind(kind);
        let legend = self.legend.get(&k).ok_or_else(|| TableError::MissingLegend {
            kind: k.clone(),
        })?;
        let p = sanitize_position(position);

        let hand_map = self.ranges.get(&k).and_then(|pos_map| pos_map.get(&p));

        let mut cells = Vec::with_capacity(13);
        for row in 0..13 {
            let mut cells_row = Vec::with_capacity(13);
            for col in 0..13 {
                let hand_key = rc_to_hand_key(row, col)?;
                let tag = hand_map.and_then(|m| m.get(&hand_key));
                let color = tag
                    .and_then(|t| legend.get(t.as_str()))
                    .cloned()
                    .flatten()
                    .unwrap_or_else(|| DEFAULT_CELL_COLOR.to_string());
                cells_row.push(GridCell {
                    label: cell_label(row, col)?,
                    color,
                });
            }
            cells.push(cells_row);
        }

        Ok(GridView {
            kind: k,
            position: p,
            cells,
        })
    }
}
