//! Card representation for the trainer.
//!
//! This module provides the concrete-card types sitting underneath the
//! 169-class hand abstraction:
//! - `Card`: a single playing card with rank and suit
//! - `HoleCards`: a player's two private cards, higher rank first
//! - `Deck`: a 52-card deck with random dealing for question generation

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// Rank characters for display, weakest first.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Parse a card from a 2-character code like "As", "Kh", "2c".
    pub fn from_str(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 2 {
            return None;
        }

        let rank = RANK_CHARS.iter().position(|&c| c == chars[0].to_ascii_uppercase())?;
        let suit = SUIT_CHARS.iter().position(|&c| c == chars[1].to_ascii_lowercase())?;

        Some(Self::new(rank as u8, suit as u8))
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards {
    /// First card (higher rank by convention).
    pub card1: Card,
    /// Second card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards, ordering by rank (higher first).
    pub fn new(card1: Card, card2: Card) -> Self {
        if card1.rank() >= card2.rank() {
            Self { card1, card2 }
        } else {
            Self {
                card1: card2,
                card2: card1,
            }
        }
    }

    /// Parse hole cards from a string like "AhKs" or "Ah Ks".
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.replace(' ', "");
        // Byte slicing below requires ASCII; card codes always are
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let c1 = Card::from_str(&s[0..2])?;
        let c2 = Card::from_str(&s[2..4])?;
        Some(Self::new(c1, c2))
    }

    /// Check if the two cards share a suit.
    #[inline]
    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    /// Check if the two cards share a rank.
    #[inline]
    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A deck of 52 cards.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a fresh ordered deck.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for id in 0..52 {
            cards.push(Card { id });
        }
        Self { cards }
    }

    /// Deal two distinct random cards without mutating the deck.
    pub fn deal_two<R: Rng>(&self, rng: &mut R) -> HoleCards {
        let picks: Vec<&Card> = self.cards.choose_multiple(rng, 2).collect();
        HoleCards::new(*picks[0], *picks[1])
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_card_parsing() {
        assert_eq!(Card::from_str("As").unwrap().to_string(), "As");
        assert_eq!(Card::from_str("Kh").unwrap().to_string(), "Kh");
        assert_eq!(Card::from_str("td").unwrap().to_string(), "Td");
        assert_eq!(Card::from_str("2C").unwrap().to_string(), "2c");
        assert!(Card::from_str("XX").is_none());
        assert!(Card::from_str("A").is_none());
    }

    #[test]
    fn test_hole_cards_ordering() {
        let hc = HoleCards::from_str("KsAh").unwrap();
        assert_eq!(hc.card1.rank(), RANK_A);
        assert_eq!(hc.card2.rank(), RANK_K);
        assert!(!hc.is_suited());
        assert!(!hc.is_pair());

        let suited = HoleCards::from_str("AsKs").unwrap();
        assert!(suited.is_suited());

        let pair = HoleCards::from_str("7h7d").unwrap();
        assert!(pair.is_pair());
    }

    #[test]
    fn test_hole_cards_rejects_non_ascii() {
        // 4 bytes but not 4 ASCII chars: must be None, never a panic
        assert!(HoleCards::from_str("①a").is_none());
        assert!(HoleCards::from_str("AhK").is_none());
    }

    #[test]
    fn test_deal_two_distinct() {
        let deck = Deck::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let hc = deck.deal_two(&mut rng);
            assert!(hc.card1 != hc.card2);
        }
    }
}
