use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Blackjack value with the ace counted high. Hand valuation
    /// downgrades aces to 1 as needed.
    pub fn value(self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn is_ace(self) -> bool {
        self == Rank::Ace
    }

    pub fn token(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl FromStr for Rank {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        Rank::ALL
            .iter()
            .copied()
            .find(|rank| rank.token() == s)
            .ok_or_else(|| ResolveError::InvalidRank(s.to_string()))
    }
}

impl TryFrom<String> for Rank {
    type Error = ResolveError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> String {
        rank.token().to_string()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

/// Value of a rank token as it arrives from upstream (`"A"`, `"2"`..`"10"`,
/// `"J"`, `"Q"`, `"K"`).
pub fn card_value(rank: &str) -> Result<u8> {
    rank.parse::<Rank>().map(Rank::value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    #[serde(default)]
    pub hidden: bool,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            hidden: false,
        }
    }

    pub fn face_down(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            hidden: true,
        }
    }

    pub fn reveal(&mut self) {
        self.hidden = false;
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_values_follow_rank_tokens() {
        assert_eq!(card_value("A").unwrap(), 11);
        assert_eq!(card_value("2").unwrap(), 2);
        assert_eq!(card_value("9").unwrap(), 9);
        assert_eq!(card_value("10").unwrap(), 10);
        for face in ["J", "Q", "K"] {
            assert_eq!(card_value(face).unwrap(), 10);
        }
    }

    #[test]
    fn unknown_tokens_are_invalid_ranks() {
        for token in ["", "1", "11", "T", "a", "k", "Joker"] {
            match card_value(token) {
                Err(ResolveError::InvalidRank(t)) => assert_eq!(t, token),
                other => panic!("expected InvalidRank for {token:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn tokens_parse_back_to_their_rank() {
        for rank in Rank::ALL {
            assert_eq!(rank.token().parse::<Rank>().unwrap(), rank);
        }
    }

    #[test]
    fn card_wire_format() {
        let card = Card::face_down(Rank::Ten, Suit::Clubs);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"rank":"10","suit":"clubs","hidden":true}"#);

        let parsed: Card = serde_json::from_str(r#"{"rank":"Q","suit":"hearts"}"#).unwrap();
        assert_eq!(parsed, Card::new(Rank::Queen, Suit::Hearts));

        let bad = serde_json::from_str::<Card>(r#"{"rank":"1","suit":"hearts"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn reveal_only_clears_hidden() {
        let mut card = Card::face_down(Rank::Ace, Suit::Spades);
        card.reveal();
        assert_eq!(card, Card::new(Rank::Ace, Suit::Spades));
    }
}
