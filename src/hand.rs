use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Optimal value of the visible cards and whether an ace is still counted
/// as 11. Hidden cards contribute nothing until revealed.
fn valuation(cards: &[Card]) -> (u32, bool) {
    let mut total = 0;
    let mut aces = 0;

    for card in cards.iter().filter(|card| !card.hidden) {
        total += card.value() as u32;
        if card.rank.is_ace() {
            aces += 1;
        }
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces > 0)
}

pub fn hand_value(cards: &[Card]) -> u32 {
    valuation(cards).0
}

/// True when a visible ace is being counted as 11.
pub fn has_soft_ace(cards: &[Card]) -> bool {
    valuation(cards).1
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u32 {
        hand_value(&self.cards)
    }

    pub fn has_soft_ace(&self) -> bool {
        has_soft_ace(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    pub fn is_blackjack(&self) -> bool {
        self.hidden_count() == 0 && self.cards.len() == 2 && self.value() == 21
    }

    pub fn hidden_count(&self) -> usize {
        self.cards.iter().filter(|card| card.hidden).count()
    }

    /// First face-up card, the dealer's up card during play.
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.iter().find(|card| !card.hidden)
    }

    pub fn reveal_all(&mut self) {
        self.cards.iter_mut().for_each(Card::reveal);
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand { cards }
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}
