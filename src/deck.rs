use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::card::{Card, Rank, Suit};

/// Multi-deck shoe dealing in shuffled order.
pub struct Deck {
    num_decks: u8,
    cards: Vec<Card>,
    dealt: usize,
    penetration_threshold: u8,
    rng: SmallRng,
}

impl Deck {
    pub fn new(num_decks: u8, penetration_threshold: u8, seed: u64) -> Self {
        let mut deck = Deck {
            num_decks: num_decks.max(1),
            cards: Vec::new(),
            dealt: 0,
            penetration_threshold,
            rng: SmallRng::seed_from_u64(seed),
        };
        deck.shuffle();
        deck
    }

    pub fn shuffle(&mut self) {
        self.cards.clear();
        self.dealt = 0;

        for _ in 0..self.num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    self.cards.push(Card::new(rank, suit));
                }
            }
        }

        self.cards.shuffle(&mut self.rng);
        log::debug!("shuffled {} cards", self.cards.len());
    }

    pub fn deal_card(&mut self) -> Card {
        if self.cards.is_empty() {
            self.shuffle();
        }
        let card = self.cards.pop().expect("deck should not be empty");
        self.dealt += 1;
        card
    }

    /// Deals a face-down hole card.
    pub fn deal_hidden(&mut self) -> Card {
        let mut card = self.deal_card();
        card.hidden = true;
        card
    }

    pub fn remaining_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn penetration(&self) -> f64 {
        let total_cards = self.num_decks as usize * 52;
        (self.dealt as f64 / total_cards as f64) * 100.0
    }

    pub fn should_reshuffle(&self) -> bool {
        self.penetration() >= self.penetration_threshold as f64
    }
}
