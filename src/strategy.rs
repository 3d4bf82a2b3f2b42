use serde::{Deserialize, Serialize};

use crate::{card::Card, hand::Hand};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

impl Action {
    /// Whether the action draws a card for the player.
    pub fn draws(&self) -> bool {
        matches!(self, Action::Hit | Action::Double)
    }

    /// Whether the player's turn is over once the action is applied.
    pub fn ends_turn(&self) -> bool {
        matches!(self, Action::Stand | Action::Double)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Basic,
    Aggressive,
    Conservative,
}

impl StrategyKind {
    /// Decision for a single unsplit hand. The dealer's up card is assumed
    /// to be a ten when unknown.
    pub fn decide(&self, player: &Hand, dealer_up: Option<&Card>) -> Action {
        let value = player.value();
        if value >= 21 {
            return Action::Stand;
        }

        let soft = player.has_soft_ace();
        let first_decision = player.len() == 2;
        let dealer = dealer_up.map(Card::value).unwrap_or(10);

        match self {
            StrategyKind::Basic => {
                if first_decision && !soft && value == 11 {
                    Action::Double
                } else {
                    hit_or_stand(player, dealer)
                }
            }
            StrategyKind::Aggressive => {
                let doubles = if soft {
                    (16..=18).contains(&value)
                } else {
                    (10..=11).contains(&value)
                };
                if first_decision && doubles {
                    Action::Double
                } else {
                    hit_or_stand(player, dealer)
                }
            }
            StrategyKind::Conservative => {
                if soft {
                    stand_at(value, 18)
                } else {
                    stand_at(value, 12)
                }
            }
        }
    }
}

/// Hard hands stand from 17, or from 13 against a dealer showing 2-6.
fn hit_or_stand(player: &Hand, dealer: u8) -> Action {
    let value = player.value();
    if player.has_soft_ace() {
        stand_at(value, 18)
    } else if value >= 17 || (value >= 13 && (2..=6).contains(&dealer)) {
        Action::Stand
    } else {
        Action::Hit
    }
}

fn stand_at(value: u32, threshold: u32) -> Action {
    if value >= threshold {
        Action::Stand
    } else {
        Action::Hit
    }
}
