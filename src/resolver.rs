use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    card::Card,
    error::{ResolveError, Result},
    hand::Hand,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Push,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Push => "push",
        })
    }
}

/// Dealer hits below 17 and on soft 17.
pub fn dealer_must_hit(hand: &Hand) -> bool {
    let value = hand.value();
    value < 17 || (value == 17 && hand.has_soft_ace())
}

/// Turns over the hole card and draws until the dealer stands or busts.
pub fn resolve_dealer_play<F>(mut hand: Hand, mut draw_card: F) -> Hand
where
    F: FnMut() -> Card,
{
    hand.reveal_all();
    while dealer_must_hit(&hand) {
        let mut card = draw_card();
        card.reveal();
        hand.push(card);
    }
    hand
}

pub fn classify_outcome(player_value: u32, dealer_value: u32) -> Outcome {
    if player_value > 21 {
        Outcome::Lose
    } else if dealer_value > 21 || player_value > dealer_value {
        Outcome::Win
    } else if player_value == dealer_value {
        Outcome::Push
    } else {
        Outcome::Lose
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub dealer_hand: Hand,
    pub player_value: u32,
    pub dealer_value: u32,
    pub outcome: Outcome,
}

/// The `dealer_turn -> completed` step: plays the dealer out against a
/// frozen player hand and classifies the result.
pub fn resolve_round<F>(player: &Hand, dealer: Hand, draw_card: F) -> Resolution
where
    F: FnMut() -> Card,
{
    let dealer_hand = resolve_dealer_play(dealer, draw_card);
    settle(player, dealer_hand)
}

/// Same as [`resolve_round`] with the dealer drawing from a fixed, ordered
/// pile. Running out of cards before the dealer stands is an error.
pub fn resolve_round_from_pile(player: &Hand, dealer: Hand, pile: Vec<Card>) -> Result<Resolution> {
    let mut dealer_hand = dealer;
    dealer_hand.reveal_all();

    let mut pile = pile.into_iter();
    let mut drawn = 0;
    while dealer_must_hit(&dealer_hand) {
        let mut card = pile
            .next()
            .ok_or(ResolveError::DrawPileExhausted { drawn })?;
        card.reveal();
        dealer_hand.push(card);
        drawn += 1;
    }

    Ok(settle(player, dealer_hand))
}

fn settle(player: &Hand, dealer_hand: Hand) -> Resolution {
    let player_value = player.value();
    let dealer_value = dealer_hand.value();
    let outcome = classify_outcome(player_value, dealer_value);

    log::debug!(
        "round resolved: player {} dealer {} ({} cards) -> {}",
        player_value,
        dealer_value,
        dealer_hand.len(),
        outcome
    );

    Resolution {
        dealer_hand,
        player_value,
        dealer_value,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::hand::tests::hand;

    fn draws(tokens: &'static [&'static str]) -> impl FnMut() -> Card {
        let mut iter = tokens.iter();
        move || {
            let token = iter.next().expect("draw sequence exhausted");
            Card::new(token.parse().unwrap(), Suit::Diamonds)
        }
    }

    #[test]
    fn outcome_table() {
        assert_eq!(classify_outcome(22, 18), Outcome::Lose);
        assert_eq!(classify_outcome(20, 23), Outcome::Win);
        assert_eq!(classify_outcome(19, 19), Outcome::Push);
        assert_eq!(classify_outcome(18, 20), Outcome::Lose);
        assert_eq!(classify_outcome(21, 21), Outcome::Push);
    }

    #[test]
    fn player_bust_loses_even_when_dealer_busts() {
        assert_eq!(classify_outcome(23, 25), Outcome::Lose);
    }

    #[test]
    fn dealer_draws_from_sixteen_to_twenty_one() {
        let result = resolve_dealer_play(hand(&["10", "6"]), draws(&["5"]));
        assert_eq!(result.value(), 21);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn dealer_hits_soft_seventeen() {
        let result = resolve_dealer_play(hand(&["A", "6"]), draws(&["2"]));
        assert_eq!(result.value(), 19);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn dealer_stands_on_hard_seventeen() {
        let result = resolve_dealer_play(hand(&["10", "7"]), draws(&[]));
        assert_eq!(result.value(), 17);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn dealer_keeps_drawing_after_soft_hand_hardens() {
        // A,6 -> +9 is hard 16 -> +4 is hard 20
        let result = resolve_dealer_play(hand(&["A", "6"]), draws(&["9", "4"]));
        assert_eq!(result.value(), 20);
        assert!(!result.has_soft_ace());
    }

    #[test]
    fn dealer_play_reveals_hole_card_before_deciding() {
        let dealer = Hand::from(vec![
            Card::new(Rank::Ten, Suit::Hearts),
            Card::face_down(Rank::Eight, Suit::Clubs),
        ]);
        let result = resolve_dealer_play(dealer, draws(&[]));
        assert_eq!(result.value(), 18);
        assert_eq!(result.hidden_count(), 0);
    }

    #[test]
    fn drawn_cards_are_face_up() {
        let mut source = vec![Card::face_down(Rank::Five, Suit::Spades)].into_iter();
        let result = resolve_dealer_play(hand(&["10", "6"]), move || source.next().unwrap());
        assert_eq!(result.hidden_count(), 0);
        assert_eq!(result.value(), 21);
    }

    #[test]
    fn dealer_can_bust() {
        let result = resolve_dealer_play(hand(&["10", "6"]), draws(&["K"]));
        assert!(result.is_bust());
    }

    #[test]
    fn resolve_round_classifies_against_final_dealer_hand() {
        let player = hand(&["10", "9"]);
        let dealer = Hand::from(vec![
            Card::new(Rank::Ten, Suit::Hearts),
            Card::face_down(Rank::Six, Suit::Clubs),
        ]);
        let resolution = resolve_round(&player, dealer, draws(&["K"]));
        assert_eq!(resolution.player_value, 19);
        assert_eq!(resolution.dealer_value, 26);
        assert_eq!(resolution.outcome, Outcome::Win);
    }

    #[test]
    fn busted_player_loses_after_dealer_plays_out() {
        let player = hand(&["10", "9", "5"]);
        let resolution = resolve_round(&player, hand(&["10", "4"]), draws(&["9"]));
        assert_eq!(resolution.dealer_value, 23);
        assert_eq!(resolution.outcome, Outcome::Lose);
    }

    fn pile(tokens: &[&str]) -> Vec<Card> {
        tokens
            .iter()
            .map(|t| Card::face_down(t.parse().unwrap(), Suit::Diamonds))
            .collect()
    }

    #[test]
    fn pile_long_enough_resolves_like_a_draw_source() {
        let player = hand(&["10", "8"]);
        let dealer = Hand::from(vec![
            Card::new(Rank::Five, Suit::Hearts),
            Card::face_down(Rank::Six, Suit::Clubs),
        ]);
        let resolution =
            resolve_round_from_pile(&player, dealer.clone(), pile(&["2", "7", "K"])).unwrap();
        assert_eq!(resolution.dealer_value, 20);
        assert_eq!(resolution.dealer_hand.len(), 4);
        assert_eq!(resolution.dealer_hand.hidden_count(), 0);
        assert_eq!(resolution.outcome, Outcome::Lose);

        let expected = resolve_round(&player, dealer, draws(&["2", "7"]));
        assert_eq!(resolution, expected);
    }

    #[test]
    fn short_pile_is_exhausted() {
        let player = hand(&["10", "8"]);
        let dealer = hand(&["5", "6"]);
        match resolve_round_from_pile(&player, dealer, pile(&["2"])) {
            Err(ResolveError::DrawPileExhausted { drawn }) => assert_eq!(drawn, 1),
            other => panic!("expected exhausted pile, got {other:?}"),
        }
    }

    #[test]
    fn standing_dealer_needs_no_pile() {
        let resolution =
            resolve_round_from_pile(&hand(&["10", "9"]), hand(&["10", "7"]), Vec::new()).unwrap();
        assert_eq!(resolution.outcome, Outcome::Win);
    }
}
