use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    deck::Deck,
    error::{ResolveError, Result},
    hand::Hand,
    resolver::{self, Outcome},
    settings::{Settings, SettingsPatch},
    stats::Statistics,
    strategy::Action,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    Waiting,
    Playing,
    PlayerTurn,
    DealerTurn,
    Completed,
}

impl RoundStatus {
    pub fn can_transition(self, to: RoundStatus) -> bool {
        use RoundStatus::*;
        matches!(
            (self, to),
            (_, Waiting)
                | (Waiting, Playing)
                | (Completed, Playing)
                | (Playing, PlayerTurn)
                | (PlayerTurn, DealerTurn)
                | (DealerTurn, Completed)
        )
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoundStatus::Waiting => "waiting",
            RoundStatus::Playing => "playing",
            RoundStatus::PlayerTurn => "player_turn",
            RoundStatus::DealerTurn => "dealer_turn",
            RoundStatus::Completed => "completed",
        })
    }
}

/// Snapshot handed to the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub player_score: u32,
    pub dealer_score: u32,
    pub status: RoundStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<Action>,
}

impl GameState {
    fn refresh_scores(&mut self) {
        self.player_score = self.player_hand.value();
        self.dealer_score = self.dealer_hand.value();
    }
}

/// One AI seat: settings, running statistics, the shoe and the round in
/// progress. Each session owns its hands exclusively.
pub struct Session {
    settings: Settings,
    statistics: Statistics,
    deck: Deck,
    state: GameState,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.normalized();
        let deck = build_deck(&settings);
        Session {
            settings,
            statistics: Statistics::default(),
            deck,
            state: GameState::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.settings.is_running
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> &Settings {
        let rebuild = patch.num_decks.is_some() || patch.penetration.is_some() || patch.seed.is_some();
        self.settings.apply(patch);
        if rebuild {
            self.deck = build_deck(&self.settings);
        }
        &self.settings
    }

    pub fn reset_statistics(&mut self) -> &Statistics {
        self.statistics.reset();
        &self.statistics
    }

    /// Marks the session running and deals a round unless one is in play.
    pub fn start(&mut self, patch: SettingsPatch) -> Result<&GameState> {
        self.update_settings(patch);
        self.settings.is_running = true;
        log::info!("session started with {:?} strategy", self.settings.strategy);
        if matches!(self.state.status, RoundStatus::Waiting | RoundStatus::Completed) {
            self.deal()?;
        }
        Ok(&self.state)
    }

    /// Stops the session; any round in play is abandoned.
    pub fn stop(&mut self) -> Result<&GameState> {
        self.settings.is_running = false;
        self.transition(RoundStatus::Waiting)?;
        log::info!("session stopped after {} games", self.statistics.total_games);
        Ok(&self.state)
    }

    /// Deals two cards each, the dealer's second face down.
    pub fn deal(&mut self) -> Result<&GameState> {
        self.transition(RoundStatus::Playing)?;
        if self.deck.should_reshuffle() {
            self.deck.shuffle();
        }

        let mut player = Hand::new();
        let mut dealer = Hand::new();
        player.push(self.deck.deal_card());
        dealer.push(self.deck.deal_card());
        player.push(self.deck.deal_card());
        dealer.push(self.deck.deal_hidden());

        self.state.player_hand = player;
        self.state.dealer_hand = dealer;
        self.state.result = None;
        self.state.action_taken = None;
        self.state.refresh_scores();
        log::debug!(
            "dealt player {} against dealer showing {}",
            self.state.player_score,
            self.state.dealer_score
        );
        Ok(&self.state)
    }

    /// Advances a running session by one decision. A completed round is
    /// followed by a fresh deal when auto-restart is on.
    pub fn step(&mut self) -> Result<&GameState> {
        if !self.settings.is_running {
            return Ok(&self.state);
        }
        match self.state.status {
            RoundStatus::Waiting | RoundStatus::Completed => {
                self.deal()?;
            }
            _ => self.advance()?,
        }
        Ok(&self.state)
    }

    /// Deals and plays one full round regardless of the running flag.
    pub fn play_round(&mut self) -> Result<Outcome> {
        self.deal()?;
        loop {
            self.advance()?;
            if let Some(outcome) = self.state.result {
                return Ok(outcome);
            }
        }
    }

    fn advance(&mut self) -> Result<()> {
        match self.state.status {
            RoundStatus::Playing => {
                self.transition(RoundStatus::PlayerTurn)?;
                self.player_decision()
            }
            RoundStatus::PlayerTurn => self.player_decision(),
            RoundStatus::DealerTurn => self.finish_round(),
            // nothing to advance outside a round
            RoundStatus::Waiting | RoundStatus::Completed => Ok(()),
        }
    }

    fn player_decision(&mut self) -> Result<()> {
        let action = self
            .settings
            .strategy
            .decide(&self.state.player_hand, self.state.dealer_hand.up_card());
        self.state.action_taken = Some(action);

        if action.draws() {
            self.state.player_hand.push(self.deck.deal_card());
            self.state.refresh_scores();
        }
        if action.ends_turn() || self.state.player_score >= 21 {
            self.transition(RoundStatus::DealerTurn)?;
            return self.finish_round();
        }
        Ok(())
    }

    fn finish_round(&mut self) -> Result<()> {
        let deck = &mut self.deck;
        let dealer = std::mem::take(&mut self.state.dealer_hand);
        let resolution = resolver::resolve_round(&self.state.player_hand, dealer, || deck.deal_card());

        self.state.dealer_hand = resolution.dealer_hand;
        self.state.result = Some(resolution.outcome);
        self.state.refresh_scores();
        self.transition(RoundStatus::Completed)?;
        self.statistics.record(resolution.outcome);

        if !self.settings.auto_restart {
            self.settings.is_running = false;
        }
        Ok(())
    }

    fn transition(&mut self, to: RoundStatus) -> Result<()> {
        let from = self.state.status;
        if !from.can_transition(to) {
            return Err(ResolveError::InvalidTransition { from, to });
        }
        self.state.status = to;
        Ok(())
    }
}

fn build_deck(settings: &Settings) -> Deck {
    let seed = settings.seed.unwrap_or_else(rand::random);
    Deck::new(settings.num_decks, settings.penetration, seed)
}
