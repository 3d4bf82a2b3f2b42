use serde::Serialize;

use crate::resolver::Outcome;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub win_rate: f64,
}

impl Statistics {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
            Outcome::Push => self.pushes += 1,
        }
        self.total_games += 1;
        self.win_rate = self.wins as f64 / self.total_games as f64;
    }

    pub fn reset(&mut self) {
        *self = Statistics::default();
    }
}
