use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    game::{GameState, Session},
    settings::Settings,
    stats::Statistics,
};

fn default_rounds() -> u32 {
    1
}

fn default_progress_interval() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub statistics: Statistics,
    pub last_round: GameState,
}

pub fn run(input: SessionInput) -> Result<SessionReport> {
    run_with_progress(input, |_current, _total| {})
}

/// Plays `rounds` complete rounds in a fresh session, reporting progress
/// every `progress_interval` rounds and once at the end.
pub fn run_with_progress<F>(input: SessionInput, mut progress_cb: F) -> Result<SessionReport>
where
    F: FnMut(u32, u32),
{
    let mut session = Session::new(input.settings);
    let progress_interval = input.progress_interval.max(1);

    for round in 0..input.rounds {
        session.play_round()?;
        let played = round + 1;
        if played % progress_interval == 0 && played != input.rounds {
            progress_cb(played, input.rounds);
        }
    }
    progress_cb(input.rounds, input.rounds);

    log::info!(
        "played {} rounds: {} wins, {} losses, {} pushes",
        session.statistics().total_games,
        session.statistics().wins,
        session.statistics().losses,
        session.statistics().pushes
    );

    Ok(SessionReport {
        statistics: session.statistics().clone(),
        last_round: session.state().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rounds: u32, progress_interval: u32) -> SessionInput {
        SessionInput {
            settings: Settings {
                seed: Some(77),
                ..Settings::default()
            },
            rounds,
            progress_interval,
        }
    }

    #[test]
    fn plays_every_requested_round() {
        let report = run(input(50, 10)).unwrap();
        assert_eq!(report.statistics.total_games, 50);
        assert!(report.last_round.result.is_some());
    }

    #[test]
    fn reports_progress_at_intervals() {
        let mut calls = Vec::new();
        run_with_progress(input(25, 10), |current, total| calls.push((current, total))).unwrap();
        assert_eq!(calls, vec![(10, 25), (20, 25), (25, 25)]);
    }

    #[test]
    fn same_seed_same_report() {
        let a = run(input(30, 100)).unwrap();
        let b = run(input(30, 100)).unwrap();
        assert_eq!(a.statistics, b.statistics);
        assert_eq!(a.last_round, b.last_round);
    }

    #[test]
    fn input_defaults_to_one_round() {
        let input: SessionInput = serde_json::from_str(r#"{"settings":{"seed":1}}"#).unwrap();
        assert_eq!(input.rounds, 1);
        assert_eq!(run(input).unwrap().statistics.total_games, 1);
    }
}
