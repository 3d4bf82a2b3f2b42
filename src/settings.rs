use serde::{Deserialize, Serialize};

use crate::{error::Result, strategy::StrategyKind};

fn default_auto_restart() -> bool {
    true
}

fn default_num_decks() -> u8 {
    6
}

/// A shoe holds at least one deck.
fn clamp_decks(num_decks: u8) -> u8 {
    num_decks.max(1)
}

fn default_penetration() -> u8 {
    75
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "default_auto_restart")]
    pub auto_restart: bool,
    #[serde(default = "default_num_decks")]
    pub num_decks: u8,
    #[serde(default = "default_penetration")]
    pub penetration: u8,
    /// Shoe seed; a random one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            is_running: false,
            strategy: StrategyKind::default(),
            auto_restart: default_auto_restart(),
            num_decks: default_num_decks(),
            penetration: default_penetration(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        Ok(settings.normalized())
    }

    pub fn normalized(mut self) -> Self {
        self.num_decks = clamp_decks(self.num_decks);
        self
    }

    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(is_running) = patch.is_running {
            self.is_running = is_running;
        }
        if let Some(strategy) = patch.strategy {
            self.strategy = strategy;
        }
        if let Some(auto_restart) = patch.auto_restart {
            self.auto_restart = auto_restart;
        }
        if let Some(num_decks) = patch.num_decks {
            self.num_decks = clamp_decks(num_decks);
        }
        if let Some(penetration) = patch.penetration {
            self.penetration = penetration;
        }
        if let Some(seed) = patch.seed {
            self.seed = Some(seed);
        }
    }
}

/// Partial settings update; absent fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub is_running: Option<bool>,
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    #[serde(default)]
    pub auto_restart: Option<bool>,
    #[serde(default)]
    pub num_decks: Option<u8>,
    #[serde(default)]
    pub penetration: Option<u8>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SettingsPatch {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
