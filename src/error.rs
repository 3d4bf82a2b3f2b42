use thiserror::Error;

use crate::game::RoundStatus;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid rank: {0:?}")]
    InvalidRank(String),
    #[error("invalid round transition: {from} -> {to}")]
    InvalidTransition { from: RoundStatus, to: RoundStatus },
    #[error("draw pile exhausted after {drawn} cards")]
    DrawPileExhausted { drawn: usize },
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
