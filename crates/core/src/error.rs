use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no card at position {0}")]
    UnknownCard(usize),
    #[error("invalid face value {0}")]
    InvalidFace(u8),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("{0:?} is not a background music channel")]
    NotBgm(crate::Channel),
    #[error("{0:?} is a background music channel")]
    NotSoundEffect(crate::Channel),
}
