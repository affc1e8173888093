use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Bgm1,
    Bgm2,
    CardFlip,
    DrumRoll,
    Fanfare,
    Shuffle,
}

impl Channel {
    pub const BGM: [Channel; 2] = [Channel::Bgm1, Channel::Bgm2];

    pub fn is_bgm(self) -> bool {
        matches!(self, Channel::Bgm1 | Channel::Bgm2)
    }

    pub fn id(self) -> &'static str {
        match self {
            Channel::Bgm1 => "bgm1",
            Channel::Bgm2 => "bgm2",
            Channel::CardFlip => "card-flip",
            Channel::DrumRoll => "drum-roll",
            Channel::Fanfare => "fanfare",
            Channel::Shuffle => "shuffle",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().trim_end_matches("-audio");
        [
            Channel::Bgm1,
            Channel::Bgm2,
            Channel::CardFlip,
            Channel::DrumRoll,
            Channel::Fanfare,
            Channel::Shuffle,
        ]
        .into_iter()
        .find(|channel| channel.id() == id)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("playback denied by platform policy")]
    Denied,
    #[error("missing audio resource {0}")]
    Missing(String),
    #[error("playback failed: {0}")]
    Failed(String),
}

/// Playback seam. `play` rewinds the channel to its start before playing;
/// `stop` pauses and rewinds.
pub trait AudioBackend {
    fn play(&mut self, channel: Channel) -> Result<(), AudioError>;
    fn stop(&mut self, channel: Channel);
}

/// Backend with no output device. It still tracks which channels are playing
/// so wrapping backends and tests can inspect them.
#[derive(Debug, Default)]
pub struct SilentAudio {
    playing: BTreeSet<Channel>,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self, channel: Channel) -> bool {
        self.playing.contains(&channel)
    }
}

impl AudioBackend for SilentAudio {
    fn play(&mut self, channel: Channel) -> Result<(), AudioError> {
        self.playing.insert(channel);
        Ok(())
    }

    fn stop(&mut self, channel: Channel) {
        self.playing.remove(&channel);
    }
}

/// Denies every play request, as a browser does before the first user gesture.
#[derive(Debug, Default)]
pub struct MutedAudio;

impl AudioBackend for MutedAudio {
    fn play(&mut self, _channel: Channel) -> Result<(), AudioError> {
        Err(AudioError::Denied)
    }

    fn stop(&mut self, _channel: Channel) {}
}
