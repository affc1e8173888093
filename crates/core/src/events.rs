use crate::{Channel, Effect, Face, ParticleColor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    ShuffleStarted {
        generation: u64,
    },
    CardDealt {
        position: usize,
        face: Face,
    },
    ShuffleSettled {
        position: usize,
    },
    SelectionUnlocked,
    SelectionIgnored {
        position: usize,
    },
    CardSelected {
        position: usize,
        face: Face,
        effect: Effect,
    },
    DrumRoll {
        position: usize,
    },
    EffectEnded {
        position: usize,
    },
    CardFlipped {
        position: usize,
    },
    ResultRevealed {
        position: usize,
        face: Face,
    },
    ParticleSpawned {
        id: u64,
        color: ParticleColor,
    },
    ParticleExpired {
        id: u64,
    },
    BgmStarted {
        channel: Channel,
    },
    BgmStopped {
        channel: Channel,
    },
    SoundPlayed {
        channel: Channel,
    },
    AudioFailed {
        channel: Channel,
        reason: String,
    },
    RoundCancelled {
        generation: u64,
        dropped: usize,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
