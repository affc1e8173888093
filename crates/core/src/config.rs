use crate::{Effect, GameError, FACE_COUNT};
use serde::{Deserialize, Serialize};

/// Every delay the controller schedules, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Timing {
    pub shuffle_stagger_ms: u64,
    pub shuffle_settle_ms: u64,
    pub shuffle_unlock_ms: u64,
    pub drumroll_ms: u64,
    pub effect_end_ms: u64,
    pub flip_ms: u64,
    pub reveal_ms: u64,
    pub particle_count: usize,
    pub particle_stagger_ms: u64,
    pub particle_lifetime_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            shuffle_stagger_ms: 100,
            shuffle_settle_ms: 800,
            shuffle_unlock_ms: 1200,
            drumroll_ms: 500,
            effect_end_ms: 2000,
            flip_ms: 2000,
            reveal_ms: 2500,
            particle_count: 25,
            particle_stagger_ms: 40,
            particle_lifetime_ms: 2000,
        }
    }
}

impl Timing {
    /// Last instant, relative to a shuffle, at which one of its tasks fires.
    pub fn shuffle_span_ms(&self, cards: usize) -> u64 {
        let last_settle =
            self.shuffle_stagger_ms * cards.saturating_sub(1) as u64 + self.shuffle_settle_ms;
        last_settle.max(self.shuffle_unlock_ms)
    }

    /// Last instant, relative to a selection, at which a particle expires.
    pub fn round_span_ms(&self) -> u64 {
        self.reveal_ms
            + self.particle_stagger_ms * self.particle_count.saturating_sub(1) as u64
            + self.particle_lifetime_ms
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ControllerConfig {
    pub card_count: usize,
    pub effect_count: usize,
    pub timing: Timing,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            card_count: FACE_COUNT,
            effect_count: Effect::ALL.len(),
            timing: Timing::default(),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.card_count != FACE_COUNT {
            return Err(GameError::InvalidConfig(format!(
                "card count {} does not match the {} faces",
                self.card_count, FACE_COUNT
            )));
        }
        if self.effect_count != Effect::ALL.len() {
            return Err(GameError::InvalidConfig(format!(
                "effect count {} is not {}",
                self.effect_count,
                Effect::ALL.len()
            )));
        }
        let timing = &self.timing;
        if timing.shuffle_stagger_ms == 0 || timing.particle_stagger_ms == 0 {
            return Err(GameError::InvalidConfig(
                "staggers must be positive".to_string(),
            ));
        }
        let last_deal = timing.shuffle_stagger_ms * self.card_count.saturating_sub(1) as u64;
        if timing.shuffle_unlock_ms < last_deal {
            return Err(GameError::InvalidConfig(format!(
                "unlock at {}ms comes before the last card is dealt at {last_deal}ms",
                timing.shuffle_unlock_ms
            )));
        }
        if timing.drumroll_ms > timing.effect_end_ms {
            return Err(GameError::InvalidConfig(
                "drum roll must start before the effect ends".to_string(),
            ));
        }
        if timing.flip_ms > timing.reveal_ms {
            return Err(GameError::InvalidConfig(
                "card must flip before the result is revealed".to_string(),
            ));
        }
        if timing.particle_lifetime_ms == 0 {
            return Err(GameError::InvalidConfig(
                "particle lifetime must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
