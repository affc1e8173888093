use crate::RngState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ParticleColor {
    Gold,
    Orange,
    Purple,
    Cyan,
    Green,
}

impl ParticleColor {
    pub const PALETTE: [ParticleColor; 5] = [
        ParticleColor::Gold,
        ParticleColor::Orange,
        ParticleColor::Purple,
        ParticleColor::Cyan,
        ParticleColor::Green,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            ParticleColor::Gold => "#FFD700",
            ParticleColor::Orange => "#FF6F00",
            ParticleColor::Purple => "#4A148C",
            ParticleColor::Cyan => "#00BCD4",
            ParticleColor::Green => "#4CAF50",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ParticleColor::Gold => (0xFF, 0xD7, 0x00),
            ParticleColor::Orange => (0xFF, 0x6F, 0x00),
            ParticleColor::Purple => (0x4A, 0x14, 0x8C),
            ParticleColor::Cyan => (0x00, 0xBC, 0xD4),
            ParticleColor::Green => (0x4C, 0xAF, 0x50),
        }
    }
}

/// A short-lived burst particle. `x` and `y` are fractions of the display
/// area, `delay_s` is the animation offset the renderer may apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub color: ParticleColor,
    pub delay_s: f32,
    pub born_ms: u64,
}

impl Particle {
    pub fn random(id: u64, born_ms: u64, rng: &mut RngState) -> Self {
        let x = rng.unit();
        let y = rng.unit();
        let color = ParticleColor::PALETTE[rng.index(ParticleColor::PALETTE.len())];
        let delay_s = rng.unit() * 0.3;
        Self {
            id,
            x,
            y,
            color,
            delay_s,
            born_ms,
        }
    }
}
