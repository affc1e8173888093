use serde::{Deserialize, Serialize};
use std::fmt;

pub const FACE_COUNT: usize = 6;

/// A face value printed on a card, always in `1..=6`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Face(u8);

impl Face {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = FACE_COUNT as u8;

    pub fn new(value: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The fixed face set in ascending order.
    pub fn all() -> [Face; FACE_COUNT] {
        [Face(1), Face(2), Face(3), Face(4), Face(5), Face(6)]
    }

    /// Asset name the browser build used for this face.
    pub fn image_name(self) -> String {
        format!("images/{}.png", self.0)
    }
}

impl TryFrom<u8> for Face {
    type Error = crate::GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Face::new(value).ok_or(crate::GameError::InvalidFace(value))
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> Self {
        face.0
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Effect {
    GlowPulse,
    Bouncing,
    MagicSpin,
    ShakeFlash,
    FloatOrbit,
}

impl Effect {
    pub const ALL: [Effect; 5] = [
        Effect::GlowPulse,
        Effect::Bouncing,
        Effect::MagicSpin,
        Effect::ShakeFlash,
        Effect::FloatOrbit,
    ];

    /// 1-based identifier, matching the `effect-N` marker.
    pub fn id(self) -> u8 {
        match self {
            Effect::GlowPulse => 1,
            Effect::Bouncing => 2,
            Effect::MagicSpin => 3,
            Effect::ShakeFlash => 4,
            Effect::FloatOrbit => 5,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|effect| effect.id() == id)
    }

    pub fn marker(self) -> String {
        format!("effect-{}", self.id())
    }

    pub fn description(self) -> &'static str {
        match self {
            Effect::GlowPulse => "mysterious glow pulse",
            Effect::Bouncing => "playful bouncing",
            Effect::MagicSpin => "magic spin",
            Effect::ShakeFlash => "shake and color flash",
            Effect::FloatOrbit => "floating star orbit",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Shuffling,
    Selected,
    EffectActive,
    Flipped,
}

/// Display markers currently applied to a card. Several can coexist; the
/// renderer collapses them with [`Card::display_state`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardMarkers {
    pub selected: bool,
    pub shuffling: bool,
    pub flipped: bool,
    pub drumroll: bool,
    pub effect: Option<Effect>,
}

impl CardMarkers {
    pub fn clear_effects(&mut self) {
        self.effect = None;
        self.drumroll = false;
    }

    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if self.selected {
            labels.push("selected".to_string());
        }
        if self.shuffling {
            labels.push("shuffling".to_string());
        }
        if self.flipped {
            labels.push("flipped".to_string());
        }
        if let Some(effect) = self.effect {
            labels.push(effect.marker());
        }
        if self.drumroll {
            labels.push("drumroll-effect".to_string());
        }
        labels
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub position: usize,
    pub face: Face,
    pub markers: CardMarkers,
}

impl Card {
    pub fn new(position: usize, face: Face) -> Self {
        Self {
            position,
            face,
            markers: CardMarkers::default(),
        }
    }

    pub fn display_state(&self) -> DisplayState {
        let markers = &self.markers;
        if markers.shuffling {
            DisplayState::Shuffling
        } else if markers.flipped {
            DisplayState::Flipped
        } else if markers.effect.is_some() || markers.drumroll {
            DisplayState::EffectActive
        } else if markers.selected {
            DisplayState::Selected
        } else {
            DisplayState::Idle
        }
    }

    pub fn is_face_up(&self) -> bool {
        self.markers.flipped
    }
}

/// True when `faces` uses every face of the set exactly once.
pub fn is_permutation(faces: &[Face]) -> bool {
    if faces.len() != FACE_COUNT {
        return false;
    }
    let mut sorted = faces.to_vec();
    sorted.sort();
    sorted == Face::all()
}
