use crate::{Effect, Face, FACE_COUNT};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-reproducible source; the drawn seed is kept so a session can be
    /// reported and replayed with `from_seed`.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Fisher-Yates: walk from the last index down to 1, swapping each slot
    /// with a uniformly chosen slot in `[0, i]`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            items.swap(i, j);
        }
    }

    pub fn face_permutation(&mut self) -> [Face; FACE_COUNT] {
        let mut faces = Face::all();
        self.shuffle(&mut faces);
        faces
    }

    pub fn effect(&mut self) -> Effect {
        Effect::ALL[self.index(Effect::ALL.len())]
    }
}
