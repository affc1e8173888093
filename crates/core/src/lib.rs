//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod audio;
pub mod cards;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod particles;
pub mod rng;
pub mod scheduler;

pub use audio::*;
pub use cards::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use events::*;
pub use particles::*;
pub use rng::*;
pub use scheduler::*;
