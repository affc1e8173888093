use serde::Serialize;
use std::collections::BTreeMap;
use sugoroku_core::{
    Effect, Event, EventBus, Face, GameController, GameError, ResultView, RngState, SelectOutcome,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoError {
    #[error("game error: {0}")]
    Game(#[from] GameError),
    #[error("round {0} was still locked after the shuffle unlock")]
    StillLocked(u32),
    #[error("round {0} finished without a result")]
    NoResult(u32),
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceLine {
    pub round: u32,
    pub at_ms: u64,
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: u32,
    pub position: usize,
    pub effect: Effect,
    pub face: Face,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AutoReport {
    pub seed: u64,
    pub rounds: Vec<RoundRecord>,
    pub effect_counts: BTreeMap<u8, u32>,
    pub face_counts: BTreeMap<u8, u32>,
    pub audio_failures: u32,
}

impl AutoReport {
    pub fn effect_frequency(&self, effect: Effect) -> f64 {
        let hits = self.effect_counts.get(&effect.id()).copied().unwrap_or(0);
        if self.rounds.is_empty() {
            0.0
        } else {
            f64::from(hits) / self.rounds.len() as f64
        }
    }
}

/// Plays `rounds` full rounds in virtual time: shuffle, wait for the unlock,
/// pick a random card, wait for the reveal and the particle burst to clear.
/// Every event is handed to `on_event` as it is drained.
pub fn run_rounds<F>(
    game: &mut GameController,
    picker: &mut RngState,
    rounds: u32,
    mut on_event: F,
) -> Result<AutoReport, AutoError>
where
    F: FnMut(TraceLine),
{
    let timing = game.config().timing;
    let mut events = EventBus::default();
    let mut report = AutoReport {
        seed: game.seed(),
        ..AutoReport::default()
    };

    for round in 1..=rounds {
        game.shuffle(&mut events);
        game.advance(timing.shuffle_unlock_ms, &mut events);
        flush(&mut events, round, game.now_ms(), &mut report, &mut on_event);

        let position = picker.index(game.cards().len());
        let effect = match game.select_card(position, &mut events)? {
            SelectOutcome::Started { effect } => effect,
            SelectOutcome::Ignored => return Err(AutoError::StillLocked(round)),
        };
        flush(&mut events, round, game.now_ms(), &mut report, &mut on_event);
        while let Some(at) = game.next_fire_at() {
            game.advance_to(at, &mut events);
            flush(&mut events, round, at, &mut report, &mut on_event);
        }

        let ResultView::Showing { face, .. } = game.result() else {
            return Err(AutoError::NoResult(round));
        };
        *report.effect_counts.entry(effect.id()).or_insert(0) += 1;
        *report.face_counts.entry(face.value()).or_insert(0) += 1;
        report.rounds.push(RoundRecord {
            round,
            position,
            effect,
            face,
        });
    }
    Ok(report)
}

fn flush<F>(
    events: &mut EventBus,
    round: u32,
    at_ms: u64,
    report: &mut AutoReport,
    on_event: &mut F,
) where
    F: FnMut(TraceLine),
{
    for event in events.drain() {
        if matches!(event, Event::AudioFailed { .. }) {
            report.audio_failures += 1;
        }
        on_event(TraceLine {
            round,
            at_ms,
            event,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sugoroku_core::{ControllerConfig, MutedAudio, SilentAudio};

    fn game(seed: u64) -> GameController {
        GameController::new(
            ControllerConfig::default(),
            Box::new(SilentAudio::new()),
            RngState::from_seed(seed),
        )
        .expect("controller")
    }

    #[test]
    fn every_round_reveals_the_picked_card() {
        let mut game = game(5);
        let mut picker = RngState::from_seed(6);
        let mut reveals = Vec::new();
        let report = run_rounds(&mut game, &mut picker, 30, |line| {
            if let Event::ResultRevealed { position, face } = line.event {
                reveals.push((line.round, position, face));
            }
        })
        .expect("rounds");
        assert_eq!(report.rounds.len(), 30);
        for (record, (round, position, face)) in report.rounds.iter().zip(&reveals) {
            assert_eq!(record.round, *round);
            assert_eq!(record.position, *position);
            assert_eq!(record.face, *face);
        }
        assert_eq!(report.effect_counts.values().sum::<u32>(), 30);
        assert_eq!(report.face_counts.values().sum::<u32>(), 30);
        assert!(game.particles().is_empty());
    }

    #[test]
    fn effect_frequencies_are_close_to_one_fifth() {
        let mut game = game(0xC0FFEE);
        let mut picker = RngState::from_seed(1);
        let report = run_rounds(&mut game, &mut picker, 2_000, |_| {}).expect("rounds");
        for effect in Effect::ALL {
            let freq = report.effect_frequency(effect);
            assert!((0.16..0.24).contains(&freq), "{effect:?} {freq}");
        }
    }

    #[test]
    fn muted_audio_is_counted_not_fatal() {
        let mut game = GameController::new(
            ControllerConfig::default(),
            Box::new(MutedAudio),
            RngState::from_seed(2),
        )
        .expect("controller");
        let mut picker = RngState::from_seed(3);
        let report = run_rounds(&mut game, &mut picker, 3, |_| {}).expect("rounds");
        // shuffle, card flip, drum roll and fanfare per round
        assert_eq!(report.audio_failures, 12);
    }
}
