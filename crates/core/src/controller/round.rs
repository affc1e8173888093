use super::*;
use crate::{Event, FACE_COUNT};
use log::debug;

impl GameController {
    /// Reshuffles the faces and resets every card with a staggered animation.
    /// Any round still in flight is cancelled first, so the last shuffle wins.
    /// Selection stays locked until the shuffle's own unlock fires.
    /// Returns the permutation the cards will hold once dealt.
    pub fn shuffle(&mut self, events: &mut EventBus) -> [Face; FACE_COUNT] {
        let stale = self.generation;
        self.generation = self.generation.wrapping_add(1);
        let dropped = self.scheduler.cancel_before(self.generation);
        if dropped > 0 {
            debug!("shuffle cancelled {dropped} pending tasks of round {stale}");
            events.push(Event::RoundCancelled {
                generation: stale,
                dropped,
            });
        }
        events.push(Event::ShuffleStarted {
            generation: self.generation,
        });

        self.sound(Channel::Shuffle, events);
        let faces = self.rng.face_permutation();
        let timing = self.config.timing;
        for (position, face) in faces.iter().copied().enumerate() {
            let start = timing.shuffle_stagger_ms * position as u64;
            self.schedule(start, Task::DealCard { position, face });
            self.schedule(
                start + timing.shuffle_settle_ms,
                Task::SettleCard { position },
            );
        }
        self.result = ResultView::Hidden;
        self.selection_locked = true;
        self.grid_interactive = false;
        self.schedule(timing.shuffle_unlock_ms, Task::Unlock);
        debug!("shuffle {} dealing {:?}", self.generation, faces);
        faces
    }

    /// Starts a selection round on the card at `position`. While a round holds
    /// the lock this is a no-op that reports [`SelectOutcome::Ignored`].
    pub fn select_card(
        &mut self,
        position: usize,
        events: &mut EventBus,
    ) -> Result<SelectOutcome, GameError> {
        if position >= self.cards.len() {
            return Err(GameError::UnknownCard(position));
        }
        if self.selection_locked {
            events.push(Event::SelectionIgnored { position });
            return Ok(SelectOutcome::Ignored);
        }

        self.selection_locked = true;
        self.sound(Channel::CardFlip, events);
        let effect = self.rng.effect();
        let face = {
            let card = &mut self.cards[position];
            card.markers.selected = true;
            card.markers.effect = Some(effect);
            card.face
        };
        debug!(
            "card {position} (face {face}) selected, effect {}: {}",
            effect.id(),
            effect.description()
        );
        events.push(Event::CardSelected {
            position,
            face,
            effect,
        });

        let timing = self.config.timing;
        self.schedule(timing.drumroll_ms, Task::DrumRoll { position });
        self.schedule(timing.effect_end_ms, Task::EndEffect { position });
        self.schedule(timing.flip_ms, Task::Flip { position });
        self.schedule(timing.reveal_ms, Task::Reveal { position, face });
        Ok(SelectOutcome::Started { effect })
    }

    pub(super) fn deal_card(&mut self, position: usize, face: Face, events: &mut EventBus) {
        let Some(card) = self.card_mut(position) else {
            return;
        };
        card.markers.clear_effects();
        card.markers.flipped = false;
        card.markers.selected = false;
        card.markers.shuffling = true;
        card.face = face;
        events.push(Event::CardDealt { position, face });
    }

    pub(super) fn settle_card(&mut self, position: usize, events: &mut EventBus) {
        if let Some(card) = self.card_mut(position) {
            card.markers.shuffling = false;
            events.push(Event::ShuffleSettled { position });
        }
    }

    pub(super) fn unlock(&mut self, events: &mut EventBus) {
        self.grid_interactive = true;
        self.selection_locked = false;
        events.push(Event::SelectionUnlocked);
    }

    pub(super) fn drum_roll(&mut self, position: usize, events: &mut EventBus) {
        self.sound(Channel::DrumRoll, events);
        if let Some(card) = self.card_mut(position) {
            card.markers.drumroll = true;
            events.push(Event::DrumRoll { position });
        }
    }

    pub(super) fn end_effect(&mut self, position: usize, events: &mut EventBus) {
        if let Some(card) = self.card_mut(position) {
            card.markers.clear_effects();
            events.push(Event::EffectEnded { position });
        }
    }

    pub(super) fn flip(&mut self, position: usize, events: &mut EventBus) {
        if let Some(card) = self.card_mut(position) {
            card.markers.flipped = true;
            events.push(Event::CardFlipped { position });
        }
    }

    pub(super) fn reveal(&mut self, position: usize, face: Face, events: &mut EventBus) {
        self.result = ResultView::Showing { position, face };
        self.grid_interactive = false;
        debug!("result revealed: card {position} shows {face}");
        events.push(Event::ResultRevealed { position, face });
        self.sound(Channel::Fanfare, events);
        self.spawn_particle_burst();
    }
}
