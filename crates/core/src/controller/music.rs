use super::*;
use crate::Event;
use log::{debug, warn};

impl GameController {
    /// Switches background music. The previous channel is always stopped; the
    /// new one only becomes active if playback succeeds.
    pub fn play_bgm(&mut self, channel: Channel, events: &mut EventBus) -> Result<bool, GameError> {
        if !channel.is_bgm() {
            return Err(GameError::NotBgm(channel));
        }
        self.stop_bgm(events);
        match self.audio.play(channel) {
            Ok(()) => {
                self.active_bgm = Some(channel);
                events.push(Event::BgmStarted { channel });
                Ok(true)
            }
            Err(err) => {
                warn!("bgm {} failed to start: {err}", channel.id());
                events.push(Event::AudioFailed {
                    channel,
                    reason: err.to_string(),
                });
                Ok(false)
            }
        }
    }

    pub fn stop_bgm(&mut self, events: &mut EventBus) {
        if let Some(channel) = self.active_bgm.take() {
            self.audio.stop(channel);
            events.push(Event::BgmStopped { channel });
        }
    }

    /// Fire-and-forget sound effect. Music channels are rejected so they
    /// cannot bypass the single-BGM rule.
    pub fn play_sound_effect(
        &mut self,
        channel: Channel,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        if channel.is_bgm() {
            return Err(GameError::NotSoundEffect(channel));
        }
        self.sound(channel, events);
        Ok(())
    }

    pub(super) fn sound(&mut self, channel: Channel, events: &mut EventBus) {
        match self.audio.play(channel) {
            Ok(()) => events.push(Event::SoundPlayed { channel }),
            Err(err) => {
                warn!("sound effect {} failed: {err}", channel.id());
                events.push(Event::AudioFailed {
                    channel,
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Schedules a staggered burst of particles. Particle tasks are not tied to
    /// a round, so a shuffle never leaves one behind.
    pub fn spawn_particle_burst(&mut self) {
        let timing = self.config.timing;
        for i in 0..timing.particle_count {
            self.schedule_unbound(timing.particle_stagger_ms * i as u64, Task::SpawnParticle);
        }
        debug!(
            "particle burst of {} scheduled at {}ms ({} live)",
            timing.particle_count,
            self.now_ms,
            self.particles.len()
        );
    }

    pub(super) fn spawn_particle(&mut self, events: &mut EventBus) {
        let id = self.next_particle_id;
        self.next_particle_id = self.next_particle_id.wrapping_add(1);
        let particle = Particle::random(id, self.now_ms, &mut self.rng);
        events.push(Event::ParticleSpawned {
            id,
            color: particle.color,
        });
        self.particles.push(particle);
        let lifetime = self.config.timing.particle_lifetime_ms;
        self.schedule_unbound(lifetime, Task::ExpireParticle { id });
    }

    pub(super) fn expire_particle(&mut self, id: u64, events: &mut EventBus) {
        let before = self.particles.len();
        self.particles.retain(|particle| particle.id != id);
        if self.particles.len() != before {
            events.push(Event::ParticleExpired { id });
        }
    }
}
