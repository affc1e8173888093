use crate::{
    AudioBackend, Card, Channel, ControllerConfig, EventBus, Face, GameError, Particle, RngState,
    Scheduled, Scheduler,
};

mod music;
mod round;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Started { effect: crate::Effect },
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    Hidden,
    Showing { position: usize, face: Face },
}

impl ResultView {
    pub fn face(self) -> Option<Face> {
        match self {
            ResultView::Hidden => None,
            ResultView::Showing { face, .. } => Some(face),
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, ResultView::Showing { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    DealCard { position: usize, face: Face },
    SettleCard { position: usize },
    Unlock,
    DrumRoll { position: usize },
    EndEffect { position: usize },
    Flip { position: usize },
    Reveal { position: usize, face: Face },
    SpawnParticle,
    ExpireParticle { id: u64 },
}

/// Owns the card model, selection lock, music state and every pending
/// continuation. Operations return immediately; time only moves through
/// [`GameController::advance`] and [`GameController::advance_to`].
pub struct GameController {
    config: ControllerConfig,
    rng: RngState,
    audio: Box<dyn AudioBackend>,
    cards: Vec<Card>,
    selection_locked: bool,
    grid_interactive: bool,
    active_bgm: Option<Channel>,
    result: ResultView,
    particles: Vec<Particle>,
    next_particle_id: u64,
    generation: u64,
    now_ms: u64,
    scheduler: Scheduler<Task>,
}

impl GameController {
    pub fn new(
        config: ControllerConfig,
        audio: Box<dyn AudioBackend>,
        rng: RngState,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let cards = Face::all()
            .into_iter()
            .take(config.card_count)
            .enumerate()
            .map(|(position, face)| Card::new(position, face))
            .collect();
        Ok(Self {
            config,
            rng,
            audio,
            cards,
            selection_locked: false,
            grid_interactive: true,
            active_bgm: None,
            result: ResultView::Hidden,
            particles: Vec::new(),
            next_particle_id: 1,
            generation: 0,
            now_ms: 0,
            scheduler: Scheduler::new(),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub fn faces(&self) -> Vec<Face> {
        self.cards.iter().map(|card| card.face).collect()
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.cards
            .iter()
            .position(|card| card.markers.selected)
    }

    pub fn is_locked(&self) -> bool {
        self.selection_locked
    }

    pub fn grid_interactive(&self) -> bool {
        self.grid_interactive
    }

    pub fn active_bgm(&self) -> Option<Channel> {
        self.active_bgm
    }

    /// Highlight state of a music button: only the active channel is lit.
    pub fn bgm_highlight(&self, channel: Channel) -> bool {
        self.active_bgm == Some(channel)
    }

    pub fn result(&self) -> ResultView {
        self.result
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn next_fire_at(&self) -> Option<u64> {
        self.scheduler.next_fire_at()
    }

    pub fn is_idle(&self) -> bool {
        self.scheduler.is_empty()
    }

    pub fn advance(&mut self, delta_ms: u64, events: &mut EventBus) {
        let target = self.now_ms.saturating_add(delta_ms);
        self.advance_to(target, events);
    }

    /// Fires every continuation due at or before `target_ms`, in order. Tasks
    /// scheduled by a firing task are picked up in the same call when due.
    pub fn advance_to(&mut self, target_ms: u64, events: &mut EventBus) {
        while let Some(Scheduled { fire_at, task, .. }) = self.scheduler.pop_due(target_ms) {
            self.now_ms = self.now_ms.max(fire_at);
            self.apply(task, events);
        }
        self.now_ms = self.now_ms.max(target_ms);
    }

    /// Runs the clock forward until nothing is pending.
    pub fn run_until_idle(&mut self, events: &mut EventBus) {
        while let Some(at) = self.scheduler.next_fire_at() {
            self.advance_to(at, events);
        }
    }

    fn schedule(&mut self, delay_ms: u64, task: Task) {
        let generation = Some(self.generation);
        self.scheduler
            .schedule(self.now_ms.saturating_add(delay_ms), generation, task);
    }

    fn schedule_unbound(&mut self, delay_ms: u64, task: Task) {
        self.scheduler
            .schedule(self.now_ms.saturating_add(delay_ms), None, task);
    }

    fn card_mut(&mut self, position: usize) -> Option<&mut Card> {
        self.cards.get_mut(position)
    }

    fn apply(&mut self, task: Task, events: &mut EventBus) {
        match task {
            Task::DealCard { position, face } => self.deal_card(position, face, events),
            Task::SettleCard { position } => self.settle_card(position, events),
            Task::Unlock => self.unlock(events),
            Task::DrumRoll { position } => self.drum_roll(position, events),
            Task::EndEffect { position } => self.end_effect(position, events),
            Task::Flip { position } => self.flip(position, events),
            Task::Reveal { position, face } => self.reveal(position, face, events),
            Task::SpawnParticle => self.spawn_particle(events),
            Task::ExpireParticle { id } => self.expire_particle(id, events),
        }
    }
}
