use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled<T> {
    pub fire_at: u64,
    /// Round generation the task belongs to; `None` tasks are never cancelled.
    pub generation: Option<u64>,
    pub task: T,
}

/// Delayed continuations on a virtual millisecond clock. Tasks due at the same
/// instant fire in insertion order.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    queue: BTreeMap<(u64, u64), Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: u64, generation: Option<u64>, task: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.queue.insert(
            (fire_at, seq),
            Scheduled {
                fire_at,
                generation,
                task,
            },
        );
    }

    pub fn next_fire_at(&self) -> Option<u64> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Scheduled<T>> {
        let key = *self.queue.keys().next()?;
        if key.0 > now {
            return None;
        }
        self.queue.remove(&key)
    }

    /// Drops every round-bound task older than `generation`, returning how
    /// many were dropped.
    pub fn cancel_before(&mut self, generation: u64) -> usize {
        let before = self.queue.len();
        self.queue
            .retain(|_, item| item.generation.map_or(true, |gen| gen >= generation));
        before - self.queue.len()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scheduled<T>> + '_ {
        self.queue.values()
    }
}
