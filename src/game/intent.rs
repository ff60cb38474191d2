use std::collections::VecDeque;

use super::action::Direction;

/// Direction changes queued between two ticks
///
/// Input arrives faster than the snake moves, so a quick "up, then left" must
/// survive until two ticks have consumed it. The buffer is bounded; anything
/// beyond its capacity is dropped on the floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentBuffer {
    queue: VecDeque<Direction>,
    capacity: usize,
}

impl IntentBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue a direction. Returns false when the buffer was full and the intent was dropped.
    pub fn push(&mut self, direction: Direction) -> bool {
        if self.queue.len() >= self.capacity {
            return false;
        }
        self.queue.push_back(direction);
        true
    }

    /// Pick the direction for the next tick.
    ///
    /// Entries that reverse `current` are popped and thrown away; the first
    /// acceptable entry is popped and returned. Later entries stay queued for
    /// the following ticks.
    pub fn resolve(&mut self, current: Direction) -> Direction {
        while let Some(next) = self.queue.pop_front() {
            if !current.is_opposite(next) {
                return next;
            }
        }
        current
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn pending(&self) -> impl Iterator<Item = Direction> + '_ {
        self.queue.iter().copied()
    }
}
