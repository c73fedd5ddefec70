use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Accepted,
    /// Accepted, and the buffer is now full: time to submit.
    Filled,
    /// Dropped because the buffer was already full.
    Rejected,
}

/// Player's attempt for the current round, capped at the sequence length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInput {
    directions: Vec<Direction>,
    cap: usize,
}

impl PlayerInput {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            directions: Vec::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, direction: Direction) -> PushOutcome {
        if self.is_full() {
            return PushOutcome::Rejected;
        }
        self.directions.push(direction);
        if self.is_full() {
            PushOutcome::Filled
        } else {
            PushOutcome::Accepted
        }
    }

    pub fn is_full(&self) -> bool {
        self.directions.len() >= self.cap
    }

    pub fn as_slice(&self) -> &[Direction] {
        &self.directions
    }

    pub fn into_vec(self) -> Vec<Direction> {
        self.directions
    }
}
