//! Enemy turn pacing
//!
//! The enemy answers a short while after the player acts, so the rendering
//! layer can show the player's move first.

use std::time::Duration;

/// One-shot countdown armed at the end of the player's turn
#[derive(Debug, Clone)]
pub struct EnemyTurnTimer {
    delay: Duration,
    /// Time left until the enemy acts; None when not armed
    remaining: Option<Duration>,
}

impl EnemyTurnTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            remaining: None,
        }
    }

    pub fn arm(&mut self) {
        self.remaining = Some(self.delay);
    }

    pub fn disarm(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `delta`; true exactly once when the delay has elapsed
    pub fn update(&mut self, delta: Duration) -> bool {
        match self.remaining {
            Some(left) if delta >= left => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - delta);
                false
            }
            None => false,
        }
    }
}

impl Default for EnemyTurnTimer {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
