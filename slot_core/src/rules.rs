use serde::{Deserialize, Serialize};

pub const INITIAL_CREDITS: u64 = 10;
pub const ROLL_COST: u64 = 1;
pub const REEL_LENGTH: usize = 3;
pub const CHEAT_THRESHOLD_LOW: u64 = 40;
pub const CHEAT_THRESHOLD_HIGH: u64 = 60;
pub const REROLL_PROBABILITY_MEDIUM: f64 = 0.3;
pub const REROLL_PROBABILITY_HIGH: f64 = 0.6;

/// Fixed numbers governing a game. Chosen when the store is built and never
/// edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRules {
    pub initial_credits: u64,
    pub roll_cost: u64,
    pub reel_length: usize,
    pub cheat_threshold_low: u64,
    pub cheat_threshold_high: u64,
    pub reroll_probability_medium: f64,
    pub reroll_probability_high: f64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            initial_credits: INITIAL_CREDITS,
            roll_cost: ROLL_COST,
            reel_length: REEL_LENGTH,
            cheat_threshold_low: CHEAT_THRESHOLD_LOW,
            cheat_threshold_high: CHEAT_THRESHOLD_HIGH,
            reroll_probability_medium: REROLL_PROBABILITY_MEDIUM,
            reroll_probability_high: REROLL_PROBABILITY_HIGH,
        }
    }
}

impl GameRules {
    /// Chance that a winning roll is thrown away, given the balance before the roll.
    pub fn reroll_probability(&self, credits_before_roll: u64) -> f64 {
        if credits_before_roll >= self.cheat_threshold_high {
            self.reroll_probability_high
        } else if credits_before_roll >= self.cheat_threshold_low {
            self.reroll_probability_medium
        } else {
            0.0
        }
    }
}
