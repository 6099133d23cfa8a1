use crate::{
    rng::RandomSource,
    rules::GameRules,
    symbols::{Roll, Symbol},
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub roll: Roll,
    pub rerolled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub roll: Roll,
    pub payout: u64,
    pub credits_after: u64,
    pub rerolled: bool,
}

pub fn generate_symbol<R: RandomSource + ?Sized>(rng: &mut R) -> Symbol {
    // Out-of-range draws are pinned into [0,1) so the index stays on the reel.
    let draw = rng.next_unit();
    let draw = if draw.is_nan() {
        0.0
    } else {
        draw.clamp(0.0, 1.0 - f64::EPSILON)
    };
    Symbol::from_index((draw * Symbol::COUNT as f64).floor() as usize)
}

/// Draws `reel_length` symbols, one random value each.
pub fn generate_roll<R: RandomSource + ?Sized>(rng: &mut R, reel_length: usize) -> Roll {
    (0..reel_length).map(|_| generate_symbol(rng)).collect()
}

pub fn is_winning(roll: &[Symbol]) -> bool {
    match roll.split_first() {
        Some((first, rest)) => rest.iter().all(|s| s == first),
        None => false,
    }
}

pub fn payout(roll: &[Symbol]) -> u64 {
    if is_winning(roll) {
        roll[0].payout()
    } else {
        0
    }
}

/// House edge: may swap a winning roll for a fresh one.
///
/// Draw order is fixed. No draw is taken for losing rolls or when the balance is
/// below the low threshold. Otherwise one draw decides, and a re-roll takes
/// `reel_length` more.
pub fn adjust<R: RandomSource + ?Sized>(
    roll: Roll,
    credits_before_roll: u64,
    rules: &GameRules,
    rng: &mut R,
) -> Adjustment {
    let probability = rules.reroll_probability(credits_before_roll);
    if probability == 0.0 || !is_winning(&roll) {
        return Adjustment {
            roll,
            rerolled: false,
        };
    }

    if rng.next_unit() >= probability {
        return Adjustment {
            roll,
            rerolled: false,
        };
    }

    Adjustment {
        roll: generate_roll(rng, rules.reel_length),
        rerolled: true,
    }
}

/// One full spin against `credits_before_roll`. Callers must already have
/// checked the balance covers the roll cost.
pub fn resolve<R: RandomSource + ?Sized>(
    credits_before_roll: u64,
    rules: &GameRules,
    rng: &mut R,
) -> RollOutcome {
    let base = generate_roll(rng, rules.reel_length);
    let Adjustment { roll, rerolled } = adjust(base, credits_before_roll, rules, rng);
    let payout = payout(&roll);
    let credits_after = credits_before_roll.saturating_sub(rules.roll_cost) + payout;
    debug!(credits_before_roll, credits_after, payout, rerolled, "roll resolved");
    RollOutcome {
        roll,
        payout,
        credits_after,
        rerolled,
    }
}
