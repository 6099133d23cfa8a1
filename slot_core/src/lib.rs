pub mod engine;
pub mod error;
pub mod rng;
pub mod rules;
pub mod session;
pub mod symbols;

pub use crate::engine::{adjust, generate_roll, is_winning, payout, resolve, Adjustment, RollOutcome};
pub use crate::error::{ErrorKind, GameError, GameResult};
pub use crate::rng::{derive_hash_hex, RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use crate::rules::GameRules;
pub use crate::session::{Cashout, Session, SessionStatus, SessionStore};
pub use crate::symbols::{Roll, Symbol};
