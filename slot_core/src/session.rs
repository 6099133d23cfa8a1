use crate::{
    engine::{resolve, RollOutcome},
    error::{GameError, GameResult},
    rng::{RandomSource, ThreadRandom},
    rules::GameRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Open,
    Closed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Open => f.write_str("open"),
            SessionStatus::Closed => f.write_str("closed"),
        }
    }
}

/// Point-in-time copy of one session. Mutating it has no effect on the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub credits: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cashout {
    pub final_credits: u64,
    pub status: SessionStatus,
}

// Every check runs before any field is written, so a record recovered from a
// poisoned lock is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory registry of sessions.
///
/// The map lock is held only long enough to find a record; each record has its
/// own mutex so the balance check and the debit of a roll happen atomically,
/// while different sessions proceed in parallel.
pub struct SessionStore<R = ThreadRandom> {
    rules: GameRules,
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    rng: Mutex<R>,
}

impl Default for SessionStore<ThreadRandom> {
    fn default() -> Self {
        Self::new(ThreadRandom)
    }
}

impl<R: RandomSource> SessionStore<R> {
    pub fn new(rng: R) -> Self {
        Self::with_rules(GameRules::default(), rng)
    }

    pub fn with_rules(rules: GameRules, rng: R) -> Self {
        Self {
            rules,
            sessions: RwLock::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn create(&self) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            status: SessionStatus::Open,
            credits: self.rules.initial_credits,
        };
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id.clone(), Arc::new(Mutex::new(session.clone())));
        info!(session_id = %session.id, credits = session.credits, "session created");
        session
    }

    fn record(&self, id: &str) -> GameResult<Arc<Mutex<Session>>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::NotFound {
                session_id: id.to_string(),
            })
    }

    pub fn get(&self, id: &str) -> GameResult<Session> {
        let record = self.record(id)?;
        let session = lock(&record).clone();
        Ok(session)
    }

    fn ensure_open(session: &Session) -> GameResult<()> {
        match session.status {
            SessionStatus::Open => Ok(()),
            SessionStatus::Closed => Err(GameError::InvalidState {
                session_id: session.id.clone(),
                status: session.status,
            }),
        }
    }

    pub fn roll(&self, id: &str) -> GameResult<RollOutcome> {
        let record = self.record(id)?;
        let mut session = lock(&record);
        Self::ensure_open(&session)?;
        if session.credits < self.rules.roll_cost {
            return Err(GameError::InsufficientCredits {
                credits: session.credits,
                roll_cost: self.rules.roll_cost,
            });
        }

        let outcome = {
            let mut rng = lock(&self.rng);
            resolve(session.credits, &self.rules, &mut *rng)
        };
        session.credits = outcome.credits_after;
        session.updated_at = Utc::now();
        debug!(session_id = %session.id, credits = session.credits, "roll applied");
        Ok(outcome)
    }

    /// Closes the session. A second call fails instead of repeating the result.
    pub fn cashout(&self, id: &str) -> GameResult<Cashout> {
        let record = self.record(id)?;
        let mut session = lock(&record);
        Self::ensure_open(&session)?;
        session.status = SessionStatus::Closed;
        session.updated_at = Utc::now();
        info!(session_id = %session.id, final_credits = session.credits, "session cashed out");
        Ok(Cashout {
            final_credits: session.credits,
            status: session.status,
        })
    }
}
