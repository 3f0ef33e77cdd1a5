use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use crate::auth::error::AuthError;
use crate::models::{CloudEnvironment, Region};

/// Bookkeeping for the most recently finished refresh round of one key.
#[derive(Debug, Default)]
struct Round {
    failed: Option<(u64, AuthError)>,
}

#[derive(Debug, Default)]
struct KeyLock {
    /// Bumped once per finished round. Read without the lock so callers
    /// can snapshot it before queueing.
    generation: AtomicU64,
    round: Mutex<Round>,
}

/// Per-key mutual exclusion for token refreshes.
///
/// One lock per (environment, region) pair, created for the whole keyspace
/// at construction and reused for the process lifetime, so there is no
/// lazy-creation race and refreshes for different keys never serialize on
/// each other. The generation counter lets callers that queued behind an
/// in-flight refresh share that round's failure instead of piling extra
/// calls onto a rejecting upstream.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    locks: HashMap<(CloudEnvironment, Region), KeyLock>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        let mut locks = HashMap::new();
        for environment in CloudEnvironment::ALL {
            for region in Region::ALL {
                locks.insert((environment, region), KeyLock::default());
            }
        }
        Self { locks }
    }

    /// Snapshot of the key's refresh generation, taken before queueing on
    /// the lock.
    pub fn observe(&self, environment: CloudEnvironment, region: Region) -> u64 {
        self.key(environment, region).generation.load(Ordering::Acquire)
    }

    /// Suspends cooperatively until the key's lock is free. The returned
    /// guard releases the lock when dropped, on every exit path.
    pub async fn acquire(&self, environment: CloudEnvironment, region: Region) -> RefreshGuard<'_> {
        let key = self.key(environment, region);
        RefreshGuard {
            key,
            round: key.round.lock().await,
        }
    }

    fn key(&self, environment: CloudEnvironment, region: Region) -> &KeyLock {
        self.locks
            .get(&(environment, region))
            .expect("lock exists for every (environment, region) pair")
    }
}

/// Exclusive access to one key's refresh round.
pub struct RefreshGuard<'a> {
    key: &'a KeyLock,
    round: MutexGuard<'a, Round>,
}

impl RefreshGuard<'_> {
    /// The failure of a round that finished after `observed`, if any.
    /// Callers that queued before that round completed take its outcome
    /// instead of issuing another upstream call; callers arriving later
    /// start a fresh round.
    pub fn shared_failure(&self, observed: u64) -> Option<AuthError> {
        self.round
            .failed
            .as_ref()
            .filter(|(generation, _)| *generation > observed)
            .map(|(_, err)| err.clone())
    }

    /// Close the round successfully.
    pub fn complete(&mut self) {
        self.bump();
        self.round.failed = None;
    }

    /// Close the round with a failure to be shared with its queued callers.
    pub fn fail(&mut self, err: AuthError) {
        let generation = self.bump();
        self.round.failed = Some((generation, err));
    }

    fn bump(&self) -> u64 {
        self.key.generation.fetch_add(1, Ordering::AcqRel) + 1
    }
}
