use std::collections::HashMap;

use parking_lot::RwLock;

use crate::auth::credential::Credential;
use crate::models::{CloudEnvironment, Region};

/// Storage of one credential record per (environment, region) pair.
///
/// The keyspace is finite and known at startup, so every slot is created
/// empty up front and the map itself is never mutated afterwards. Reads
/// take a short read lock that is never held across an await point; writes
/// happen only inside the refresh coordinator's critical section for the
/// same key, and always replace the whole record.
#[derive(Debug, Default)]
pub struct CredentialStore {
    slots: HashMap<(CloudEnvironment, Region), RwLock<Option<Credential>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        let mut slots = HashMap::new();
        for environment in CloudEnvironment::ALL {
            for region in Region::ALL {
                slots.insert((environment, region), RwLock::new(None));
            }
        }
        Self { slots }
    }

    /// Current record for the key, possibly absent. Never blocks on I/O
    /// and never fails; callers get a transient clone.
    pub fn read(&self, environment: CloudEnvironment, region: Region) -> Option<Credential> {
        self.slot(environment, region).read().clone()
    }

    /// Whole-record replacement. No reader ever observes a partially
    /// written record.
    pub fn write(&self, environment: CloudEnvironment, region: Region, record: Credential) {
        *self.slot(environment, region).write() = Some(record);
    }

    fn slot(&self, environment: CloudEnvironment, region: Region) -> &RwLock<Option<Credential>> {
        self.slots
            .get(&(environment, region))
            .expect("slot exists for every (environment, region) pair")
    }
}
