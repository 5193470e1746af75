//! In-memory activity log. Clones share the same stores.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use super::activity_log::{ActivityRecord, ActivitySink};
use crate::error::PersistenceError;

type Stores = BTreeMap<NaiveDate, Vec<ActivityRecord>>;

#[derive(Debug, Clone, Default)]
pub struct MemoryActivityLog {
    stores: Arc<Mutex<Stores>>,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Stores> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn records(&self, date: NaiveDate) -> Vec<ActivityRecord> {
        self.lock().get(&date).cloned().unwrap_or_default()
    }

    /// Every record across all days, oldest store first.
    pub fn all_records(&self) -> Vec<ActivityRecord> {
        self.lock().values().flatten().cloned().collect()
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.lock().keys().copied().collect()
    }
}

impl ActivitySink for MemoryActivityLog {
    fn ensure_store(&mut self, header: &ActivityRecord) -> Result<bool, PersistenceError> {
        let mut stores = self.lock();
        if stores.contains_key(&header.date()) {
            return Ok(false);
        }
        stores.insert(header.date(), vec![header.clone()]);
        Ok(true)
    }

    fn append(&mut self, date: NaiveDate, record: &ActivityRecord) -> Result<(), PersistenceError> {
        self.lock()
            .get_mut(&date)
            .ok_or_else(|| PersistenceError::Unavailable(format!("no store for {date}")))?
            .push(record.clone());
        Ok(())
    }
}
