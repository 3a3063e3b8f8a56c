use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{NaiveDateTime, Timelike};
use log::warn;

use crate::clock::Clock;
use crate::error::StoreError;
use crate::schemas::{BillRecord, SplitResult};

const BILL_ID_FORMAT: &str = "%Y%m%d_%H%M%S";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const TIMESTAMP_MICROS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub trait BillStore: Send + Sync {
    /// Records a computed split and returns the id it can be retrieved under.
    ///
    /// Ids have one-second resolution: a second bill stored within the same
    /// second replaces the first one.
    fn store(&self, result: SplitResult) -> Result<String, StoreError>;

    fn retrieve(&self, id: &str) -> Result<BillRecord, StoreError>;
}

pub struct InMemoryBillStore {
    clock: Arc<dyn Clock>,
    bills: RwLock<HashMap<String, BillRecord>>,
}

impl InMemoryBillStore {
    pub fn new(clock: Arc<dyn Clock>) -> InMemoryBillStore {
        InMemoryBillStore {
            clock,
            bills: RwLock::new(HashMap::new()),
        }
    }
}

fn bill_id_at(now: NaiveDateTime) -> String {
    now.format(BILL_ID_FORMAT).to_string()
}

// The fraction is left out entirely on whole seconds
fn timestamp_at(now: NaiveDateTime) -> String {
    if now.nanosecond() / 1_000 == 0 {
        now.format(TIMESTAMP_FORMAT).to_string()
    } else {
        now.format(TIMESTAMP_MICROS_FORMAT).to_string()
    }
}

impl BillStore for InMemoryBillStore {
    fn store(&self, result: SplitResult) -> Result<String, StoreError> {
        let now = self.clock.now();
        let id = bill_id_at(now);
        let record = BillRecord {
            id: id.clone(),
            results: result.results,
            total: result.total,
            timestamp: timestamp_at(now),
        };

        let mut bills = self.bills.write().map_err(|_| StoreError::Poisoned)?;
        if bills.insert(id.clone(), record).is_some() {
            warn!("Bill {} was overwritten by a newer bill", id);
        }
        Ok(id)
    }

    fn retrieve(&self, id: &str) -> Result<BillRecord, StoreError> {
        let bills = self.bills.read().map_err(|_| StoreError::Poisoned)?;
        bills
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
