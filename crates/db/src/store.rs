use async_trait::async_trait;
use eyre::{Result, WrapErr};
use slotbook_core::models::day_slots::DaySlots;
use tracing::debug;

use crate::{DbPool, repositories::day_slots};

/// Keeper of per-date slot availability.
///
/// Both operations materialize the default template for a date that has not
/// been seen before. Dates and labels are opaque keys: neither is checked
/// against a calendar or the canonical label set.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Returns the slots of `date`, creating them if absent.
    async fn get_or_create(&self, date: &str) -> Result<DaySlots>;

    /// Sets `time` on `date` to `available` and returns the whole day.
    async fn set_slot(&self, date: &str, time: &str, available: bool) -> Result<DaySlots>;
}

/// [`SlotStore`] backed by the PostgreSQL `day_slots` table
#[derive(Debug, Clone)]
pub struct PgSlotStore {
    pool: DbPool,
}

impl PgSlotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn get_or_create(&self, date: &str) -> Result<DaySlots> {
        debug!(date, "Loading day slots");
        let row = day_slots::get_or_create_day_slots(&self.pool, date)
            .await
            .wrap_err_with(|| format!("Failed to load slots for {date}"))?;
        Ok(row.slots.0)
    }

    async fn set_slot(&self, date: &str, time: &str, available: bool) -> Result<DaySlots> {
        debug!(date, time, available, "Updating day slot");
        let row = day_slots::set_day_slot(&self.pool, date, time, available)
            .await
            .wrap_err_with(|| format!("Failed to update slot {time} for {date}"))?;
        Ok(row.slots.0)
    }
}
