use async_trait::async_trait;
use eyre::Result;
use slotbook_core::models::day_slots::DaySlots;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::store::SlotStore;

/// Volatile [`SlotStore`]; records live as long as the store instance.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    days: RwLock<HashMap<String, DaySlots>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dates materialized so far.
    pub async fn len(&self) -> usize {
        self.days.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.days.read().await.is_empty()
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn get_or_create(&self, date: &str) -> Result<DaySlots> {
        if let Some(slots) = self.days.read().await.get(date) {
            return Ok(slots.clone());
        }

        let mut days = self.days.write().await;
        let slots = days.entry(date.to_string()).or_insert_with(|| {
            debug!(date, "Materializing default slots");
            DaySlots::default_template()
        });
        Ok(slots.clone())
    }

    async fn set_slot(&self, date: &str, time: &str, available: bool) -> Result<DaySlots> {
        let mut days = self.days.write().await;
        let slots = days
            .entry(date.to_string())
            .or_insert_with(DaySlots::default_template);
        slots.set(time, available);
        debug!(date, time, available, "Updated day slot");
        Ok(slots.clone())
    }
}
