use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotbook_core::models::day_slots::DaySlots;
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDaySlots {
    pub date: String,
    pub slots: Json<DaySlots>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
