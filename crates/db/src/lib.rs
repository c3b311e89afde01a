//! # SlotBook Storage
//!
//! Persistence for [`DaySlots`](slotbook_core::models::day_slots::DaySlots)
//! records. The [`store::SlotStore`] trait is the only surface the API layer
//! sees; [`memory::MemorySlotStore`] and [`store::PgSlotStore`] implement it.

pub mod memory;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

use eyre::{Result, WrapErr};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .wrap_err("Failed to connect to database")?;

    Ok(pool)
}
