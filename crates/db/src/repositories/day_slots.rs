use crate::models::DbDaySlots;
use eyre::Result;
use slotbook_core::models::day_slots::DaySlots;
use sqlx::{Pool, Postgres, types::Json};

pub async fn get_or_create_day_slots(pool: &Pool<Postgres>, date: &str) -> Result<DbDaySlots> {
    // Separate statements: the SELECT must see a row inserted concurrently
    // by another caller that won the ON CONFLICT race.
    sqlx::query(
        r#"
        INSERT INTO day_slots (date, slots)
        VALUES ($1, $2)
        ON CONFLICT (date) DO NOTHING
        "#,
    )
    .bind(date)
    .bind(Json(DaySlots::default_template()))
    .execute(pool)
    .await?;

    let day_slots = sqlx::query_as::<_, DbDaySlots>(
        r#"
        SELECT date, slots, created_at, updated_at
        FROM day_slots
        WHERE date = $1
        "#,
    )
    .bind(date)
    .fetch_one(pool)
    .await?;

    Ok(day_slots)
}

/// Sets one label of `date`, creating the day from the template if needed.
///
/// The label is merged into the stored document in a single statement, so
/// concurrent writers of different labels never overwrite each other.
pub async fn set_day_slot(
    pool: &Pool<Postgres>,
    date: &str,
    time: &str,
    available: bool,
) -> Result<DbDaySlots> {
    let day_slots = sqlx::query_as::<_, DbDaySlots>(
        r#"
        INSERT INTO day_slots (date, slots)
        VALUES ($1, $2::jsonb || jsonb_build_object($3::text, $4::boolean))
        ON CONFLICT (date) DO UPDATE
        SET slots = day_slots.slots || jsonb_build_object($3::text, $4::boolean),
            updated_at = NOW()
        RETURNING date, slots, created_at, updated_at
        "#,
    )
    .bind(date)
    .bind(Json(DaySlots::default_template()))
    .bind(time)
    .bind(available)
    .fetch_one(pool)
    .await?;

    Ok(day_slots)
}
