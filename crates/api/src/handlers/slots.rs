//! # Slot Handlers
//!
//! Read and write access to per-day slot availability. Both endpoints
//! create the requested day from the default template if it has never been
//! seen; that is how days come into existence.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use slotbook_core::{
    errors::SlotError,
    models::{
        day_slots::{is_canonical_label, DaySlots},
        slots::{SetSlotRequest, SetSlotResponse, SlotsQuery},
    },
};
use std::sync::Arc;
use tracing::info;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

/// Returns the slots of one day
///
/// # Endpoint
///
/// ```text
/// GET /api/slots?date=2025-03-10
/// ```
///
/// # Errors
///
/// * `SlotError::Validation` - `date` is missing or empty
/// * `SlotError::Storage` - The store could not be read
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<SlotsQuery>, QueryRejection>,
) -> Result<Json<DaySlots>, AppError> {
    let Query(query) = query.map_err(|rejection| SlotError::Validation(rejection.body_text()))?;
    let date = query.date()?;

    let slots = state.store.get_or_create(date).await?;

    Ok(Json(slots))
}

/// Sets the availability of one slot
///
/// # Endpoint
///
/// ```text
/// POST /api/slots
/// { "date": "2025-03-10", "time": "11:30", "available": false }
/// ```
///
/// Requires an admin session when admin authentication is configured.
///
/// # Errors
///
/// * `SlotError::Authentication` - Missing or invalid session token
/// * `SlotError::Validation` - Malformed body, empty `date`/`time`, a
///   non-boolean `available`, or a non-canonical label in strict mode
/// * `SlotError::Storage` - The store could not be written
#[axum::debug_handler]
pub async fn set_slot(
    State(state): State<Arc<ApiState>>,
    session: AdminSession,
    payload: Result<Json<SetSlotRequest>, JsonRejection>,
) -> Result<Json<SetSlotResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| SlotError::Validation(rejection.body_text()))?;
    let update = payload.validate()?;

    if state.strict_labels && !is_canonical_label(&update.time) {
        return Err(AppError(SlotError::Validation(format!(
            "{} is not a bookable time slot",
            update.time
        ))));
    }

    let slots = state
        .store
        .set_slot(&update.date, &update.time, update.available)
        .await?;

    info!(
        date = %update.date,
        time = %update.time,
        available = update.available,
        admin = session.username().unwrap_or("-"),
        "Slot updated"
    );

    Ok(Json(SetSlotResponse {
        success: true,
        slots,
    }))
}
