use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/slots",
        get(handlers::slots::get_slots).post(handlers::slots::set_slot),
    )
}
