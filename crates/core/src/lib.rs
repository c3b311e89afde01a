//! Domain types shared by the SlotBook crates: the per-day slot map, the
//! request and response shapes of the HTTP API, and the error taxonomy.

pub mod errors;
pub mod models;
