pub mod day_slots;
pub mod session;
pub mod slots;
