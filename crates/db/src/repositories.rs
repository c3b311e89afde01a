pub mod day_slots;
