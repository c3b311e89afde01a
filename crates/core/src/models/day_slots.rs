//! # Day Slots
//!
//! A [`DaySlots`] record maps each time label of a calendar day to an
//! availability flag. Every record starts from the same template: 32 labels
//! at 15-minute steps from `10:00` through `17:45`, all available.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hour of the first slot of the day
pub const FIRST_SLOT_HOUR: u32 = 10;

/// Length of one slot in minutes
pub const SLOT_MINUTES: u32 = 15;

/// Number of slots in the default template
pub const SLOTS_PER_DAY: usize = 32;

/// Returns the canonical `HH:MM` labels in chronological order.
///
/// # Example
///
/// ```
/// use slotbook_core::models::day_slots::slot_labels;
///
/// let labels: Vec<String> = slot_labels().collect();
/// assert_eq!(labels.first().map(String::as_str), Some("10:00"));
/// assert_eq!(labels.last().map(String::as_str), Some("17:45"));
/// ```
pub fn slot_labels() -> impl Iterator<Item = String> {
    (0..SLOTS_PER_DAY as u32).map(|i| {
        let minutes = i * SLOT_MINUTES;
        let hour = FIRST_SLOT_HOUR + minutes / 60;
        let minute = minutes % 60;
        format!("{hour:02}:{minute:02}")
    })
}

/// Whether `label` is one of the 32 canonical slot labels.
pub fn is_canonical_label(label: &str) -> bool {
    slot_labels().any(|canonical| canonical == label)
}

/// Availability of every slot on one calendar day.
///
/// Serializes as a flat JSON object (`{"10:00": true, ...}`) with keys in
/// ascending label order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaySlots(BTreeMap<String, bool>);

impl DaySlots {
    /// The template a day starts from: every canonical label available.
    pub fn default_template() -> Self {
        Self(slot_labels().map(|label| (label, true)).collect())
    }

    /// Availability of `label`, or `None` if the day has no such entry.
    pub fn get(&self, label: &str) -> Option<bool> {
        self.0.get(label).copied()
    }

    /// Sets `label` to `available`, inserting the label if it is new.
    pub fn set(&mut self, label: impl Into<String>, available: bool) {
        self.0.insert(label.into(), available);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(label, available)| (label.as_str(), *available))
    }

    /// Labels currently marked unavailable, in label order.
    pub fn unavailable(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, available)| !available)
            .map(|(label, _)| label)
    }
}

impl Default for DaySlots {
    fn default() -> Self {
        Self::default_template()
    }
}

impl From<BTreeMap<String, bool>> for DaySlots {
    fn from(slots: BTreeMap<String, bool>) -> Self {
        Self(slots)
    }
}
