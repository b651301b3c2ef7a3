use hopespring_core::RecordId;
use serde::{Deserialize, Serialize};

/// The `(doctor, date, time)` tuple an availability answer is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Doctor being booked.
    pub doctor_id: RecordId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub time: String,
}

impl SlotKey {
    /// Creates a slot key.
    #[must_use]
    pub fn new(doctor_id: RecordId, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            doctor_id,
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Availability answer returned by the backend for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Doctor the answer is about.
    pub doctor_id: RecordId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub time: String,
    /// Whether the doctor can take the slot.
    pub is_available: bool,
}

impl AvailabilitySlot {
    /// Returns whether this answer is about the given slot.
    #[must_use]
    pub fn matches(&self, doctor_id: RecordId, date: &str, time: &str) -> bool {
        self.doctor_id == doctor_id && self.date == date && self.time == time
    }
}

/// Availability answers held by one open appointment form.
///
/// Each successful check replaces the whole list, matching the backend
/// response shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityLedger {
    slots: Vec<AvailabilitySlot>,
}

impl AvailabilityLedger {
    /// Replaces the stored answers with a fresh response.
    pub fn replace(&mut self, slots: Vec<AvailabilitySlot>) {
        self.slots = slots;
    }

    /// Returns the stored answers.
    #[must_use]
    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    /// Returns whether the slot is known to be bookable.
    ///
    /// The most recent matching answer wins. Without one the slot is not
    /// bookable.
    #[must_use]
    pub fn is_slot_bookable(&self, doctor_id: RecordId, date: &str, time: &str) -> bool {
        self.slots
            .iter()
            .rev()
            .find(|slot| slot.matches(doctor_id, date, time))
            .is_some_and(|slot| slot.is_available)
    }
}
