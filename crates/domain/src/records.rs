//! Hospital records exchanged with the backend.
//!
//! Field names follow the backend's snake_case JSON. Optional backend columns
//! default to `None` when absent.

use hopespring_core::RecordId;
use serde::{Deserialize, Serialize};

/// Registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Backend key.
    pub id: RecordId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Birth date, `YYYY-MM-DD`.
    pub date_of_birth: String,
    /// Gender as recorded.
    pub gender: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Soft-delete flag.
    #[serde(default = "active")]
    pub is_active: bool,
}

impl Patient {
    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Doctor on staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Backend key.
    pub id: RecordId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Medical specialization.
    pub specialization: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Whether the doctor takes appointments.
    #[serde(default = "active")]
    pub is_active: bool,
}

/// Invoice issued to a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Backend key.
    pub id: RecordId,
    /// Billed patient.
    pub patient_id: RecordId,
    /// Appointment the bill belongs to, if any.
    #[serde(default)]
    pub appointment_id: Option<RecordId>,
    /// Amount due.
    pub total_amount: f64,
    /// Amount settled so far.
    #[serde(default)]
    pub paid_amount: f64,
    /// `pending`, `partial` or `paid`.
    #[serde(default)]
    pub payment_status: String,
    /// Cash, card, insurance and so on.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Insurer, when paid by insurance.
    #[serde(default)]
    pub insurance_provider: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Creation timestamp, RFC 3339.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl BillingRecord {
    /// Returns the unpaid remainder, never negative.
    #[must_use]
    pub fn outstanding(&self) -> f64 {
        (self.total_amount - self.paid_amount).max(0.0)
    }
}

/// Stock line in the pharmacy or stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Backend key.
    pub id: RecordId,
    /// Item name.
    pub name: String,
    /// Medicine, equipment or supplies.
    pub category: String,
    /// Units on hand.
    pub quantity: i64,
    /// Unit of measure.
    pub unit: String,
    /// Purchase price per unit.
    pub price_per_unit: f64,
    /// Supplier name.
    #[serde(default)]
    pub supplier: Option<String>,
    /// Expiry timestamp.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Reorder threshold.
    #[serde(default)]
    pub minimum_stock: i64,
}

impl InventoryItem {
    /// Returns whether stock is at or below the reorder threshold.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum_stock
    }
}

/// Medication line of a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Backend key.
    pub id: RecordId,
    /// Drug name.
    pub name: String,
    /// Dose per intake.
    pub dosage: String,
    /// Intake frequency.
    pub frequency: String,
    /// Course duration.
    #[serde(default)]
    pub duration: Option<String>,
    /// Extra instructions.
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Prescription written by a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    /// Backend key.
    pub id: RecordId,
    /// Treated patient.
    pub patient_id: RecordId,
    /// Prescribing doctor.
    pub doctor_id: RecordId,
    /// Diagnosis text.
    pub diagnosis: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Prescribed medications.
    #[serde(default)]
    pub medications: Vec<Medication>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Laboratory test order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabTest {
    /// Backend key.
    pub id: RecordId,
    /// Tested patient.
    pub patient_id: RecordId,
    /// Ordering doctor.
    pub doctor_id: RecordId,
    /// Test name.
    pub test_name: String,
    /// Test category.
    pub test_type: String,
    /// Scheduled or performed date.
    #[serde(default)]
    pub test_date: Option<String>,
    /// Result text.
    #[serde(default)]
    pub results: Option<String>,
    /// `pending`, `completed` and so on.
    pub status: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

pub(crate) fn active() -> bool {
    true
}
