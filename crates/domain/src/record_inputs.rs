//! Create and update payloads for hospital records.
//!
//! Each input validates itself before it reaches the backend, with the same
//! `Missing required field: <name>` wording the backend uses.

use hopespring_core::{AppError, AppResult, NonEmptyString, RecordId};
use serde::{Deserialize, Serialize};

use crate::records::active;
use crate::validation::{parse_date, validate_email, validate_phone};

/// Payment states a billing record can be in.
pub const PAYMENT_STATUSES: [&str; 3] = ["pending", "partial", "paid"];

fn require(field: &str, value: &str) -> AppResult<()> {
    NonEmptyString::new(value)
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("Missing required field: {field}")))
}

fn require_all<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> AppResult<()> {
    fields
        .into_iter()
        .try_for_each(|(field, value)| require(field, value))
}

/// Accepts either a bare date or a timestamp starting with one.
fn validate_date_prefix(value: &str) -> AppResult<()> {
    let date = value.split_once('T').map_or(value, |(date, _)| date);
    parse_date(date).map(|_| ())
}

fn pending() -> String {
    "pending".to_owned()
}

/// Patient registration and update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInput {
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
}

impl PatientInput {
    /// Validates required fields and contact formats.
    ///
    /// Phone and email are optional but must be well formed when present.
    pub fn validate(&self) -> AppResult<()> {
        require_all([
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("date_of_birth", self.date_of_birth.as_str()),
            ("gender", self.gender.as_str()),
        ])?;

        if !self.email.is_empty() {
            validate_email(&self.email)?;
        }
        if !self.phone.is_empty() {
            validate_phone(&self.phone)?;
        }
        parse_date(&self.date_of_birth)?;

        Ok(())
    }
}

/// Doctor onboarding and update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorInput {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Medical specialization.
    pub specialization: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Whether the doctor takes appointments.
    #[serde(default = "active")]
    pub is_active: bool,
}

impl DoctorInput {
    /// Validates required fields and contact formats.
    pub fn validate(&self) -> AppResult<()> {
        require_all([
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("specialization", self.specialization.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
        ])?;
        validate_phone(&self.phone)?;
        validate_email(&self.email)
    }
}

/// Stock line payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemInput {
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
    /// Expiry date or timestamp.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Reorder threshold.
    #[serde(default)]
    pub minimum_stock: i64,
}

impl InventoryItemInput {
    /// Validates required fields, quantities and the expiry date.
    pub fn validate(&self) -> AppResult<()> {
        require_all([
            ("name", self.name.as_str()),
            ("category", self.category.as_str()),
            ("unit", self.unit.as_str()),
        ])?;

        if self.quantity < 0 || self.minimum_stock < 0 {
            return Err(AppError::Validation(
                "Quantities must not be negative".to_owned(),
            ));
        }
        if !self.price_per_unit.is_finite() || self.price_per_unit <= 0.0 {
            return Err(AppError::Validation(
                "Price per unit must be greater than zero".to_owned(),
            ));
        }
        if let Some(expiry_date) = self.expiry_date.as_deref() {
            validate_date_prefix(expiry_date)?;
        }

        Ok(())
    }
}

/// Invoice payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecordInput {
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
    /// One of [`PAYMENT_STATUSES`].
    #[serde(default = "pending")]
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
}

impl BillingRecordInput {
    /// Validates amounts and the payment state.
    pub fn validate(&self) -> AppResult<()> {
        if !self.total_amount.is_finite() || self.total_amount <= 0.0 {
            return Err(AppError::Validation(
                "Total amount must be greater than zero".to_owned(),
            ));
        }
        if !self.paid_amount.is_finite() || self.paid_amount < 0.0 {
            return Err(AppError::Validation(
                "Paid amount must not be negative".to_owned(),
            ));
        }
        if !PAYMENT_STATUSES.contains(&self.payment_status.as_str()) {
            return Err(AppError::Validation(format!(
                "Invalid payment status '{}'",
                self.payment_status
            )));
        }

        Ok(())
    }
}

/// Laboratory test order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabTestInput {
    /// Tested patient.
    pub patient_id: RecordId,
    /// Ordering doctor.
    pub doctor_id: RecordId,
    /// Test name.
    pub test_name: String,
    /// Test category.
    pub test_type: String,
    /// Scheduled date, `YYYY-MM-DD`.
    pub test_date: String,
    /// Result text.
    #[serde(default)]
    pub results: Option<String>,
    /// Defaults to `pending`.
    #[serde(default = "pending")]
    pub status: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl LabTestInput {
    /// Validates required fields and the test date.
    pub fn validate(&self) -> AppResult<()> {
        require_all([
            ("test_name", self.test_name.as_str()),
            ("test_type", self.test_type.as_str()),
            ("test_date", self.test_date.as_str()),
            ("status", self.status.as_str()),
        ])?;
        parse_date(&self.test_date).map(|_| ())
    }
}

/// Medication line of a prescription payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationInput {
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

/// Prescription payload. Updates replace the medication list wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionInput {
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
    pub medications: Vec<MedicationInput>,
}

impl PrescriptionInput {
    /// Validates the diagnosis and every medication line.
    pub fn validate(&self) -> AppResult<()> {
        require("diagnosis", &self.diagnosis)?;

        for (index, medication) in self.medications.iter().enumerate() {
            for (field, value) in [
                ("name", medication.name.as_str()),
                ("dosage", medication.dosage.as_str()),
                ("frequency", medication.frequency.as_str()),
            ] {
                require(&format!("medications[{index}].{field}"), value)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
