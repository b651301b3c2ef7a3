use hopespring_core::{AppError, RecordId};
use hopespring_domain::{
    BillingRecordInput, DoctorInput, InventoryItemInput, LabTestInput, MedicationInput,
    PrescriptionInput,
};
use serde::Deserialize;
use ts_rs::TS;

/// Incoming payload for adding or updating a doctor.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/doctor-request.ts"
)]
pub struct DoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Incoming payload for a stock line.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/inventory-item-request.ts"
)]
pub struct InventoryItemRequest {
    pub name: String,
    pub category: String,
    #[ts(type = "number")]
    pub quantity: i64,
    pub unit: String,
    pub price_per_unit: f64,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    #[ts(type = "number")]
    pub minimum_stock: i64,
}

/// Incoming payload for a bill.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/billing-record-request.ts"
)]
pub struct BillingRecordRequest {
    #[ts(type = "number")]
    pub patient_id: i64,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub appointment_id: Option<i64>,
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default = "default_pending")]
    pub payment_status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub insurance_provider: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Incoming payload for a lab test order.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/lab-test-request.ts"
)]
pub struct LabTestRequest {
    #[ts(type = "number")]
    pub patient_id: i64,
    #[ts(type = "number")]
    pub doctor_id: i64,
    pub test_name: String,
    pub test_type: String,
    pub test_date: String,
    #[serde(default)]
    pub results: Option<String>,
    #[serde(default = "default_pending")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One medication line of a prescription payload.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/medication-request.ts"
)]
pub struct MedicationRequest {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Incoming payload for a prescription.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/prescription-request.ts"
)]
pub struct PrescriptionRequest {
    #[ts(type = "number")]
    pub patient_id: i64,
    #[ts(type = "number")]
    pub doctor_id: i64,
    pub diagnosis: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub medications: Vec<MedicationRequest>,
}

fn default_active() -> bool {
    true
}

fn default_pending() -> String {
    "pending".to_owned()
}

impl From<DoctorRequest> for DoctorInput {
    fn from(request: DoctorRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            specialization: request.specialization,
            phone: request.phone,
            email: request.email,
            is_active: request.is_active,
        }
    }
}

impl From<InventoryItemRequest> for InventoryItemInput {
    fn from(request: InventoryItemRequest) -> Self {
        Self {
            name: request.name,
            category: request.category,
            quantity: request.quantity,
            unit: request.unit,
            price_per_unit: request.price_per_unit,
            supplier: request.supplier,
            expiry_date: request.expiry_date,
            minimum_stock: request.minimum_stock,
        }
    }
}

impl TryFrom<BillingRecordRequest> for BillingRecordInput {
    type Error = AppError;

    fn try_from(request: BillingRecordRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            patient_id: RecordId::new(request.patient_id)?,
            appointment_id: request.appointment_id.map(RecordId::new).transpose()?,
            total_amount: request.total_amount,
            paid_amount: request.paid_amount,
            payment_status: request.payment_status,
            payment_method: request.payment_method,
            insurance_provider: request.insurance_provider,
            notes: request.notes,
        })
    }
}

impl TryFrom<LabTestRequest> for LabTestInput {
    type Error = AppError;

    fn try_from(request: LabTestRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            patient_id: RecordId::new(request.patient_id)?,
            doctor_id: RecordId::new(request.doctor_id)?,
            test_name: request.test_name,
            test_type: request.test_type,
            test_date: request.test_date,
            results: request.results,
            status: request.status,
            notes: request.notes,
        })
    }
}

impl From<MedicationRequest> for MedicationInput {
    fn from(request: MedicationRequest) -> Self {
        Self {
            name: request.name,
            dosage: request.dosage,
            frequency: request.frequency,
            duration: request.duration,
            instructions: request.instructions,
        }
    }
}

impl TryFrom<PrescriptionRequest> for PrescriptionInput {
    type Error = AppError;

    fn try_from(request: PrescriptionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            patient_id: RecordId::new(request.patient_id)?,
            doctor_id: RecordId::new(request.doctor_id)?,
            diagnosis: request.diagnosis,
            notes: request.notes,
            medications: request.medications.into_iter().map(Into::into).collect(),
        })
    }
}
