use hopespring_domain::{
    Appointment, BillingRecord, Doctor, InventoryItem, LabTest, Medication, Patient, PatientInput,
    Prescription,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a patient.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/patient-response.ts"
)]
pub struct PatientResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Incoming payload for patient registration and updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/patient-request.ts"
)]
pub struct PatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// API representation of a doctor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/doctor-response.ts"
)]
pub struct DoctorResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    pub is_active: bool,
}

/// Doctor listing filter.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/doctor-list-query.ts"
)]
pub struct DoctorListQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// API representation of an appointment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/appointment-response.ts"
)]
pub struct AppointmentResponse {
    #[ts(type = "number")]
    pub id: i64,
    #[ts(type = "number")]
    pub patient_id: i64,
    pub patient_name: String,
    #[ts(type = "number")]
    pub doctor_id: i64,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub notes: Option<String>,
}

/// Incoming payload for an appointment status change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/appointment-status-request.ts"
)]
pub struct AppointmentStatusRequest {
    pub status: String,
}

/// API representation of a billing record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/billing-record-response.ts"
)]
pub struct BillingRecordResponse {
    #[ts(type = "number")]
    pub id: i64,
    #[ts(type = "number")]
    pub patient_id: i64,
    #[ts(type = "number | null")]
    pub appointment_id: Option<i64>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub outstanding_amount: f64,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub insurance_provider: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// API representation of an inventory item.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/inventory-item-response.ts"
)]
pub struct InventoryItemResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub category: String,
    #[ts(type = "number")]
    pub quantity: i64,
    pub unit: String,
    pub price_per_unit: f64,
    pub supplier: Option<String>,
    pub expiry_date: Option<String>,
    #[ts(type = "number")]
    pub minimum_stock: i64,
    pub is_low_stock: bool,
}

/// API representation of a prescribed medication.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/medication-response.ts"
)]
pub struct MedicationResponse {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: Option<String>,
    pub instructions: Option<String>,
}

/// API representation of a prescription.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/prescription-response.ts"
)]
pub struct PrescriptionResponse {
    #[ts(type = "number")]
    pub id: i64,
    #[ts(type = "number")]
    pub patient_id: i64,
    #[ts(type = "number")]
    pub doctor_id: i64,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub medications: Vec<MedicationResponse>,
    pub created_at: Option<String>,
}

/// API representation of a laboratory test.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/lab-test-response.ts"
)]
pub struct LabTestResponse {
    #[ts(type = "number")]
    pub id: i64,
    #[ts(type = "number")]
    pub patient_id: i64,
    #[ts(type = "number")]
    pub doctor_id: i64,
    pub test_name: String,
    pub test_type: String,
    pub test_date: Option<String>,
    pub results: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.get(),
            full_name: patient.full_name(),
            first_name: patient.first_name,
            last_name: patient.last_name,
            date_of_birth: patient.date_of_birth,
            gender: patient.gender,
            address: patient.address,
            phone: patient.phone,
            email: patient.email,
        }
    }
}

impl From<PatientRequest> for PatientInput {
    fn from(request: PatientRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            gender: request.gender,
            address: request.address,
            phone: request.phone,
            email: request.email,
        }
    }
}

impl From<Doctor> for DoctorResponse {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id.get(),
            first_name: doctor.first_name,
            last_name: doctor.last_name,
            specialization: doctor.specialization,
            phone: doctor.phone,
            email: doctor.email,
            is_active: doctor.is_active,
        }
    }
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id.get(),
            patient_id: appointment.patient_id.get(),
            patient_name: appointment.patient_name,
            doctor_id: appointment.doctor_id.get(),
            doctor_name: appointment.doctor_name,
            date: appointment.date,
            time: appointment.time,
            status: appointment.status.as_str().to_owned(),
            notes: appointment.notes,
        }
    }
}

impl From<BillingRecord> for BillingRecordResponse {
    fn from(record: BillingRecord) -> Self {
        Self {
            id: record.id.get(),
            outstanding_amount: record.outstanding(),
            patient_id: record.patient_id.get(),
            appointment_id: record.appointment_id.map(|id| id.get()),
            total_amount: record.total_amount,
            paid_amount: record.paid_amount,
            payment_status: record.payment_status,
            payment_method: record.payment_method,
            insurance_provider: record.insurance_provider,
            notes: record.notes,
            created_at: record.created_at,
        }
    }
}

impl From<InventoryItem> for InventoryItemResponse {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id.get(),
            is_low_stock: item.is_low_stock(),
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            unit: item.unit,
            price_per_unit: item.price_per_unit,
            supplier: item.supplier,
            expiry_date: item.expiry_date,
            minimum_stock: item.minimum_stock,
        }
    }
}

impl From<Medication> for MedicationResponse {
    fn from(medication: Medication) -> Self {
        Self {
            name: medication.name,
            dosage: medication.dosage,
            frequency: medication.frequency,
            duration: medication.duration,
            instructions: medication.instructions,
        }
    }
}

impl From<Prescription> for PrescriptionResponse {
    fn from(prescription: Prescription) -> Self {
        Self {
            id: prescription.id.get(),
            patient_id: prescription.patient_id.get(),
            doctor_id: prescription.doctor_id.get(),
            diagnosis: prescription.diagnosis,
            notes: prescription.notes,
            medications: prescription.medications.into_iter().map(Into::into).collect(),
            created_at: prescription.created_at,
        }
    }
}

impl From<LabTest> for LabTestResponse {
    fn from(test: LabTest) -> Self {
        Self {
            id: test.id.get(),
            patient_id: test.patient_id.get(),
            doctor_id: test.doctor_id.get(),
            test_name: test.test_name,
            test_type: test.test_type,
            test_date: test.test_date,
            results: test.results,
            status: test.status,
            notes: test.notes,
        }
    }
}
