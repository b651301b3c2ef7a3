//! Ports for the hospital backend.

use async_trait::async_trait;
use hopespring_core::{AppResult, RecordId};
use hopespring_domain::{
    Appointment, AppointmentStatus, AppointmentSubmission, AvailabilitySlot, BillingRecord,
    BillingRecordInput, Doctor, DoctorInput, InventoryItem, InventoryItemInput, LabTest,
    LabTestInput, Patient, PatientInput, Prescription, PrescriptionInput,
};

/// Appointment book and doctor availability.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Lists all appointments.
    async fn list_appointments(&self) -> AppResult<Vec<Appointment>>;

    /// Finds one appointment.
    async fn find_appointment(&self, appointment_id: RecordId) -> AppResult<Option<Appointment>>;

    /// Books a new appointment.
    async fn create_appointment(
        &self,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment>;

    /// Rewrites an existing appointment.
    async fn update_appointment(
        &self,
        appointment_id: RecordId,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment>;

    /// Changes only the status of an appointment.
    async fn update_appointment_status(
        &self,
        appointment_id: RecordId,
        status: AppointmentStatus,
    ) -> AppResult<Appointment>;

    /// Deletes an appointment.
    async fn delete_appointment(&self, appointment_id: RecordId) -> AppResult<()>;

    /// Asks whether the doctor can take the slot.
    ///
    /// The backend answers with a list that is either empty or holds the
    /// queried slot.
    async fn check_availability(
        &self,
        doctor_id: RecordId,
        date: &str,
        time: &str,
    ) -> AppResult<Vec<AvailabilitySlot>>;
}

/// Access to the remaining hospital records.
///
/// Deleting a doctor only deactivates it; other deletes drop the record from
/// listings.
#[async_trait]
pub trait RecordDirectory: Send + Sync {
    /// Lists patients.
    async fn list_patients(&self) -> AppResult<Vec<Patient>>;

    /// Registers a patient.
    async fn create_patient(&self, input: &PatientInput) -> AppResult<Patient>;

    /// Replaces a patient's details.
    async fn update_patient(
        &self,
        patient_id: RecordId,
        input: &PatientInput,
    ) -> AppResult<Patient>;

    /// Removes a patient.
    async fn delete_patient(&self, patient_id: RecordId) -> AppResult<()>;

    /// Lists doctors as the backend exposes them.
    async fn list_doctors(&self) -> AppResult<Vec<Doctor>>;

    /// Adds a doctor.
    async fn create_doctor(&self, input: &DoctorInput) -> AppResult<Doctor>;

    /// Replaces a doctor's details.
    async fn update_doctor(&self, doctor_id: RecordId, input: &DoctorInput) -> AppResult<Doctor>;

    /// Takes a doctor off the schedule.
    async fn deactivate_doctor(&self, doctor_id: RecordId) -> AppResult<()>;

    /// Lists billing records.
    async fn list_billing_records(&self) -> AppResult<Vec<BillingRecord>>;

    /// Issues a bill.
    async fn create_billing_record(&self, input: &BillingRecordInput) -> AppResult<BillingRecord>;

    /// Replaces a bill.
    async fn update_billing_record(
        &self,
        billing_id: RecordId,
        input: &BillingRecordInput,
    ) -> AppResult<BillingRecord>;

    /// Voids a bill.
    async fn delete_billing_record(&self, billing_id: RecordId) -> AppResult<()>;

    /// Lists inventory items.
    async fn list_inventory(&self) -> AppResult<Vec<InventoryItem>>;

    /// Lists items at or below their reorder threshold.
    async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>>;

    /// Adds a stock line.
    async fn create_inventory_item(&self, input: &InventoryItemInput) -> AppResult<InventoryItem>;

    /// Replaces a stock line.
    async fn update_inventory_item(
        &self,
        item_id: RecordId,
        input: &InventoryItemInput,
    ) -> AppResult<InventoryItem>;

    /// Retires a stock line.
    async fn delete_inventory_item(&self, item_id: RecordId) -> AppResult<()>;

    /// Lists all prescriptions.
    async fn list_prescriptions(&self) -> AppResult<Vec<Prescription>>;

    /// Lists prescriptions of one patient.
    async fn list_patient_prescriptions(
        &self,
        patient_id: RecordId,
    ) -> AppResult<Vec<Prescription>>;

    /// Writes a prescription for an active patient and doctor.
    async fn create_prescription(&self, input: &PrescriptionInput) -> AppResult<Prescription>;

    /// Replaces diagnosis, notes and medications of a prescription.
    async fn update_prescription(
        &self,
        prescription_id: RecordId,
        input: &PrescriptionInput,
    ) -> AppResult<Prescription>;

    /// Withdraws a prescription.
    async fn delete_prescription(&self, prescription_id: RecordId) -> AppResult<()>;

    /// Lists laboratory tests.
    async fn list_lab_tests(&self) -> AppResult<Vec<LabTest>>;

    /// Orders a test for an active patient and doctor.
    async fn create_lab_test(&self, input: &LabTestInput) -> AppResult<LabTest>;

    /// Replaces a test order, typically to record results.
    async fn update_lab_test(
        &self,
        test_id: RecordId,
        input: &LabTestInput,
    ) -> AppResult<LabTest>;

    /// Cancels a test order.
    async fn delete_lab_test(&self, test_id: RecordId) -> AppResult<()>;
}
