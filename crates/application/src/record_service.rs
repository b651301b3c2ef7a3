use std::sync::Arc;

use chrono::NaiveDate;
use hopespring_core::{AppError, AppResult, RecordId};
use hopespring_domain::{
    Appointment, AppointmentStatus, BillingRecord, BillingRecordInput, DashboardStats, Doctor,
    DoctorInput, DoctorOverview, InventoryItem, InventoryItemInput, LabTest, LabTestInput,
    ManagerOverview, Patient, PatientInput, PatientOverview, Prescription, PrescriptionInput,
};

use crate::{AppointmentRepository, RecordDirectory};

/// Application service for record bookkeeping and dashboard figures.
///
/// Inputs are validated here before they reach the backend.
#[derive(Clone)]
pub struct RecordService {
    records: Arc<dyn RecordDirectory>,
    appointments: Arc<dyn AppointmentRepository>,
}

impl RecordService {
    /// Creates a new record service.
    #[must_use]
    pub fn new(
        records: Arc<dyn RecordDirectory>,
        appointments: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self {
            records,
            appointments,
        }
    }

    /// Lists patients.
    pub async fn list_patients(&self) -> AppResult<Vec<Patient>> {
        self.records.list_patients().await
    }

    /// Validates and registers a patient.
    pub async fn register_patient(&self, input: PatientInput) -> AppResult<Patient> {
        input.validate()?;
        self.records.create_patient(&input).await
    }

    /// Validates and replaces a patient's details.
    pub async fn update_patient(
        &self,
        patient_id: RecordId,
        input: PatientInput,
    ) -> AppResult<Patient> {
        input.validate()?;
        self.records.update_patient(patient_id, &input).await
    }

    /// Removes a patient.
    pub async fn delete_patient(&self, patient_id: RecordId) -> AppResult<()> {
        self.records.delete_patient(patient_id).await
    }

    /// Lists doctors. With `active_only` inactive doctors are left out, as
    /// the appointment picker needs.
    pub async fn list_doctors(&self, active_only: bool) -> AppResult<Vec<Doctor>> {
        let doctors = self.records.list_doctors().await?;
        Ok(doctors
            .into_iter()
            .filter(|doctor| !active_only || doctor.is_active)
            .collect())
    }

    /// Validates and adds a doctor.
    pub async fn add_doctor(&self, input: DoctorInput) -> AppResult<Doctor> {
        input.validate()?;
        self.records.create_doctor(&input).await
    }

    /// Validates and replaces a doctor's details.
    pub async fn update_doctor(&self, doctor_id: RecordId, input: DoctorInput) -> AppResult<Doctor> {
        input.validate()?;
        self.records.update_doctor(doctor_id, &input).await
    }

    /// Deactivates a doctor. Past appointments keep referring to it.
    pub async fn deactivate_doctor(&self, doctor_id: RecordId) -> AppResult<()> {
        self.records.deactivate_doctor(doctor_id).await
    }

    /// Lists appointments.
    pub async fn list_appointments(&self) -> AppResult<Vec<Appointment>> {
        self.appointments.list_appointments().await
    }

    /// Changes the status of an appointment.
    pub async fn change_appointment_status(
        &self,
        appointment_id: RecordId,
        status: AppointmentStatus,
    ) -> AppResult<Appointment> {
        self.appointments
            .update_appointment_status(appointment_id, status)
            .await
    }

    /// Deletes an appointment.
    pub async fn delete_appointment(&self, appointment_id: RecordId) -> AppResult<()> {
        self.appointments.delete_appointment(appointment_id).await
    }

    /// Lists billing records.
    pub async fn list_billing_records(&self) -> AppResult<Vec<BillingRecord>> {
        self.records.list_billing_records().await
    }

    /// Validates and issues a bill.
    pub async fn create_billing_record(&self, input: BillingRecordInput) -> AppResult<BillingRecord> {
        input.validate()?;
        self.records.create_billing_record(&input).await
    }

    /// Validates and replaces a bill.
    pub async fn update_billing_record(
        &self,
        billing_id: RecordId,
        input: BillingRecordInput,
    ) -> AppResult<BillingRecord> {
        input.validate()?;
        self.records.update_billing_record(billing_id, &input).await
    }

    /// Voids a bill.
    pub async fn delete_billing_record(&self, billing_id: RecordId) -> AppResult<()> {
        self.records.delete_billing_record(billing_id).await
    }

    /// Lists inventory items.
    pub async fn list_inventory(&self) -> AppResult<Vec<InventoryItem>> {
        self.records.list_inventory().await
    }

    /// Lists items at or below their reorder threshold.
    pub async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        self.records.list_low_stock().await
    }

    /// Validates and adds a stock line.
    pub async fn create_inventory_item(
        &self,
        input: InventoryItemInput,
    ) -> AppResult<InventoryItem> {
        input.validate()?;
        self.records.create_inventory_item(&input).await
    }

    /// Validates and replaces a stock line.
    pub async fn update_inventory_item(
        &self,
        item_id: RecordId,
        input: InventoryItemInput,
    ) -> AppResult<InventoryItem> {
        input.validate()?;
        self.records.update_inventory_item(item_id, &input).await
    }

    /// Retires a stock line.
    pub async fn delete_inventory_item(&self, item_id: RecordId) -> AppResult<()> {
        self.records.delete_inventory_item(item_id).await
    }

    /// Lists prescriptions, optionally only those of one patient.
    pub async fn list_prescriptions(
        &self,
        patient_id: Option<RecordId>,
    ) -> AppResult<Vec<Prescription>> {
        match patient_id {
            Some(patient_id) => self.records.list_patient_prescriptions(patient_id).await,
            None => self.records.list_prescriptions().await,
        }
    }

    /// Validates and writes a prescription.
    pub async fn create_prescription(&self, input: PrescriptionInput) -> AppResult<Prescription> {
        input.validate()?;
        self.records.create_prescription(&input).await
    }

    /// Validates and replaces a prescription.
    pub async fn update_prescription(
        &self,
        prescription_id: RecordId,
        input: PrescriptionInput,
    ) -> AppResult<Prescription> {
        input.validate()?;
        self.records
            .update_prescription(prescription_id, &input)
            .await
    }

    /// Withdraws a prescription.
    pub async fn delete_prescription(&self, prescription_id: RecordId) -> AppResult<()> {
        self.records.delete_prescription(prescription_id).await
    }

    /// Lists laboratory tests.
    pub async fn list_lab_tests(&self) -> AppResult<Vec<LabTest>> {
        self.records.list_lab_tests().await
    }

    /// Validates and orders a lab test.
    pub async fn create_lab_test(&self, input: LabTestInput) -> AppResult<LabTest> {
        input.validate()?;
        self.records.create_lab_test(&input).await
    }

    /// Validates and replaces a lab test order.
    pub async fn update_lab_test(
        &self,
        test_id: RecordId,
        input: LabTestInput,
    ) -> AppResult<LabTest> {
        input.validate()?;
        self.records.update_lab_test(test_id, &input).await
    }

    /// Cancels a lab test order.
    pub async fn delete_lab_test(&self, test_id: RecordId) -> AppResult<()> {
        self.records.delete_lab_test(test_id).await
    }

    /// Computes the admin dashboard figures for the month containing `today`.
    pub async fn dashboard_stats(&self, today: NaiveDate) -> AppResult<DashboardStats> {
        let patients = self.records.list_patients().await?;
        let doctors = self.records.list_doctors().await?;
        let appointments = self.appointments.list_appointments().await?;
        let billing_records = self.records.list_billing_records().await?;

        Ok(DashboardStats::compute(
            &patients,
            &doctors,
            &appointments,
            &billing_records,
            today,
        ))
    }

    /// Collects one patient's appointments, prescriptions, lab tests and bills.
    pub async fn patient_overview(
        &self,
        patient_id: RecordId,
        today: NaiveDate,
    ) -> AppResult<PatientOverview> {
        let prescriptions = self.records.list_patient_prescriptions(patient_id).await?;
        let appointments = self.appointments.list_appointments().await?;
        let lab_tests = self.records.list_lab_tests().await?;
        let billing_records = self.records.list_billing_records().await?;

        Ok(PatientOverview::build(
            patient_id,
            today,
            appointments,
            prescriptions,
            lab_tests,
            billing_records,
        ))
    }

    /// Collects one doctor's upcoming schedule and open lab orders.
    pub async fn doctor_overview(
        &self,
        doctor_id: RecordId,
        today: NaiveDate,
    ) -> AppResult<DoctorOverview> {
        let doctors = self.records.list_doctors().await?;
        if !doctors.iter().any(|doctor| doctor.id == doctor_id) {
            return Err(AppError::NotFound(format!(
                "doctor '{doctor_id}' does not exist"
            )));
        }

        let appointments = self.appointments.list_appointments().await?;
        let lab_tests = self.records.list_lab_tests().await?;
        Ok(DoctorOverview::build(doctor_id, today, appointments, lab_tests))
    }

    /// Summarises stock and receivables.
    pub async fn manager_overview(&self) -> AppResult<ManagerOverview> {
        let billing_records = self.records.list_billing_records().await?;
        let inventory = self.records.list_inventory().await?;
        Ok(ManagerOverview::build(billing_records, inventory))
    }
}
