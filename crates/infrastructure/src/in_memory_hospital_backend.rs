use std::collections::BTreeMap;

use async_trait::async_trait;
use hopespring_application::{AppointmentRepository, RecordDirectory};
use hopespring_core::{AppError, AppResult, RecordId};
use hopespring_domain::{
    Appointment, AppointmentStatus, AppointmentSubmission, AvailabilitySlot, BillingRecord,
    BillingRecordInput, Doctor, DoctorInput, InventoryItem, InventoryItemInput, LabTest,
    LabTestInput, Medication, MedicationInput, Patient, PatientInput, Prescription,
    PrescriptionInput,
};
use tokio::sync::RwLock;

mod sample_data;

/// In-memory hospital backend for local runs and tests.
///
/// Mirrors the REST backend's rules: only active doctors are listed or
/// bookable, and a slot is taken while a scheduled appointment holds it.
/// Deleting a doctor deactivates it; other deletes remove the record.
#[derive(Debug, Default)]
pub struct InMemoryHospitalBackend {
    state: RwLock<HospitalState>,
}

#[derive(Debug, Default)]
struct HospitalState {
    next_id: i64,
    patients: BTreeMap<RecordId, Patient>,
    doctors: BTreeMap<RecordId, Doctor>,
    appointments: BTreeMap<RecordId, Appointment>,
    billing_records: BTreeMap<RecordId, BillingRecord>,
    inventory: BTreeMap<RecordId, InventoryItem>,
    prescriptions: BTreeMap<RecordId, Prescription>,
    lab_tests: BTreeMap<RecordId, LabTest>,
}

fn missing(kind: &str, id: RecordId) -> AppError {
    AppError::NotFound(format!("{kind} '{id}' does not exist"))
}

impl HospitalState {
    fn allocate_id(&mut self) -> AppResult<RecordId> {
        self.next_id = self.next_id.saturating_add(1);
        RecordId::new(self.next_id)
    }

    fn active_doctor(&self, doctor_id: RecordId) -> Option<&Doctor> {
        self.doctors
            .get(&doctor_id)
            .filter(|doctor| doctor.is_active)
    }

    /// Prescriptions and lab orders need an active patient and doctor.
    fn require_active_parties(&self, patient_id: RecordId, doctor_id: RecordId) -> AppResult<()> {
        if !self
            .patients
            .get(&patient_id)
            .is_some_and(|patient| patient.is_active)
        {
            return Err(AppError::Validation(format!(
                "patient '{patient_id}' does not exist or is inactive"
            )));
        }
        if self.active_doctor(doctor_id).is_none() {
            return Err(AppError::Validation(format!(
                "doctor '{doctor_id}' does not exist or is inactive"
            )));
        }

        Ok(())
    }

    fn ensure_unique_email(&self, email: &str, except: Option<RecordId>) -> AppResult<()> {
        let taken = !email.is_empty()
            && self
                .patients
                .values()
                .any(|patient| patient.email == email && Some(patient.id) != except);
        if taken {
            return Err(AppError::Conflict(format!(
                "a patient with email '{email}' already exists"
            )));
        }

        Ok(())
    }

    fn medications_from(&mut self, inputs: &[MedicationInput]) -> AppResult<Vec<Medication>> {
        inputs
            .iter()
            .map(|input| {
                Ok(Medication {
                    id: self.allocate_id()?,
                    name: input.name.clone(),
                    dosage: input.dosage.clone(),
                    frequency: input.frequency.clone(),
                    duration: input.duration.clone(),
                    instructions: input.instructions.clone(),
                })
            })
            .collect()
    }

    fn appointment_from(
        &self,
        appointment_id: RecordId,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment> {
        let patient = self.patients.get(&submission.patient_id).ok_or_else(|| {
            AppError::Validation(format!(
                "patient '{}' does not exist",
                submission.patient_id
            ))
        })?;
        let doctor = self.active_doctor(submission.doctor_id).ok_or_else(|| {
            AppError::Validation(format!(
                "doctor '{}' does not exist or is inactive",
                submission.doctor_id
            ))
        })?;

        Ok(Appointment {
            id: appointment_id,
            patient_id: patient.id,
            patient_name: patient.full_name(),
            doctor_id: doctor.id,
            doctor_name: format!("Dr. {} {}", doctor.first_name, doctor.last_name),
            date: submission.date.clone(),
            time: submission.time.clone(),
            status: submission.status,
            notes: Some(submission.notes.clone()).filter(|notes| !notes.is_empty()),
            created_at: None,
            updated_at: None,
        })
    }
}

impl InMemoryHospitalBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend seeded with a small demo hospital.
    pub fn with_sample_data() -> AppResult<Self> {
        let mut state = HospitalState::default();
        sample_data::seed(&mut state)?;

        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[async_trait]
impl AppointmentRepository for InMemoryHospitalBackend {
    async fn list_appointments(&self) -> AppResult<Vec<Appointment>> {
        Ok(self.state.read().await.appointments.values().cloned().collect())
    }

    async fn find_appointment(&self, appointment_id: RecordId) -> AppResult<Option<Appointment>> {
        Ok(self
            .state
            .read()
            .await
            .appointments
            .get(&appointment_id)
            .cloned())
    }

    async fn create_appointment(
        &self,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment> {
        let mut state = self.state.write().await;
        let appointment_id = state.allocate_id()?;
        let mut appointment = state.appointment_from(appointment_id, submission)?;
        let now = timestamp();
        appointment.created_at = Some(now.clone());
        appointment.updated_at = Some(now);

        state
            .appointments
            .insert(appointment_id, appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        appointment_id: RecordId,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment> {
        let mut state = self.state.write().await;
        let created_at = state
            .appointments
            .get(&appointment_id)
            .ok_or_else(|| missing("appointment", appointment_id))?
            .created_at
            .clone();

        let mut appointment = state.appointment_from(appointment_id, submission)?;
        appointment.created_at = created_at;
        appointment.updated_at = Some(timestamp());

        state
            .appointments
            .insert(appointment_id, appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment_status(
        &self,
        appointment_id: RecordId,
        status: AppointmentStatus,
    ) -> AppResult<Appointment> {
        let mut state = self.state.write().await;
        let appointment = state
            .appointments
            .get_mut(&appointment_id)
            .ok_or_else(|| missing("appointment", appointment_id))?;

        appointment.status = status;
        appointment.updated_at = Some(timestamp());
        Ok(appointment.clone())
    }

    async fn delete_appointment(&self, appointment_id: RecordId) -> AppResult<()> {
        self.state
            .write()
            .await
            .appointments
            .remove(&appointment_id)
            .map(|_| ())
            .ok_or_else(|| missing("appointment", appointment_id))
    }

    async fn check_availability(
        &self,
        doctor_id: RecordId,
        date: &str,
        time: &str,
    ) -> AppResult<Vec<AvailabilitySlot>> {
        if date.trim().is_empty() || time.trim().is_empty() {
            return Err(AppError::Validation(
                "Date and time are required".to_owned(),
            ));
        }

        let state = self.state.read().await;
        if state.active_doctor(doctor_id).is_none() {
            return Err(AppError::NotFound("Doctor not found or inactive".to_owned()));
        }

        let taken = state.appointments.values().any(|appointment| {
            appointment.doctor_id == doctor_id
                && appointment.date == date
                && appointment.time == time
                && appointment.status == AppointmentStatus::Scheduled
        });

        Ok(vec![AvailabilitySlot {
            doctor_id,
            date: date.to_owned(),
            time: time.to_owned(),
            is_available: !taken,
        }])
    }
}

fn patient_from(id: RecordId, input: &PatientInput) -> Patient {
    Patient {
        id,
        first_name: input.first_name.clone(),
        last_name: input.last_name.clone(),
        date_of_birth: input.date_of_birth.clone(),
        gender: input.gender.clone(),
        address: input.address.clone(),
        phone: input.phone.clone(),
        email: input.email.clone(),
        is_active: true,
    }
}

fn doctor_from(id: RecordId, input: &DoctorInput) -> Doctor {
    Doctor {
        id,
        first_name: input.first_name.clone(),
        last_name: input.last_name.clone(),
        specialization: input.specialization.clone(),
        phone: input.phone.clone(),
        email: input.email.clone(),
        is_active: input.is_active,
    }
}

fn billing_record_from(
    id: RecordId,
    input: &BillingRecordInput,
    created_at: Option<String>,
) -> BillingRecord {
    BillingRecord {
        id,
        patient_id: input.patient_id,
        appointment_id: input.appointment_id,
        total_amount: input.total_amount,
        paid_amount: input.paid_amount,
        payment_status: input.payment_status.clone(),
        payment_method: input.payment_method.clone(),
        insurance_provider: input.insurance_provider.clone(),
        notes: input.notes.clone(),
        created_at,
    }
}

fn inventory_item_from(id: RecordId, input: &InventoryItemInput) -> InventoryItem {
    InventoryItem {
        id,
        name: input.name.clone(),
        category: input.category.clone(),
        quantity: input.quantity,
        unit: input.unit.clone(),
        price_per_unit: input.price_per_unit,
        supplier: input.supplier.clone(),
        expiry_date: input.expiry_date.clone(),
        minimum_stock: input.minimum_stock,
    }
}

fn lab_test_from(id: RecordId, input: &LabTestInput) -> LabTest {
    LabTest {
        id,
        patient_id: input.patient_id,
        doctor_id: input.doctor_id,
        test_name: input.test_name.clone(),
        test_type: input.test_type.clone(),
        test_date: Some(input.test_date.clone()),
        results: input.results.clone(),
        status: input.status.clone(),
        notes: input.notes.clone(),
    }
}

#[async_trait]
impl RecordDirectory for InMemoryHospitalBackend {
    async fn list_patients(&self) -> AppResult<Vec<Patient>> {
        Ok(self.state.read().await.patients.values().cloned().collect())
    }

    async fn create_patient(&self, input: &PatientInput) -> AppResult<Patient> {
        let mut state = self.state.write().await;
        state.ensure_unique_email(&input.email, None)?;

        let patient = patient_from(state.allocate_id()?, input);
        state.patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn update_patient(
        &self,
        patient_id: RecordId,
        input: &PatientInput,
    ) -> AppResult<Patient> {
        let mut state = self.state.write().await;
        if !state.patients.contains_key(&patient_id) {
            return Err(missing("patient", patient_id));
        }
        state.ensure_unique_email(&input.email, Some(patient_id))?;

        let patient = patient_from(patient_id, input);
        state.patients.insert(patient_id, patient.clone());
        Ok(patient)
    }

    async fn delete_patient(&self, patient_id: RecordId) -> AppResult<()> {
        self.state
            .write()
            .await
            .patients
            .remove(&patient_id)
            .map(|_| ())
            .ok_or_else(|| missing("patient", patient_id))
    }

    async fn list_doctors(&self) -> AppResult<Vec<Doctor>> {
        Ok(self
            .state
            .read()
            .await
            .doctors
            .values()
            .filter(|doctor| doctor.is_active)
            .cloned()
            .collect())
    }

    async fn create_doctor(&self, input: &DoctorInput) -> AppResult<Doctor> {
        let mut state = self.state.write().await;
        let doctor = doctor_from(state.allocate_id()?, input);
        state.doctors.insert(doctor.id, doctor.clone());
        Ok(doctor)
    }

    async fn update_doctor(&self, doctor_id: RecordId, input: &DoctorInput) -> AppResult<Doctor> {
        let mut state = self.state.write().await;
        let doctor = state
            .doctors
            .get_mut(&doctor_id)
            .ok_or_else(|| missing("doctor", doctor_id))?;
        *doctor = doctor_from(doctor_id, input);
        Ok(doctor.clone())
    }

    async fn deactivate_doctor(&self, doctor_id: RecordId) -> AppResult<()> {
        let mut state = self.state.write().await;
        let doctor = state
            .doctors
            .get_mut(&doctor_id)
            .ok_or_else(|| missing("doctor", doctor_id))?;
        doctor.is_active = false;
        Ok(())
    }

    async fn list_billing_records(&self) -> AppResult<Vec<BillingRecord>> {
        Ok(self
            .state
            .read()
            .await
            .billing_records
            .values()
            .cloned()
            .collect())
    }

    async fn create_billing_record(&self, input: &BillingRecordInput) -> AppResult<BillingRecord> {
        let mut state = self.state.write().await;
        if !state.patients.contains_key(&input.patient_id) {
            return Err(AppError::Validation(format!(
                "patient '{}' does not exist",
                input.patient_id
            )));
        }

        let record = billing_record_from(state.allocate_id()?, input, Some(timestamp()));
        state.billing_records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_billing_record(
        &self,
        billing_id: RecordId,
        input: &BillingRecordInput,
    ) -> AppResult<BillingRecord> {
        let mut state = self.state.write().await;
        let record = state
            .billing_records
            .get_mut(&billing_id)
            .ok_or_else(|| missing("billing record", billing_id))?;
        *record = billing_record_from(billing_id, input, record.created_at.take());
        Ok(record.clone())
    }

    async fn delete_billing_record(&self, billing_id: RecordId) -> AppResult<()> {
        self.state
            .write()
            .await
            .billing_records
            .remove(&billing_id)
            .map(|_| ())
            .ok_or_else(|| missing("billing record", billing_id))
    }

    async fn list_inventory(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(self.state.read().await.inventory.values().cloned().collect())
    }

    async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(self
            .state
            .read()
            .await
            .inventory
            .values()
            .filter(|item| item.is_low_stock())
            .cloned()
            .collect())
    }

    async fn create_inventory_item(&self, input: &InventoryItemInput) -> AppResult<InventoryItem> {
        let mut state = self.state.write().await;
        let item = inventory_item_from(state.allocate_id()?, input);
        state.inventory.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_inventory_item(
        &self,
        item_id: RecordId,
        input: &InventoryItemInput,
    ) -> AppResult<InventoryItem> {
        let mut state = self.state.write().await;
        let item = state
            .inventory
            .get_mut(&item_id)
            .ok_or_else(|| missing("inventory item", item_id))?;
        *item = inventory_item_from(item_id, input);
        Ok(item.clone())
    }

    async fn delete_inventory_item(&self, item_id: RecordId) -> AppResult<()> {
        self.state
            .write()
            .await
            .inventory
            .remove(&item_id)
            .map(|_| ())
            .ok_or_else(|| missing("inventory item", item_id))
    }

    async fn list_prescriptions(&self) -> AppResult<Vec<Prescription>> {
        Ok(self
            .state
            .read()
            .await
            .prescriptions
            .values()
            .cloned()
            .collect())
    }

    async fn list_patient_prescriptions(
        &self,
        patient_id: RecordId,
    ) -> AppResult<Vec<Prescription>> {
        let state = self.state.read().await;
        if !state.patients.contains_key(&patient_id) {
            return Err(missing("patient", patient_id));
        }

        Ok(state
            .prescriptions
            .values()
            .filter(|prescription| prescription.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn create_prescription(&self, input: &PrescriptionInput) -> AppResult<Prescription> {
        let mut state = self.state.write().await;
        state.require_active_parties(input.patient_id, input.doctor_id)?;

        let id = state.allocate_id()?;
        let prescription = Prescription {
            id,
            patient_id: input.patient_id,
            doctor_id: input.doctor_id,
            diagnosis: input.diagnosis.clone(),
            notes: input.notes.clone(),
            medications: state.medications_from(&input.medications)?,
            created_at: Some(timestamp()),
        };
        state.prescriptions.insert(id, prescription.clone());
        Ok(prescription)
    }

    async fn update_prescription(
        &self,
        prescription_id: RecordId,
        input: &PrescriptionInput,
    ) -> AppResult<Prescription> {
        let mut state = self.state.write().await;
        if !state.prescriptions.contains_key(&prescription_id) {
            return Err(missing("prescription", prescription_id));
        }

        let medications = state.medications_from(&input.medications)?;
        let prescription = state
            .prescriptions
            .get_mut(&prescription_id)
            .ok_or_else(|| missing("prescription", prescription_id))?;
        prescription.diagnosis = input.diagnosis.clone();
        prescription.notes = input.notes.clone();
        prescription.medications = medications;
        Ok(prescription.clone())
    }

    async fn delete_prescription(&self, prescription_id: RecordId) -> AppResult<()> {
        self.state
            .write()
            .await
            .prescriptions
            .remove(&prescription_id)
            .map(|_| ())
            .ok_or_else(|| missing("prescription", prescription_id))
    }

    async fn list_lab_tests(&self) -> AppResult<Vec<LabTest>> {
        Ok(self.state.read().await.lab_tests.values().cloned().collect())
    }

    async fn create_lab_test(&self, input: &LabTestInput) -> AppResult<LabTest> {
        let mut state = self.state.write().await;
        state.require_active_parties(input.patient_id, input.doctor_id)?;

        let test = lab_test_from(state.allocate_id()?, input);
        state.lab_tests.insert(test.id, test.clone());
        Ok(test)
    }

    async fn update_lab_test(
        &self,
        test_id: RecordId,
        input: &LabTestInput,
    ) -> AppResult<LabTest> {
        let mut state = self.state.write().await;
        if !state.lab_tests.contains_key(&test_id) {
            return Err(missing("lab test", test_id));
        }
        state.require_active_parties(input.patient_id, input.doctor_id)?;

        let test = lab_test_from(test_id, input);
        state.lab_tests.insert(test_id, test.clone());
        Ok(test)
    }

    async fn delete_lab_test(&self, test_id: RecordId) -> AppResult<()> {
        self.state
            .write()
            .await
            .lab_tests
            .remove(&test_id)
            .map(|_| ())
            .ok_or_else(|| missing("lab test", test_id))
    }
}
