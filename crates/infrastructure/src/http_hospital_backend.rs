use async_trait::async_trait;
use hopespring_application::{AppointmentRepository, RecordDirectory};
use hopespring_core::{AppError, AppResult, RecordId};
use hopespring_domain::{
    Appointment, AppointmentStatus, AppointmentSubmission, AvailabilitySlot, BillingRecord,
    BillingRecordInput, Doctor, DoctorInput, InventoryItem, InventoryItemInput, LabTest,
    LabTestInput, Patient, PatientInput, Prescription, PrescriptionInput,
};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// REST client for the hospital backend.
///
/// Requests are sent once; failures are reported, never retried.
pub struct HttpHospitalBackend {
    http_client: reqwest::Client,
    base_url: Url,
}

#[derive(serde::Deserialize)]
struct BackendErrorBody {
    error: String,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: AppointmentStatus,
}

impl HttpHospitalBackend {
    /// Creates a new backend client rooted at `base_url`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: Url) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                AppError::Internal(format!(
                    "backend base url '{}' cannot carry a path",
                    self.base_url
                ))
            })?;
            path.pop_if_empty().extend(segments);
        }

        Ok(url)
    }

    fn record_endpoint(&self, collection: &str, id: RecordId) -> AppResult<Url> {
        let id = id.to_string();
        self.endpoint(&[collection, id.as_str()])
    }

    fn availability_endpoint(&self, doctor_id: RecordId, date: &str, time: &str) -> AppResult<Url> {
        let doctor_id = doctor_id.to_string();
        let mut url = self.endpoint(&["doctors", doctor_id.as_str(), "availability"])?;
        url.query_pairs_mut()
            .append_pair("date", date)
            .append_pair("time", time);
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.send_json(Method::GET, url, None::<&()>).await
    }

    async fn send_json<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, &url, body).await?;
        response.json::<T>().await.map_err(|error| {
            AppError::Internal(format!(
                "backend response from {url} could not be decoded: {error}"
            ))
        })
    }

    async fn delete(&self, url: Url) -> AppResult<()> {
        self.send(Method::DELETE, &url, None::<&()>).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, url: &Url, body: Option<&B>) -> AppResult<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(%method, %url, "calling hospital backend");

        let mut request = self.http_client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|error| {
            tracing::warn!(%method, %url, error = %error, "hospital backend unreachable");
            AppError::Internal(format!("hospital backend transport error: {error}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%method, %url, %status, "hospital backend rejected request");
        Err(error_from_response(status, &body))
    }
}

/// Maps a non-success backend response to an application error.
///
/// The backend reports failures as `{"error": "..."}`; that text is kept when
/// present.
fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("hospital backend responded with status {status}"));

    match status {
        StatusCode::BAD_REQUEST => AppError::Validation(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Internal(message),
    }
}

#[async_trait]
impl AppointmentRepository for HttpHospitalBackend {
    async fn list_appointments(&self) -> AppResult<Vec<Appointment>> {
        self.get_json(self.endpoint(&["appointments"])?).await
    }

    async fn find_appointment(&self, appointment_id: RecordId) -> AppResult<Option<Appointment>> {
        match self
            .get_json(self.record_endpoint("appointments", appointment_id)?)
            .await
        {
            Ok(appointment) => Ok(Some(appointment)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn create_appointment(
        &self,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment> {
        self.send_json(
            Method::POST,
            self.endpoint(&["appointments"])?,
            Some(submission),
        )
        .await
    }

    async fn update_appointment(
        &self,
        appointment_id: RecordId,
        submission: &AppointmentSubmission,
    ) -> AppResult<Appointment> {
        self.send_json(
            Method::PUT,
            self.record_endpoint("appointments", appointment_id)?,
            Some(submission),
        )
        .await
    }

    async fn update_appointment_status(
        &self,
        appointment_id: RecordId,
        status: AppointmentStatus,
    ) -> AppResult<Appointment> {
        self.send_json(
            Method::PUT,
            self.record_endpoint("appointments", appointment_id)?,
            Some(&StatusUpdate { status }),
        )
        .await
    }

    async fn delete_appointment(&self, appointment_id: RecordId) -> AppResult<()> {
        self.delete(self.record_endpoint("appointments", appointment_id)?)
            .await
    }

    async fn check_availability(
        &self,
        doctor_id: RecordId,
        date: &str,
        time: &str,
    ) -> AppResult<Vec<AvailabilitySlot>> {
        let slots: Vec<AvailabilitySlot> = self
            .get_json(self.availability_endpoint(doctor_id, date, time)?)
            .await?;
        tracing::debug!(
            doctor_id = %doctor_id,
            date,
            time,
            slots = slots.len(),
            "doctor availability fetched"
        );
        Ok(slots)
    }
}

#[async_trait]
impl RecordDirectory for HttpHospitalBackend {
    async fn list_patients(&self) -> AppResult<Vec<Patient>> {
        self.get_json(self.endpoint(&["patients"])?).await
    }

    async fn create_patient(&self, input: &PatientInput) -> AppResult<Patient> {
        self.send_json(Method::POST, self.endpoint(&["patients"])?, Some(input))
            .await
    }

    async fn update_patient(
        &self,
        patient_id: RecordId,
        input: &PatientInput,
    ) -> AppResult<Patient> {
        self.send_json(
            Method::PUT,
            self.record_endpoint("patients", patient_id)?,
            Some(input),
        )
        .await
    }

    async fn delete_patient(&self, patient_id: RecordId) -> AppResult<()> {
        self.delete(self.record_endpoint("patients", patient_id)?)
            .await
    }

    async fn list_doctors(&self) -> AppResult<Vec<Doctor>> {
        self.get_json(self.endpoint(&["doctors"])?).await
    }

    async fn create_doctor(&self, input: &DoctorInput) -> AppResult<Doctor> {
        self.send_json(Method::POST, self.endpoint(&["doctors"])?, Some(input))
            .await
    }

    async fn update_doctor(&self, doctor_id: RecordId, input: &DoctorInput) -> AppResult<Doctor> {
        self.send_json(
            Method::PUT,
            self.record_endpoint("doctors", doctor_id)?,
            Some(input),
        )
        .await
    }

    async fn deactivate_doctor(&self, doctor_id: RecordId) -> AppResult<()> {
        self.delete(self.record_endpoint("doctors", doctor_id)?)
            .await
    }

    async fn list_billing_records(&self) -> AppResult<Vec<BillingRecord>> {
        self.get_json(self.endpoint(&["billing"])?).await
    }

    async fn create_billing_record(&self, input: &BillingRecordInput) -> AppResult<BillingRecord> {
        self.send_json(Method::POST, self.endpoint(&["billing"])?, Some(input))
            .await
    }

    async fn update_billing_record(
        &self,
        billing_id: RecordId,
        input: &BillingRecordInput,
    ) -> AppResult<BillingRecord> {
        self.send_json(
            Method::PUT,
            self.record_endpoint("billing", billing_id)?,
            Some(input),
        )
        .await
    }

    async fn delete_billing_record(&self, billing_id: RecordId) -> AppResult<()> {
        self.delete(self.record_endpoint("billing", billing_id)?)
            .await
    }

    async fn list_inventory(&self) -> AppResult<Vec<InventoryItem>> {
        self.get_json(self.endpoint(&["inventory"])?).await
    }

    async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        self.get_json(self.endpoint(&["inventory", "low-stock"])?)
            .await
    }

    async fn create_inventory_item(&self, input: &InventoryItemInput) -> AppResult<InventoryItem> {
        self.send_json(Method::POST, self.endpoint(&["inventory"])?, Some(input))
            .await
    }

    async fn update_inventory_item(
        &self,
        item_id: RecordId,
        input: &InventoryItemInput,
    ) -> AppResult<InventoryItem> {
        self.send_json(
            Method::PUT,
            self.record_endpoint("inventory", item_id)?,
            Some(input),
        )
        .await
    }

    async fn delete_inventory_item(&self, item_id: RecordId) -> AppResult<()> {
        self.delete(self.record_endpoint("inventory", item_id)?)
            .await
    }

    async fn list_prescriptions(&self) -> AppResult<Vec<Prescription>> {
        self.get_json(self.endpoint(&["prescriptions"])?).await
    }

    async fn list_patient_prescriptions(
        &self,
        patient_id: RecordId,
    ) -> AppResult<Vec<Prescription>> {
        let patient_id = patient_id.to_string();
        self.get_json(self.endpoint(&["prescriptions", "patient", patient_id.as_str()])?)
            .await
    }

    async fn create_prescription(&self, input: &PrescriptionInput) -> AppResult<Prescription> {
        self.send_json(Method::POST, self.endpoint(&["prescriptions"])?, Some(input))
            .await
    }

    async fn update_prescription(
        &self,
        prescription_id: RecordId,
        input: &PrescriptionInput,
    ) -> AppResult<Prescription> {
        self.send_json(
            Method::PUT,
            self.record_endpoint("prescriptions", prescription_id)?,
            Some(input),
        )
        .await
    }

    async fn delete_prescription(&self, prescription_id: RecordId) -> AppResult<()> {
        self.delete(self.record_endpoint("prescriptions", prescription_id)?)
            .await
    }

    async fn list_lab_tests(&self) -> AppResult<Vec<LabTest>> {
        self.get_json(self.endpoint(&["lab-tests"])?).await
    }

    async fn create_lab_test(&self, input: &LabTestInput) -> AppResult<LabTest> {
        self.send_json(Method::POST, self.endpoint(&["lab-tests"])?, Some(input))
            .await
    }

    async fn update_lab_test(
        &self,
        test_id: RecordId,
        input: &LabTestInput,
    ) -> AppResult<LabTest> {
        self.send_json(
            Method::PUT,
            self.record_endpoint("lab-tests", test_id)?,
            Some(input),
        )
        .await
    }

    async fn delete_lab_test(&self, test_id: RecordId) -> AppResult<()> {
        self.delete(self.record_endpoint("lab-tests", test_id)?)
            .await
    }
}
