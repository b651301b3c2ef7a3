use hopespring_core::RecordId;

use super::{
    BillingRecordInput, DoctorInput, InventoryItemInput, LabTestInput, MedicationInput,
    PatientInput, PrescriptionInput,
};

fn id(value: i64) -> RecordId {
    RecordId::new(value).unwrap_or_else(|_| panic!("record id {value} should be valid"))
}

fn message(result: hopespring_core::AppResult<()>) -> Option<String> {
    result.err().map(|error| error.message().to_owned())
}

fn patient_input() -> PatientInput {
    PatientInput {
        first_name: "Asha".to_owned(),
        last_name: "Rao".to_owned(),
        date_of_birth: "1988-04-12".to_owned(),
        gender: "female".to_owned(),
        address: String::new(),
        phone: "9876543210".to_owned(),
        email: "asha.rao@example.in".to_owned(),
    }
}

#[test]
fn patient_input_accepts_well_formed_contact() {
    assert!(patient_input().validate().is_ok());
}

#[test]
fn patient_input_reports_missing_field() {
    let mut input = patient_input();
    input.gender = " ".to_owned();
    assert_eq!(
        message(input.validate()).as_deref(),
        Some("Missing required field: gender")
    );
}

#[test]
fn patient_input_rejects_malformed_phone() {
    let mut input = patient_input();
    input.phone = "98-76".to_owned();
    assert!(input.validate().is_err());
}

#[test]
fn doctor_input_requires_contact_details() {
    let payload = r#"{"first_name":"Sara","last_name":"Khan","specialization":"ENT","phone":"","email":"sara@hopespring.example"}"#;
    let input = serde_json::from_str::<DoctorInput>(payload)
        .unwrap_or_else(|error| panic!("payload should parse: {error}"));

    assert!(input.is_active);
    assert_eq!(
        message(input.validate()).as_deref(),
        Some("Missing required field: phone")
    );
}

#[test]
fn inventory_input_checks_price_and_expiry() {
    let mut input = InventoryItemInput {
        name: "Saline".to_owned(),
        category: "Medicine".to_owned(),
        quantity: 0,
        unit: "bottles".to_owned(),
        price_per_unit: 35.0,
        supplier: None,
        expiry_date: Some("2026-01-31T00:00:00".to_owned()),
        minimum_stock: 10,
    };
    assert!(input.validate().is_ok());

    input.expiry_date = Some("31/01/2026".to_owned());
    assert!(input.validate().is_err());

    input.expiry_date = None;
    input.price_per_unit = 0.0;
    assert_eq!(
        message(input.validate()).as_deref(),
        Some("Price per unit must be greater than zero")
    );
}

#[test]
fn billing_input_defaults_to_pending_and_rejects_unknown_status() {
    let payload = r#"{"patient_id":6,"total_amount":1200.0}"#;
    let mut input = serde_json::from_str::<BillingRecordInput>(payload)
        .unwrap_or_else(|error| panic!("payload should parse: {error}"));

    assert_eq!(input.payment_status, "pending");
    assert!(input.validate().is_ok());

    input.payment_status = "refunded".to_owned();
    assert!(input.validate().is_err());
}

#[test]
fn lab_test_input_needs_calendar_date() {
    let mut input = LabTestInput {
        patient_id: id(6),
        doctor_id: id(1),
        test_name: "Lipid panel".to_owned(),
        test_type: "Blood".to_owned(),
        test_date: "2025-07-12".to_owned(),
        results: None,
        status: "pending".to_owned(),
        notes: None,
    };
    assert!(input.validate().is_ok());

    input.test_date = "2025-02-30".to_owned();
    assert_eq!(
        message(input.validate()).as_deref(),
        Some("Invalid date format. Use YYYY-MM-DD")
    );
}

#[test]
fn prescription_input_names_incomplete_medication() {
    let input = PrescriptionInput {
        patient_id: id(7),
        doctor_id: id(2),
        diagnosis: "Seasonal allergy".to_owned(),
        notes: None,
        medications: vec![
            MedicationInput {
                name: "Cetirizine".to_owned(),
                dosage: "10mg".to_owned(),
                frequency: "Once daily".to_owned(),
                duration: None,
                instructions: None,
            },
            MedicationInput {
                name: "Saline spray".to_owned(),
                dosage: String::new(),
                frequency: "Twice daily".to_owned(),
                duration: None,
                instructions: None,
            },
        ],
    };

    assert_eq!(
        message(input.validate()).as_deref(),
        Some("Missing required field: medications[1].dosage")
    );
}
