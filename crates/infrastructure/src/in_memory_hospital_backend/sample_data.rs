//! Demo hospital used when no REST backend is configured.

use hopespring_core::AppResult;
use hopespring_domain::{
    Appointment, AppointmentStatus, BillingRecord, Doctor, InventoryItem, LabTest, Medication,
    Patient, Prescription,
};

use super::HospitalState;

const DOCTORS: [(&str, &str, &str, bool); 5] = [
    ("Vikram", "Menon", "Cardiology", true),
    ("Priya", "Nair", "Pediatrics", true),
    ("Arjun", "Shah", "Orthopedics", true),
    ("Meera", "Iyer", "Dermatology", false),
    ("Rahul", "Verma", "Neurology", true),
];

const PATIENTS: [(&str, &str, &str, &str, &str); 3] = [
    ("Asha", "Rao", "1988-04-12", "female", "9876543210"),
    ("Kiran", "Das", "1975-11-03", "male", "9123456780"),
    ("Neha", "Kapoor", "2001-02-27", "female", "8899776655"),
];

pub(super) fn seed(state: &mut HospitalState) -> AppResult<()> {
    let mut doctor_ids = Vec::with_capacity(DOCTORS.len());
    for (first_name, last_name, specialization, is_active) in DOCTORS {
        let id = state.allocate_id()?;
        state.doctors.insert(
            id,
            Doctor {
                id,
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                specialization: specialization.to_owned(),
                phone: String::new(),
                email: format!("{first_name}.{last_name}@hopespring.example").to_lowercase(),
                is_active,
            },
        );
        doctor_ids.push(id);
    }

    let mut patient_ids = Vec::with_capacity(PATIENTS.len());
    for (first_name, last_name, date_of_birth, gender, phone) in PATIENTS {
        let id = state.allocate_id()?;
        state.patients.insert(
            id,
            Patient {
                id,
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                date_of_birth: date_of_birth.to_owned(),
                gender: gender.to_owned(),
                address: String::new(),
                phone: phone.to_owned(),
                email: String::new(),
                is_active: true,
            },
        );
        patient_ids.push(id);
    }

    let (Some(&cardiologist), Some(&neurologist), Some(&first_patient), Some(&second_patient)) = (
        doctor_ids.first(),
        doctor_ids.last(),
        patient_ids.first(),
        patient_ids.get(1),
    ) else {
        return Ok(());
    };

    let booked = state.allocate_id()?;
    state.appointments.insert(
        booked,
        Appointment {
            id: booked,
            patient_id: first_patient,
            patient_name: "Asha Rao".to_owned(),
            doctor_id: neurologist,
            doctor_name: "Dr. Rahul Verma".to_owned(),
            date: "2025-07-10".to_owned(),
            time: "09:00".to_owned(),
            status: AppointmentStatus::Scheduled,
            notes: Some("Recurring migraines".to_owned()),
            created_at: None,
            updated_at: None,
        },
    );

    let billing_id = state.allocate_id()?;
    state.billing_records.insert(
        billing_id,
        BillingRecord {
            id: billing_id,
            patient_id: first_patient,
            appointment_id: Some(booked),
            total_amount: 1500.0,
            paid_amount: 500.0,
            payment_status: "partial".to_owned(),
            payment_method: Some("card".to_owned()),
            insurance_provider: None,
            notes: None,
            created_at: Some(super::timestamp()),
        },
    );

    for (name, category, quantity, unit, price_per_unit, minimum_stock) in [
        ("Paracetamol 500mg", "Medicine", 400, "tablets", 1.5, 100),
        ("Surgical gloves", "Supplies", 20, "boxes", 250.0, 25),
    ] {
        let id = state.allocate_id()?;
        state.inventory.insert(
            id,
            InventoryItem {
                id,
                name: name.to_owned(),
                category: category.to_owned(),
                quantity,
                unit: unit.to_owned(),
                price_per_unit,
                supplier: None,
                expiry_date: None,
                minimum_stock,
            },
        );
    }

    let prescription_id = state.allocate_id()?;
    let medication_id = state.allocate_id()?;
    state.prescriptions.insert(
        prescription_id,
        Prescription {
            id: prescription_id,
            patient_id: second_patient,
            doctor_id: cardiologist,
            diagnosis: "Mild hypertension".to_owned(),
            notes: None,
            medications: vec![Medication {
                id: medication_id,
                name: "Amlodipine".to_owned(),
                dosage: "5mg".to_owned(),
                frequency: "Once daily".to_owned(),
                duration: Some("30 days".to_owned()),
                instructions: None,
            }],
            created_at: None,
        },
    );

    let lab_test_id = state.allocate_id()?;
    state.lab_tests.insert(
        lab_test_id,
        LabTest {
            id: lab_test_id,
            patient_id: second_patient,
            doctor_id: cardiologist,
            test_name: "Lipid profile".to_owned(),
            test_type: "Blood".to_owned(),
            test_date: Some("2025-07-12".to_owned()),
            results: None,
            status: "pending".to_owned(),
            notes: None,
        },
    );

    Ok(())
}
