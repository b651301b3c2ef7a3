//! Dashboard figures derived from hospital records.

use chrono::{Datelike, NaiveDate};
use hopespring_core::RecordId;

use crate::validation::parse_date;
use crate::{
    Appointment, AppointmentStatus, BillingRecord, Doctor, InventoryItem, LabTest, Patient,
    Prescription,
};

/// Headline counts on the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Registered patients.
    pub total_patients: usize,
    /// Doctors on staff.
    pub total_doctors: usize,
    /// Appointments in any state.
    pub total_appointments: usize,
    /// Payments received on bills created in the current month.
    pub monthly_revenue: f64,
}

impl DashboardStats {
    /// Computes the figures for the month containing `today`.
    #[must_use]
    pub fn compute(
        patients: &[Patient],
        doctors: &[Doctor],
        appointments: &[Appointment],
        billing_records: &[BillingRecord],
        today: NaiveDate,
    ) -> Self {
        let monthly_revenue = billing_records
            .iter()
            .filter(|record| {
                record
                    .created_at
                    .as_deref()
                    .and_then(calendar_day)
                    .is_some_and(|created| {
                        created.year() == today.year() && created.month() == today.month()
                    })
            })
            .map(|record| record.paid_amount)
            .sum();

        Self {
            total_patients: patients.len(),
            total_doctors: doctors.len(),
            total_appointments: appointments.len(),
            monthly_revenue,
        }
    }
}

/// What a signed-in patient sees first.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientOverview {
    /// Scheduled visits from today on, soonest first.
    pub upcoming_appointments: Vec<Appointment>,
    /// Prescriptions written for the patient.
    pub prescriptions: Vec<Prescription>,
    /// Lab tests ordered for the patient.
    pub lab_tests: Vec<LabTest>,
    /// Bills issued to the patient.
    pub billing_records: Vec<BillingRecord>,
    /// Sum of unpaid remainders.
    pub outstanding_balance: f64,
}

impl PatientOverview {
    /// Selects the patient's records from full listings.
    ///
    /// Prescriptions are expected to be fetched for the patient already.
    #[must_use]
    pub fn build(
        patient_id: RecordId,
        today: NaiveDate,
        appointments: Vec<Appointment>,
        prescriptions: Vec<Prescription>,
        lab_tests: Vec<LabTest>,
        billing_records: Vec<BillingRecord>,
    ) -> Self {
        let billing_records: Vec<_> = billing_records
            .into_iter()
            .filter(|record| record.patient_id == patient_id)
            .collect();

        Self {
            upcoming_appointments: upcoming(appointments, today, |appointment| {
                appointment.patient_id == patient_id
            }),
            prescriptions,
            lab_tests: lab_tests
                .into_iter()
                .filter(|test| test.patient_id == patient_id)
                .collect(),
            outstanding_balance: billing_records.iter().map(BillingRecord::outstanding).sum(),
            billing_records,
        }
    }
}

/// What a signed-in doctor sees first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorOverview {
    /// Scheduled visits from today on, soonest first.
    pub upcoming_appointments: Vec<Appointment>,
    /// Ordered tests without results yet.
    pub pending_lab_tests: Vec<LabTest>,
}

impl DoctorOverview {
    /// Selects the doctor's schedule and open lab orders.
    #[must_use]
    pub fn build(
        doctor_id: RecordId,
        today: NaiveDate,
        appointments: Vec<Appointment>,
        lab_tests: Vec<LabTest>,
    ) -> Self {
        Self {
            upcoming_appointments: upcoming(appointments, today, |appointment| {
                appointment.doctor_id == doctor_id
            }),
            pending_lab_tests: lab_tests
                .into_iter()
                .filter(|test| test.doctor_id == doctor_id && test.status != "completed")
                .collect(),
        }
    }
}

/// What a signed-in manager sees first.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerOverview {
    /// Items at or below their reorder threshold.
    pub low_stock_items: Vec<InventoryItem>,
    /// Bills with an unpaid remainder.
    pub unpaid_billing_records: Vec<BillingRecord>,
    /// Sum of unpaid remainders.
    pub outstanding_total: f64,
    /// Stock value at purchase price.
    pub inventory_value: f64,
}

impl ManagerOverview {
    /// Summarises stock and receivables.
    #[must_use]
    pub fn build(billing_records: Vec<BillingRecord>, inventory: Vec<InventoryItem>) -> Self {
        let inventory_value = inventory
            .iter()
            .map(|item| item.quantity as f64 * item.price_per_unit)
            .sum();

        let unpaid_billing_records: Vec<_> = billing_records
            .into_iter()
            .filter(|record| record.outstanding() > 0.0)
            .collect();

        Self {
            low_stock_items: inventory
                .into_iter()
                .filter(InventoryItem::is_low_stock)
                .collect(),
            outstanding_total: unpaid_billing_records
                .iter()
                .map(BillingRecord::outstanding)
                .sum(),
            unpaid_billing_records,
            inventory_value,
        }
    }
}

fn calendar_day(value: &str) -> Option<NaiveDate> {
    let date = value.split_once('T').map_or(value, |(date, _)| date);
    parse_date(date).ok()
}

fn upcoming(
    appointments: Vec<Appointment>,
    today: NaiveDate,
    belongs: impl Fn(&Appointment) -> bool,
) -> Vec<Appointment> {
    let mut upcoming: Vec<_> = appointments
        .into_iter()
        .filter(|appointment| {
            belongs(appointment)
                && appointment.status == AppointmentStatus::Scheduled
                && calendar_day(&appointment.date).is_some_and(|date| date >= today)
        })
        .collect();
    upcoming.sort_by(|left, right| (&left.date, &left.time).cmp(&(&right.date, &right.time)));
    upcoming
}
