use hopespring_domain::{DashboardStats, DoctorOverview, ManagerOverview, PatientOverview};
use serde::Serialize;
use ts_rs::TS;

use super::{
    AppointmentResponse, BillingRecordResponse, InventoryItemResponse, LabTestResponse,
    PrescriptionResponse,
};

/// Admin dashboard figures.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/dashboard-stats-response.ts"
)]
pub struct DashboardStatsResponse {
    #[ts(type = "number")]
    pub total_patients: usize,
    #[ts(type = "number")]
    pub total_doctors: usize,
    #[ts(type = "number")]
    pub total_appointments: usize,
    pub monthly_revenue: f64,
}

/// Patient dashboard feed.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/patient-overview-response.ts"
)]
pub struct PatientOverviewResponse {
    pub upcoming_appointments: Vec<AppointmentResponse>,
    pub prescriptions: Vec<PrescriptionResponse>,
    pub lab_tests: Vec<LabTestResponse>,
    pub billing_records: Vec<BillingRecordResponse>,
    pub outstanding_balance: f64,
}

/// Doctor dashboard feed.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/doctor-overview-response.ts"
)]
pub struct DoctorOverviewResponse {
    pub upcoming_appointments: Vec<AppointmentResponse>,
    pub pending_lab_tests: Vec<LabTestResponse>,
}

/// Manager dashboard feed.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/manager-overview-response.ts"
)]
pub struct ManagerOverviewResponse {
    pub low_stock_items: Vec<InventoryItemResponse>,
    pub unpaid_billing_records: Vec<BillingRecordResponse>,
    pub outstanding_total: f64,
    pub inventory_value: f64,
}

fn convert<T, U: From<T>>(values: Vec<T>) -> Vec<U> {
    values.into_iter().map(Into::into).collect()
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_patients: stats.total_patients,
            total_doctors: stats.total_doctors,
            total_appointments: stats.total_appointments,
            monthly_revenue: stats.monthly_revenue,
        }
    }
}

impl From<PatientOverview> for PatientOverviewResponse {
    fn from(overview: PatientOverview) -> Self {
        Self {
            upcoming_appointments: convert(overview.upcoming_appointments),
            prescriptions: convert(overview.prescriptions),
            lab_tests: convert(overview.lab_tests),
            billing_records: convert(overview.billing_records),
            outstanding_balance: overview.outstanding_balance,
        }
    }
}

impl From<DoctorOverview> for DoctorOverviewResponse {
    fn from(overview: DoctorOverview) -> Self {
        Self {
            upcoming_appointments: convert(overview.upcoming_appointments),
            pending_lab_tests: convert(overview.pending_lab_tests),
        }
    }
}

impl From<ManagerOverview> for ManagerOverviewResponse {
    fn from(overview: ManagerOverview) -> Self {
        Self {
            low_stock_items: convert(overview.low_stock_items),
            unpaid_billing_records: convert(overview.unpaid_billing_records),
            outstanding_total: overview.outstanding_total,
            inventory_value: overview.inventory_value,
        }
    }
}
