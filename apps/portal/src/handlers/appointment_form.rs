use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use hopespring_application::SubmitOutcome;
use hopespring_core::AppError;
use hopespring_domain::FormFieldChange;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::dto::{
    AppointmentFormResponse, OpenAppointmentFormRequest, SubmitAppointmentFormResponse,
    UpdateAppointmentFormRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn open_appointment_form_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<OpenAppointmentFormRequest>,
) -> ApiResult<(StatusCode, Json<AppointmentFormResponse>)> {
    let form = state
        .appointment_form_service
        .open(&state.form_store(session), payload.appointment_id()?)
        .await?;

    Ok((StatusCode::CREATED, Json(AppointmentFormResponse::from(&form))))
}

pub async fn current_appointment_form_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<AppointmentFormResponse>> {
    let form = state
        .appointment_form_service
        .current(&state.form_store(session))
        .await?;

    Ok(Json(AppointmentFormResponse::from(&form)))
}

pub async fn update_appointment_form_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateAppointmentFormRequest>,
) -> ApiResult<Json<AppointmentFormResponse>> {
    let changes = payload
        .changes
        .into_iter()
        .map(FormFieldChange::try_from)
        .collect::<Result<Vec<_>, AppError>>()?;

    let form = state
        .appointment_form_service
        .change_fields(&state.form_store(session), changes)
        .await?;

    Ok(Json(AppointmentFormResponse::from(&form)))
}

pub async fn submit_appointment_form_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<SubmitAppointmentFormResponse>> {
    let outcome = state
        .appointment_form_service
        .submit(&state.form_store(session))
        .await?;

    let response = match outcome {
        SubmitOutcome::Saved(appointment) => {
            info!(appointment_id = %appointment.id, "appointment saved");
            SubmitAppointmentFormResponse::Saved {
                appointment: appointment.into(),
            }
        }
        SubmitOutcome::Blocked(form) => SubmitAppointmentFormResponse::Rejected {
            form: AppointmentFormResponse::from(&form),
        },
        SubmitOutcome::Failed { form, error } => {
            warn!(error = %error, "appointment save failed");
            SubmitAppointmentFormResponse::Rejected {
                form: AppointmentFormResponse::from(&form),
            }
        }
    };

    Ok(Json(response))
}

pub async fn close_appointment_form_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<StatusCode> {
    state
        .appointment_form_service
        .close(&state.form_store(session))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
