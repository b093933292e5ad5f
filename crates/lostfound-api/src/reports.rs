use axum::{extract::State, response::Redirect};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::extract::FormFields;
use crate::{AppState, blocking, validation};

pub const REPORT_SUCCESS_PAGE: &str = "/success.html";

const REPORT_FAILED: &str = "Failed to submit report. Please try again.";

/// POST /api/report
pub async fn submit_report(
    State(state): State<AppState>,
    FormFields(fields): FormFields,
) -> Result<Redirect, ApiError> {
    let (report, contact_kind) =
        validation::report(&fields).inspect_err(|e| debug!("Rejected report: {}", e))?;

    let id = blocking("/api/report", REPORT_FAILED, move || {
        state.db.insert_report(&report)
    })
    .await?;

    info!("Stored lost item report {} ({:?} contact)", id, contact_kind);
    Ok(Redirect::to(REPORT_SUCCESS_PAGE))
}
