use axum::{extract::State, response::Redirect};
use tracing::{debug, info};

use crate::credentials::{RegisterOutcome, VerifyOutcome};
use crate::error::ApiError;
use crate::extract::FormFields;
use crate::{AppState, blocking, validation};

pub const REGISTER_SUCCESS_PAGE: &str = "/register-success.html";
pub const LOGIN_SUCCESS_PAGE: &str = "/report.html";

const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    FormFields(fields): FormFields,
) -> Result<Redirect, ApiError> {
    let creds = validation::registration(&fields)
        .inspect_err(|e| debug!("Rejected registration: {}", e))?;

    let reg_number = creds.reg_number.clone();
    let outcome = blocking("/api/register", REGISTER_FAILED, move || {
        state.credentials.register(&creds)
    })
    .await?;

    match outcome {
        RegisterOutcome::Created => {
            info!("Registered account {}", reg_number);
            Ok(Redirect::to(REGISTER_SUCCESS_PAGE))
        }
        RegisterOutcome::Duplicate => {
            debug!("Registration number {} already taken", reg_number);
            Err(ApiError::DuplicateRegistration)
        }
    }
}

/// POST /api/login
///
/// A single credential check; nothing is remembered about the caller afterwards.
pub async fn login(
    State(state): State<AppState>,
    FormFields(fields): FormFields,
) -> Result<Redirect, ApiError> {
    let creds = validation::login(&fields).inspect_err(|e| debug!("Rejected login: {}", e))?;

    let outcome = blocking("/api/login", LOGIN_FAILED, move || {
        state.credentials.verify(&creds)
    })
    .await?;

    match outcome {
        VerifyOutcome::Match => Ok(Redirect::to(LOGIN_SUCCESS_PAGE)),
        VerifyOutcome::NoAccount | VerifyOutcome::Mismatch => Err(ApiError::InvalidCredentials),
    }
}
