use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::account_repo;
use crate::services::error::WorkflowError;

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub phone: Option<String>,
    pub institution: Option<String>,
    pub student_card: Option<String>,
}

/// Flat login + profile object, mirrored in the login response.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub account_id: i64,
    pub attendee_id: i64,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub institution: Option<String>,
    pub student_card: Option<String>,
}

pub async fn register(pool: &SqlitePool, input: RegisterInput) -> Result<(), WorkflowError> {
    let required = [&input.full_name, &input.email, &input.password, &input.role];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(WorkflowError::Validation(
            "Faltan campos obligatorios".to_string(),
        ));
    }

    if account_repo::email_exists(pool, &input.email).await? {
        return Err(WorkflowError::Conflict(
            "El correo ya está registrado".to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
        .map_err(|e| WorkflowError::Internal(e.to_string()))?;

    let account_id =
        account_repo::insert_account(pool, &input.email, &password_hash, &input.role).await?;
    account_repo::insert_attendee(
        pool,
        account_id,
        &input.full_name,
        input.phone.as_deref(),
        input.institution.as_deref(),
        input.student_card.as_deref(),
    )
    .await?;

    Ok(())
}

pub async fn authenticate(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<ProfileView, WorkflowError> {
    let Some(account) = account_repo::load_account_by_email(pool, email).await? else {
        return Err(WorkflowError::NotFound("Usuario no encontrado".to_string()));
    };

    let valid = bcrypt::verify(password, &account.password_hash)
        .map_err(|e| WorkflowError::Internal(e.to_string()))?;
    if !valid {
        return Err(WorkflowError::Unauthorized(
            "Contraseña incorrecta".to_string(),
        ));
    }

    let Some(attendee) = account_repo::load_attendee_by_account(pool, account.account_id).await?
    else {
        return Err(WorkflowError::NotFound(
            "No se encontraron datos personales del usuario".to_string(),
        ));
    };

    Ok(ProfileView {
        account_id: account.account_id,
        attendee_id: attendee.attendee_id,
        full_name: attendee.full_name,
        email: account.email,
        role: account.role,
        phone: attendee.phone,
        institution: attendee.institution,
        student_card: attendee.student_card,
    })
}
