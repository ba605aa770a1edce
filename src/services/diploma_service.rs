use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::{diploma_repo, enrollment_repo};
use crate::models::{is_diploma_eligible, EligibleEnrollmentRow, EnrollmentStatus};
use crate::services::diploma_renderer;
use crate::services::error::WorkflowError;
use crate::services::mailer::{MailAttachment, Mailer, OutgoingMail};

const DELIVERY_REF_EMAIL: &str = "enviado_por_correo";

#[derive(Debug, Serialize)]
pub struct EligibleActivityView {
    pub activity_id: i64,
    pub title: String,
}

/// Render, mail and record a diploma for the enrollment belonging to
/// `email`. The diploma record is upserted only after the mail went out,
/// so a failed send leaves no partial write and a repeated request never
/// creates a second row.
pub async fn issue(
    pool: &SqlitePool,
    mailer: &dyn Mailer,
    email: &str,
    activity_id: Option<i64>,
) -> Result<String, WorkflowError> {
    let eligible = eligible_enrollments(pool, email, activity_id).await?;

    let target = match eligible.as_slice() {
        [] => {
            return Err(WorkflowError::NotFound(
                "No se encontró ninguna inscripción válida para generar diploma.".to_string(),
            ))
        }
        [single] => single.clone(),
        _ => {
            // More than one eligible enrollment and no activity filter:
            // refuse to pick arbitrarily.
            return Err(WorkflowError::Disambiguation(
                "Hay varias inscripciones elegibles para este correo; indica la actividad."
                    .to_string(),
            ));
        }
    };

    let pdf = diploma_renderer::render(&target.full_name, &target.title)?;

    mailer
        .send(OutgoingMail {
            to: target.email.clone(),
            subject: format!("🎓 Diploma - {}", target.title),
            html: diploma_html(&target.full_name, &target.title),
            attachments: vec![MailAttachment {
                filename: format!("Diploma_{}.pdf", target.full_name),
                content_type: "application/pdf".to_string(),
                content: pdf,
                inline_cid: None,
            }],
        })
        .await?;

    diploma_repo::upsert_dispatched(pool, target.enrollment_id, DELIVERY_REF_EMAIL).await?;

    Ok(target.email)
}

/// Activities the email may request a diploma for; the disambiguation
/// helper behind the diploma form.
pub async fn eligible_activities(
    pool: &SqlitePool,
    email: &str,
) -> Result<Vec<EligibleActivityView>, WorkflowError> {
    let eligible = eligible_enrollments(pool, email, None).await?;
    if eligible.is_empty() {
        return Err(WorkflowError::NotFound(
            "No se encontraron actividades inscritas para este usuario.".to_string(),
        ));
    }
    Ok(eligible
        .into_iter()
        .map(|row| EligibleActivityView {
            activity_id: row.activity_id,
            title: row.title,
        })
        .collect())
}

async fn eligible_enrollments(
    pool: &SqlitePool,
    email: &str,
    activity_id: Option<i64>,
) -> Result<Vec<EligibleEnrollmentRow>, WorkflowError> {
    if email.trim().is_empty() {
        return Err(WorkflowError::Validation(
            "Falta el correo del usuario".to_string(),
        ));
    }

    let rows = enrollment_repo::list_enrollments_by_email(pool, email, activity_id).await?;
    Ok(rows
        .into_iter()
        .filter(|row| match EnrollmentStatus::parse(&row.status) {
            Some(status) => is_diploma_eligible(status),
            None => {
                warn!(enrollment_id = row.enrollment_id, status = %row.status, "estado desconocido, inscripción omitida");
                false
            }
        })
        .collect())
}

fn diploma_html(full_name: &str, activity_title: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; text-align:center;">
  <h2>¡Felicidades {full_name}!</h2>
  <p>Has completado exitosamente la actividad:</p>
  <h3>{activity_title}</h3>
  <p>Adjunto encontrarás tu diploma en formato PDF.</p>
  <p style="color:#888;">Atentamente,<br>Equipo del Congreso de Tecnología</p>
</div>"#
    )
}
