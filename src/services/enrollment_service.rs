use sqlx::SqlitePool;

use crate::database::{account_repo, activity_repo, enrollment_repo};
use crate::models::{ActivityRow, EnrollmentDetailRow, EnrollmentStatus};
use crate::services::error::WorkflowError;
use crate::services::mailer::{MailAttachment, Mailer, OutgoingMail};
use crate::services::qr;

#[derive(Debug)]
pub struct EnrollmentConfirmation {
    pub enrollment_id: i64,
    pub recipient: String,
}

#[derive(Debug)]
pub enum ScanOutcome {
    /// First scan: the enrollment just transitioned to attended.
    Confirmed(EnrollmentDetailRow),
    /// Repeated scan (or a racing duplicate): no state change.
    AlreadyConfirmed(EnrollmentDetailRow),
}

/// Enroll the attendee, then send the confirmation email with the QR code
/// embedded inline. One new row, one outbound mail.
pub async fn enroll(
    pool: &SqlitePool,
    mailer: &dyn Mailer,
    attendee_id: i64,
    activity_id: i64,
) -> Result<EnrollmentConfirmation, WorkflowError> {
    if enrollment_repo::enrollment_exists(pool, attendee_id, activity_id).await? {
        return Err(WorkflowError::Conflict(
            "Ya estás inscrito en esta actividad".to_string(),
        ));
    }

    let contact = account_repo::load_attendee_contact(pool, attendee_id).await?;
    let activity = activity_repo::load_activity_by_id(pool, activity_id).await?;
    let (Some(contact), Some(activity)) = (contact, activity) else {
        return Err(WorkflowError::NotFound("Datos incompletos".to_string()));
    };

    let enrollment_id = enrollment_repo::insert_enrollment(pool, attendee_id, activity_id).await?;

    let payload = qr::encode_payload(enrollment_id, &contact.full_name, &activity.title);
    let qr_png = qr::render_png(&payload)?;
    let qr_cid = format!("qr-{}@congreso", enrollment_id);

    mailer
        .send(OutgoingMail {
            to: contact.email.clone(),
            subject: format!("Confirmación de inscripción: {}", activity.title),
            html: confirmation_html(&contact.full_name, &activity, &qr_cid),
            attachments: vec![MailAttachment {
                filename: "qr.png".to_string(),
                content_type: "image/png".to_string(),
                content: qr_png,
                inline_cid: Some(qr_cid),
            }],
        })
        .await?;

    Ok(EnrollmentConfirmation {
        enrollment_id,
        recipient: contact.email,
    })
}

/// Attendance state machine: `enrolled → attended`, exactly once. The
/// transition is a guarded update at the storage layer, so two scans of
/// the same code racing each other still produce one success and one
/// warning.
pub async fn confirm_attendance(
    pool: &SqlitePool,
    scanned: &str,
) -> Result<ScanOutcome, WorkflowError> {
    let Some(enrollment_id) = qr::enrollment_id_from_scan(scanned) else {
        return Err(WorkflowError::Validation("Código inválido".to_string()));
    };

    let Some(mut detail) = enrollment_repo::load_enrollment_detail(pool, enrollment_id).await?
    else {
        return Err(WorkflowError::NotFound("Código no encontrado".to_string()));
    };

    let status = EnrollmentStatus::parse(&detail.status).ok_or_else(|| {
        WorkflowError::Internal(format!("estado de inscripción desconocido: {}", detail.status))
    })?;
    if status == EnrollmentStatus::Attended {
        return Ok(ScanOutcome::AlreadyConfirmed(detail));
    }

    let affected = enrollment_repo::confirm_attendance(pool, enrollment_id).await?;
    detail.status = EnrollmentStatus::Attended.as_str().to_string();
    if affected == 0 {
        // A concurrent scan won the transition between our read and the update.
        return Ok(ScanOutcome::AlreadyConfirmed(detail));
    }

    Ok(ScanOutcome::Confirmed(detail))
}

fn confirmation_html(full_name: &str, activity: &ActivityRow, qr_cid: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; color: #333;">
  <h2 style="color: #007bff;">🎟️ Confirmación de Inscripción</h2>
  <p>Hola <b>{full_name}</b>,</p>
  <p>Tu inscripción a la siguiente actividad ha sido confirmada:</p>
  <table style="border-collapse: collapse; width: 100%; margin-top: 10px;">
    <tr><td><b>Actividad:</b></td><td>{title}</td></tr>
    <tr><td><b>Fecha:</b></td><td>{scheduled_date}</td></tr>
    <tr><td><b>Horario:</b></td><td>{starts_at} - {ends_at}</td></tr>
    <tr><td><b>Lugar:</b></td><td>{location}</td></tr>
  </table>
  <p style="margin-top: 20px;">Presenta este código QR al ingresar:</p>
  <div style="text-align: center; margin: 20px 0;">
    <img src="cid:{qr_cid}" alt="Código QR" width="200" height="200" />
  </div>
  <p style="font-size: 14px; color: #555;">Nos vemos pronto 👋<br><b>Congreso de Tecnología</b></p>
</div>"#,
        full_name = full_name,
        title = activity.title,
        scheduled_date = activity.scheduled_date,
        starts_at = activity.starts_at,
        ends_at = activity.ends_at,
        location = activity.location,
        qr_cid = qr_cid,
    )
}
