use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use congreso::database::{diploma_repo, enrollment_repo};
use congreso::services::diploma_service;
use congreso::services::enrollment_service::{self, ScanOutcome};
use congreso::services::error::WorkflowError;
use congreso::services::mailer::{MailError, Mailer, OutgoingMail};

/// Captures outbound mail instead of talking to an SMTP relay.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

/// A mailer whose relay is down; every send fails.
struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _mail: OutgoingMail) -> Result<(), MailError> {
        Err(MailError::Transport("conexión rechazada".to_string()))
    }
}

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

async fn seed_attendee(pool: &SqlitePool, full_name: &str, email: &str) -> i64 {
    let account_id = sqlx::query("INSERT INTO accounts (email, password_hash, role) VALUES (?1, 'x', 'estudiante')")
        .bind(email)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid();
    sqlx::query("INSERT INTO attendees (account_id, full_name) VALUES (?1, ?2)")
        .bind(account_id)
        .bind(full_name)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

async fn seed_activity(pool: &SqlitePool, title: &str, capacity: i64) -> i64 {
    sqlx::query(
        "INSERT INTO activities (title, description, scheduled_date, starts_at, ends_at, location, capacity)
         VALUES (?1, 'taller', '2026-09-12', '09:00', '11:00', 'Auditorio 1', ?2)",
    )
    .bind(title)
    .bind(capacity)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

async fn status_of(pool: &SqlitePool, enrollment_id: i64) -> String {
    enrollment_repo::load_enrollment_detail(pool, enrollment_id)
        .await
        .unwrap()
        .unwrap()
        .status
}

#[tokio::test]
async fn enrolling_twice_yields_success_then_conflict() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;
    let activity = seed_activity(&pool, "Taller de Rust", 10).await;

    let confirmation = enrollment_service::enroll(&pool, &mailer, attendee, activity)
        .await
        .unwrap();
    assert_eq!(confirmation.recipient, "ana@example.org");
    assert_eq!(mailer.sent().len(), 1);

    let err = enrollment_service::enroll(&pool, &mailer, attendee, activity)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Conflict(_)));
    assert_eq!(mailer.sent().len(), 1, "el conflicto no debe enviar correo");
}

#[tokio::test]
async fn enrolling_in_missing_activity_sends_no_mail() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;

    let err = enrollment_service::enroll(&pool, &mailer, attendee, 999)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(_)));
    assert!(mailer.sent().is_empty());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM enrollments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "sin datos completos no se crea la inscripción");
}

#[tokio::test]
async fn scan_transitions_exactly_once() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;
    let activity = seed_activity(&pool, "Taller de Rust", 10).await;
    let confirmation = enrollment_service::enroll(&pool, &mailer, attendee, activity)
        .await
        .unwrap();
    let code = confirmation.enrollment_id.to_string();

    let first = enrollment_service::confirm_attendance(&pool, &code).await.unwrap();
    assert!(matches!(first, ScanOutcome::Confirmed(_)));
    assert_eq!(status_of(&pool, confirmation.enrollment_id).await, "attended");

    let second = enrollment_service::confirm_attendance(&pool, &code).await.unwrap();
    assert!(matches!(second, ScanOutcome::AlreadyConfirmed(_)));
    assert_eq!(status_of(&pool, confirmation.enrollment_id).await, "attended");
}

#[tokio::test]
async fn scan_accepts_the_full_qr_payload() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;
    let activity = seed_activity(&pool, "Taller de Rust", 10).await;
    let confirmation = enrollment_service::enroll(&pool, &mailer, attendee, activity)
        .await
        .unwrap();

    let payload = format!(
        "INSCRIPCION-{}-Ana López-Taller de Rust",
        confirmation.enrollment_id
    );
    let outcome = enrollment_service::confirm_attendance(&pool, &payload).await.unwrap();
    assert!(matches!(outcome, ScanOutcome::Confirmed(_)));
}

#[tokio::test]
async fn unknown_and_malformed_codes_never_mutate_storage() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;
    let activity = seed_activity(&pool, "Taller de Rust", 10).await;
    let confirmation = enrollment_service::enroll(&pool, &mailer, attendee, activity)
        .await
        .unwrap();

    let err = enrollment_service::confirm_attendance(&pool, "sin-sentido").await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let err = enrollment_service::confirm_attendance(&pool, "999").await.unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(_)));

    assert_eq!(status_of(&pool, confirmation.enrollment_id).await, "enrolled");
}

#[tokio::test]
async fn diploma_issuance_upserts_a_single_record() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;
    let activity = seed_activity(&pool, "Taller de Rust", 10).await;
    let confirmation = enrollment_service::enroll(&pool, &mailer, attendee, activity)
        .await
        .unwrap();

    for _ in 0..3 {
        let recipient = diploma_service::issue(&pool, &mailer, "ana@example.org", None)
            .await
            .unwrap();
        assert_eq!(recipient, "ana@example.org");
    }

    let record = diploma_repo::load_by_enrollment(&pool, confirmation.enrollment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.dispatched, 1);
    assert_eq!(record.delivery_ref.as_deref(), Some("enviado_por_correo"));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM diplomas")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn diploma_for_unknown_email_sends_nothing() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();

    let err = diploma_service::issue(&pool, &mailer, "nadie@example.org", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(_)));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn ambiguous_diploma_request_requires_an_activity_filter() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;
    let rust = seed_activity(&pool, "Taller de Rust", 10).await;
    let seguridad = seed_activity(&pool, "Ciberseguridad", 10).await;
    enrollment_service::enroll(&pool, &mailer, attendee, rust).await.unwrap();
    enrollment_service::enroll(&pool, &mailer, attendee, seguridad).await.unwrap();
    let confirmations = mailer.sent().len();

    let err = diploma_service::issue(&pool, &mailer, "ana@example.org", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Disambiguation(_)));
    assert_eq!(mailer.sent().len(), confirmations, "sin diploma por correo");

    diploma_service::issue(&pool, &mailer, "ana@example.org", Some(rust))
        .await
        .unwrap();
    assert_eq!(mailer.sent().len(), confirmations + 1);
}

#[tokio::test]
async fn failed_send_leaves_no_diploma_record() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;
    let activity = seed_activity(&pool, "Taller de Rust", 10).await;
    let confirmation = enrollment_service::enroll(&pool, &mailer, attendee, activity)
        .await
        .unwrap();

    let err = diploma_service::issue(&pool, &FailingMailer, "ana@example.org", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Mail(_)));

    let record = diploma_repo::load_by_enrollment(&pool, confirmation.enrollment_id)
        .await
        .unwrap();
    assert!(record.is_none(), "el upsert solo ocurre tras un envío exitoso");
}

#[tokio::test]
async fn eligible_activities_lists_enrollments_for_the_email() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Ana López", "ana@example.org").await;
    let rust = seed_activity(&pool, "Taller de Rust", 10).await;
    enrollment_service::enroll(&pool, &mailer, attendee, rust).await.unwrap();

    let activities = diploma_service::eligible_activities(&pool, "ana@example.org")
        .await
        .unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].activity_id, rust);
    assert_eq!(activities[0].title, "Taller de Rust");

    let err = diploma_service::eligible_activities(&pool, "nadie@example.org")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(_)));
}

/// End-to-end pass over the whole workflow: enroll, scan, re-scan,
/// request the diploma.
#[tokio::test]
async fn full_registration_scenario() {
    let pool = test_pool().await;
    let mailer = RecordingMailer::default();
    let attendee = seed_attendee(&pool, "Usuario Diecisiete", "u17@example.org").await;
    let activity = seed_activity(&pool, "Actividad Tres", 10).await;

    // Enroll: one email with the QR inline.
    let confirmation = enrollment_service::enroll(&pool, &mailer, attendee, activity)
        .await
        .unwrap();
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    let mail = &sent[0];
    assert_eq!(mail.to, "u17@example.org");
    assert!(mail.subject.contains("Actividad Tres"));
    assert_eq!(mail.attachments.len(), 1);
    assert_eq!(
        mail.attachments[0].inline_cid.as_deref(),
        Some(format!("qr-{}@congreso", confirmation.enrollment_id).as_str())
    );
    assert!(mail.html.contains("Usuario Diecisiete"));

    // First scan: success, status becomes attended.
    let outcome = enrollment_service::confirm_attendance(
        &pool,
        &confirmation.enrollment_id.to_string(),
    )
    .await
    .unwrap();
    let ScanOutcome::Confirmed(detail) = outcome else {
        panic!("el primer escaneo debe confirmar");
    };
    assert_eq!(detail.status, "attended");
    assert_eq!(detail.full_name, "Usuario Diecisiete");

    // Second scan: warning, status untouched.
    let outcome = enrollment_service::confirm_attendance(
        &pool,
        &confirmation.enrollment_id.to_string(),
    )
    .await
    .unwrap();
    assert!(matches!(outcome, ScanOutcome::AlreadyConfirmed(_)));
    assert_eq!(status_of(&pool, confirmation.enrollment_id).await, "attended");

    // Diploma restricted to the activity: one PDF mailed, one record.
    let recipient = diploma_service::issue(&pool, &mailer, "u17@example.org", Some(activity))
        .await
        .unwrap();
    assert_eq!(recipient, "u17@example.org");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    let diploma_mail = &sent[1];
    assert_eq!(diploma_mail.attachments.len(), 1);
    assert_eq!(diploma_mail.attachments[0].content_type, "application/pdf");
    assert!(diploma_mail.attachments[0].content.starts_with(b"%PDF-"));

    let record = diploma_repo::load_by_enrollment(&pool, confirmation.enrollment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.dispatched, 1);
}
