use sqlx::SqlitePool;

use crate::models::{EligibleEnrollmentRow, EnrollmentDetailRow};

const SQL_ENROLLMENT_EXISTS: &str = r#"
SELECT 1 FROM enrollments WHERE attendee_id = ?1 AND activity_id = ?2
"#;

const SQL_INSERT_ENROLLMENT: &str = r#"
INSERT INTO enrollments (attendee_id, activity_id, status)
VALUES (?1, ?2, 'enrolled')
"#;

const SQL_LOAD_ENROLLMENT_DETAIL: &str = r#"
SELECT
    e.enrollment_id,
    e.status,
    at.full_name,
    ac.email,
    a.title,
    a.scheduled_date,
    a.starts_at,
    a.ends_at,
    a.location
FROM enrollments e
JOIN attendees at ON at.attendee_id = e.attendee_id
JOIN accounts ac ON ac.account_id = at.account_id
JOIN activities a ON a.activity_id = e.activity_id
WHERE e.enrollment_id = ?1
LIMIT 1
"#;

// Guarded transition: only the first concurrent scan flips the row, every
// racing duplicate sees zero rows affected.
const SQL_CONFIRM_ATTENDANCE: &str = r#"
UPDATE enrollments
SET status = 'attended'
WHERE enrollment_id = ?1 AND status <> 'attended'
"#;

const SQL_LIST_ENROLLMENTS_BY_EMAIL: &str = r#"
SELECT
    e.enrollment_id,
    e.activity_id,
    e.status,
    at.full_name,
    ac.email,
    a.title
FROM enrollments e
JOIN attendees at ON at.attendee_id = e.attendee_id
JOIN accounts ac ON ac.account_id = at.account_id
JOIN activities a ON a.activity_id = e.activity_id
WHERE ac.email = ?1
ORDER BY a.scheduled_date, a.starts_at
"#;

const SQL_LIST_ENROLLMENTS_BY_EMAIL_AND_ACTIVITY: &str = r#"
SELECT
    e.enrollment_id,
    e.activity_id,
    e.status,
    at.full_name,
    ac.email,
    a.title
FROM enrollments e
JOIN attendees at ON at.attendee_id = e.attendee_id
JOIN accounts ac ON ac.account_id = at.account_id
JOIN activities a ON a.activity_id = e.activity_id
WHERE ac.email = ?1 AND e.activity_id = ?2
ORDER BY a.scheduled_date, a.starts_at
"#;

pub async fn enrollment_exists(
    pool: &SqlitePool,
    attendee_id: i64,
    activity_id: i64,
) -> sqlx::Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as(SQL_ENROLLMENT_EXISTS)
        .bind(attendee_id)
        .bind(activity_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn insert_enrollment(
    pool: &SqlitePool,
    attendee_id: i64,
    activity_id: i64,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ENROLLMENT)
        .bind(attendee_id)
        .bind(activity_id)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

pub async fn load_enrollment_detail(
    pool: &SqlitePool,
    enrollment_id: i64,
) -> sqlx::Result<Option<EnrollmentDetailRow>> {
    sqlx::query_as::<_, EnrollmentDetailRow>(SQL_LOAD_ENROLLMENT_DETAIL)
        .bind(enrollment_id)
        .fetch_optional(pool)
        .await
}

/// Returns the number of rows flipped to `attended` (0 or 1).
pub async fn confirm_attendance(pool: &SqlitePool, enrollment_id: i64) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_CONFIRM_ATTENDANCE)
        .bind(enrollment_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn list_enrollments_by_email(
    pool: &SqlitePool,
    email: &str,
    activity_id: Option<i64>,
) -> sqlx::Result<Vec<EligibleEnrollmentRow>> {
    match activity_id {
        Some(activity_id) => {
            sqlx::query_as::<_, EligibleEnrollmentRow>(SQL_LIST_ENROLLMENTS_BY_EMAIL_AND_ACTIVITY)
                .bind(email)
                .bind(activity_id)
                .fetch_all(pool)
                .await
        }
        None => {
            sqlx::query_as::<_, EligibleEnrollmentRow>(SQL_LIST_ENROLLMENTS_BY_EMAIL)
                .bind(email)
                .fetch_all(pool)
                .await
        }
    }
}
