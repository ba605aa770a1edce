use sqlx::SqlitePool;

use crate::models::DiplomaRow;

// Upsert keyed on the enrollment: a repeated diploma request updates the
// existing row instead of inserting a duplicate.
const SQL_UPSERT_DISPATCHED: &str = r#"
INSERT INTO diplomas (enrollment_id, dispatched, delivery_ref, updated_at)
VALUES (?1, 1, ?2, datetime('now'))
ON CONFLICT (enrollment_id) DO UPDATE SET
    dispatched = 1,
    delivery_ref = excluded.delivery_ref,
    updated_at = excluded.updated_at
"#;

const SQL_LOAD_BY_ENROLLMENT: &str = r#"
SELECT diploma_id, enrollment_id, dispatched, delivery_ref, updated_at
FROM diplomas
WHERE enrollment_id = ?1
LIMIT 1
"#;

pub async fn upsert_dispatched(
    pool: &SqlitePool,
    enrollment_id: i64,
    delivery_ref: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_DISPATCHED)
        .bind(enrollment_id)
        .bind(delivery_ref)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn load_by_enrollment(
    pool: &SqlitePool,
    enrollment_id: i64,
) -> sqlx::Result<Option<DiplomaRow>> {
    sqlx::query_as::<_, DiplomaRow>(SQL_LOAD_BY_ENROLLMENT)
        .bind(enrollment_id)
        .fetch_optional(pool)
        .await
}
