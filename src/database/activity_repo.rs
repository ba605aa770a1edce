use sqlx::SqlitePool;

use crate::models::{ActivityOverviewRow, ActivityRow};

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT activity_id, title, description, scheduled_date, starts_at, ends_at, location, capacity
FROM activities
ORDER BY scheduled_date, starts_at
"#;

const SQL_LIST_ACTIVITIES_OVERVIEW: &str = r#"
SELECT
    a.activity_id,
    a.title,
    a.description,
    a.scheduled_date,
    a.starts_at,
    a.ends_at,
    a.location,
    a.capacity,
    COUNT(e.enrollment_id) AS enrolled_count,
    CASE WHEN EXISTS (
        SELECT 1
        FROM enrollments mine
        WHERE mine.activity_id = a.activity_id AND mine.attendee_id = ?1
    ) THEN 1 ELSE 0 END AS already_enrolled
FROM activities a
LEFT JOIN enrollments e ON e.activity_id = a.activity_id
GROUP BY a.activity_id
ORDER BY a.scheduled_date, a.starts_at
"#;

const SQL_LOAD_ACTIVITY_BY_ID: &str = r#"
SELECT activity_id, title, description, scheduled_date, starts_at, ends_at, location, capacity
FROM activities
WHERE activity_id = ?1
LIMIT 1
"#;

pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

pub async fn list_activities_overview(
    pool: &SqlitePool,
    attendee_id: i64,
) -> sqlx::Result<Vec<ActivityOverviewRow>> {
    sqlx::query_as::<_, ActivityOverviewRow>(SQL_LIST_ACTIVITIES_OVERVIEW)
        .bind(attendee_id)
        .fetch_all(pool)
        .await
}

pub async fn load_activity_by_id(
    pool: &SqlitePool,
    activity_id: i64,
) -> sqlx::Result<Option<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LOAD_ACTIVITY_BY_ID)
        .bind(activity_id)
        .fetch_optional(pool)
        .await
}
