#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub activity_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: String,
    pub starts_at: String,
    pub ends_at: String,
    pub location: String,
    pub capacity: i64,
}

/// Listing row enriched for one attendee: how many are enrolled and
/// whether the attendee already holds an enrollment.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityOverviewRow {
    pub activity_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: String,
    pub starts_at: String,
    pub ends_at: String,
    pub location: String,
    pub capacity: i64,
    pub enrolled_count: i64,
    pub already_enrolled: i64,
}
