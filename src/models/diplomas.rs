#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DiplomaRow {
    pub diploma_id: i64,
    pub enrollment_id: i64,
    pub dispatched: i64,
    pub delivery_ref: Option<String>,
    pub updated_at: String,
}
