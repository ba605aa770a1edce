#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRow {
    pub account_id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendeeRow {
    pub attendee_id: i64,
    pub account_id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub institution: Option<String>,
    pub student_card: Option<String>,
}

/// Name + address pair used when addressing outbound mail.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendeeContactRow {
    pub full_name: String,
    pub email: String,
}
