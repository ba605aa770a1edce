use sqlx::SqlitePool;

use crate::models::{AccountRow, AttendeeContactRow, AttendeeRow};

const SQL_EMAIL_EXISTS: &str = r#"
SELECT 1 FROM accounts WHERE email = ?1
"#;

const SQL_INSERT_ACCOUNT: &str = r#"
INSERT INTO accounts (email, password_hash, role)
VALUES (?1, ?2, ?3)
"#;

const SQL_INSERT_ATTENDEE: &str = r#"
INSERT INTO attendees (account_id, full_name, phone, institution, student_card)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const SQL_LOAD_ACCOUNT_BY_EMAIL: &str = r#"
SELECT account_id, email, password_hash, role
FROM accounts
WHERE email = ?1
LIMIT 1
"#;

const SQL_LOAD_ATTENDEE_BY_ACCOUNT: &str = r#"
SELECT attendee_id, account_id, full_name, phone, institution, student_card
FROM attendees
WHERE account_id = ?1
LIMIT 1
"#;

const SQL_LOAD_ATTENDEE_CONTACT: &str = r#"
SELECT at.full_name, ac.email
FROM attendees at
JOIN accounts ac ON ac.account_id = at.account_id
WHERE at.attendee_id = ?1
LIMIT 1
"#;

pub async fn email_exists(pool: &SqlitePool, email: &str) -> sqlx::Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as(SQL_EMAIL_EXISTS)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn insert_account(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    role: &str,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ACCOUNT)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

pub async fn insert_attendee(
    pool: &SqlitePool,
    account_id: i64,
    full_name: &str,
    phone: Option<&str>,
    institution: Option<&str>,
    student_card: Option<&str>,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ATTENDEE)
        .bind(account_id)
        .bind(full_name)
        .bind(phone)
        .bind(institution)
        .bind(student_card)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

pub async fn load_account_by_email(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Option<AccountRow>> {
    sqlx::query_as::<_, AccountRow>(SQL_LOAD_ACCOUNT_BY_EMAIL)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn load_attendee_by_account(
    pool: &SqlitePool,
    account_id: i64,
) -> sqlx::Result<Option<AttendeeRow>> {
    sqlx::query_as::<_, AttendeeRow>(SQL_LOAD_ATTENDEE_BY_ACCOUNT)
        .bind(account_id)
        .fetch_optional(pool)
        .await
}

pub async fn load_attendee_contact(
    pool: &SqlitePool,
    attendee_id: i64,
) -> sqlx::Result<Option<AttendeeContactRow>> {
    sqlx::query_as::<_, AttendeeContactRow>(SQL_LOAD_ATTENDEE_CONTACT)
        .bind(attendee_id)
        .fetch_optional(pool)
        .await
}
