use serde::Serialize;

/// Closed set of enrollment states. Stored as TEXT; anything else in the
/// column is treated as corrupt data, not silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStatus {
    Enrolled,
    Attended,
    Confirmed,
    Completed,
    Approved,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 5] = [
        EnrollmentStatus::Enrolled,
        EnrollmentStatus::Attended,
        EnrollmentStatus::Confirmed,
        EnrollmentStatus::Completed,
        EnrollmentStatus::Approved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "enrolled",
            EnrollmentStatus::Attended => "attended",
            EnrollmentStatus::Confirmed => "confirmed",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Approved => "approved",
        }
    }

    pub fn parse(value: &str) -> Option<EnrollmentStatus> {
        match value {
            "enrolled" => Some(EnrollmentStatus::Enrolled),
            "attended" => Some(EnrollmentStatus::Attended),
            "confirmed" => Some(EnrollmentStatus::Confirmed),
            "completed" => Some(EnrollmentStatus::Completed),
            "approved" => Some(EnrollmentStatus::Approved),
            _ => None,
        }
    }
}

/// Single home of the diploma eligibility rule. The set is deliberately
/// broad: every known status qualifies, including plain `enrolled`.
pub fn is_diploma_eligible(status: EnrollmentStatus) -> bool {
    matches!(
        status,
        EnrollmentStatus::Enrolled
            | EnrollmentStatus::Attended
            | EnrollmentStatus::Confirmed
            | EnrollmentStatus::Completed
            | EnrollmentStatus::Approved
    )
}

/// Enrollment joined with attendee and activity, as shown to the scanner.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EnrollmentDetailRow {
    pub enrollment_id: i64,
    pub status: String,
    pub full_name: String,
    pub email: String,
    pub title: String,
    pub scheduled_date: String,
    pub starts_at: String,
    pub ends_at: String,
    pub location: String,
}

/// Candidate row for diploma issuance, before the eligibility predicate
/// has been applied.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EligibleEnrollmentRow {
    pub enrollment_id: i64,
    pub activity_id: i64,
    pub status: String,
    pub full_name: String,
    pub email: String,
    pub title: String,
}
