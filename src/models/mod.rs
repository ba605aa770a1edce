pub mod accounts;
pub mod activities;
pub mod diplomas;
pub mod enrollments;

pub use accounts::{AccountRow, AttendeeContactRow, AttendeeRow};
pub use activities::{ActivityOverviewRow, ActivityRow};
pub use diplomas::DiplomaRow;
pub use enrollments::{
    is_diploma_eligible, EligibleEnrollmentRow, EnrollmentDetailRow, EnrollmentStatus,
};
