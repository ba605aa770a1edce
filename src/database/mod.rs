pub mod account_repo;
pub mod activity_repo;
pub mod diploma_repo;
pub mod enrollment_repo;
