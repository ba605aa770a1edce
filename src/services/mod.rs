pub mod account_service;
pub mod activity_service;
pub mod diploma_renderer;
pub mod diploma_service;
pub mod enrollment_service;
pub mod error;
pub mod mailer;
pub mod qr;
pub mod session;
