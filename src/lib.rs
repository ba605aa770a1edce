use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::mailer::Mailer;
use crate::services::session::SessionKeys;

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod web;

/// Shared handler state: one pool, one mail transport, one set of session keys.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub mailer: Arc<dyn Mailer>,
    pub sessions: SessionKeys,
}
