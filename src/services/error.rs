use crate::services::mailer::MailError;

/// Failure taxonomy for the registration workflows. The first five
/// variants carry user-facing Spanish messages and map to 4xx responses;
/// the rest are dependency failures that the web layer logs and masks.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Disambiguation(String),
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("mail: {0}")]
    Mail(#[from] MailError),
    #[error("render: {0}")]
    Render(String),
    #[error("{0}")]
    Internal(String),
}

impl WorkflowError {
    /// True for the variants that should be reported verbatim to the
    /// caller; everything else is an internal failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            WorkflowError::Validation(_)
                | WorkflowError::Unauthorized(_)
                | WorkflowError::NotFound(_)
                | WorkflowError::Conflict(_)
                | WorkflowError::Disambiguation(_)
        )
    }
}
