use shared::error::{AppError, ErrorCode};
use shared::models::MAX_FEEDBACKS_PER_LEAD;
use thiserror::Error;

/// Engine errors
///
/// Every variant is a rejected operation: when a lifecycle call returns
/// `Err`, the store is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Lead not found: {0}")]
    LeadNotFound(String),

    #[error("Feedback not found: {feedback_id} (lead {lead_id})")]
    FeedbackNotFound { lead_id: String, feedback_id: String },

    #[error("Lead {0} already holds {max} feedback entries", max = MAX_FEEDBACKS_PER_LEAD)]
    FeedbackLimitReached(String),

    #[error("Invalid identifier or password")]
    InvalidCredentials,
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Stable code for the presentation layer
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::EmployeeNotFound(_) => ErrorCode::EmployeeNotFound,
            Self::LeadNotFound(_) => ErrorCode::LeadNotFound,
            Self::FeedbackNotFound { .. } => ErrorCode::FeedbackNotFound,
            Self::FeedbackLimitReached(_) => ErrorCode::FeedbackLimitReached,
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            EngineError::EmployeeNotFound(id) => {
                AppError::with_message(code, message).with_detail("employee_id", id)
            }
            EngineError::LeadNotFound(id) | EngineError::FeedbackLimitReached(id) => {
                AppError::with_message(code, message).with_detail("lead_id", id)
            }
            EngineError::FeedbackNotFound {
                lead_id,
                feedback_id,
            } => AppError::with_message(code, message)
                .with_detail("lead_id", lead_id)
                .with_detail("feedback_id", feedback_id),
            // 不泄露具体是账号还是密码错误
            EngineError::InvalidCredentials => AppError::invalid_credentials(),
            EngineError::Validation(_) => AppError::validation(message),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
