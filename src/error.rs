use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    ProjectNotFound,
    StepNotFound,
    TemplateNotFound,
    MemberNotFound,
    AmbiguousRef,
    ValidationError,
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::StepNotFound => "STEP_NOT_FOUND",
            Self::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TrackerError {
    pub code: ErrorCode,
    pub message: String,
}

impl TrackerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "reeltrack is not initialized. Run `reeltrack init` first.",
        )
    }

    pub fn project_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::ProjectNotFound,
            format!("Project not found: {reference}"),
        )
    }

    pub fn step_not_found(reference: &str) -> Self {
        Self::new(ErrorCode::StepNotFound, format!("Step not found: {reference}"))
    }

    pub fn template_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TemplateNotFound,
            format!("Workflow step not found: {reference}"),
        )
    }

    pub fn member_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::MemberNotFound,
            format!("Team member not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl From<rusqlite::Error> for TrackerError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(e: std::io::Error) -> Self {
        Self::database(e.to_string())
    }
}
