use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeadlineError {
    #[error("Assessment section not found in ECP. The page structure may have changed.")]
    SectionNotFound,
    #[error("Course code does not exist")]
    CourseNotFound,
    #[error("Course is not offered")]
    CourseNotOffered,
    #[error("No ECP available for this course")]
    NoProfileAvailable { course_code: String },
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Fetch(String),
    #[error("{0}")]
    Config(String),
}

impl DeadlineError {
    pub fn kind(&self) -> &'static str {
        match self {
            DeadlineError::SectionNotFound => "section_not_found",
            DeadlineError::CourseNotFound => "course_not_found",
            DeadlineError::CourseNotOffered => "course_not_offered",
            DeadlineError::NoProfileAvailable { .. } => "no_profile_available",
            DeadlineError::InvalidRequest(_) => "invalid_request",
            DeadlineError::Fetch(_) => "fetch",
            DeadlineError::Config(_) => "config",
        }
    }
}
