use hhub_kernel::server::ApiError;

/// Calendars slice error type.
///
/// Variants carry rendered detail instead of error sources so the type stays
/// `Clone`; the manager cache shares initialization errors across waiters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// No definition exists for the requested calendar id.
    #[error("Calendar '{0}' not found.")]
    UnknownCalendar(String),

    /// The calendar id contains characters outside `[A-Za-z0-9._-]`.
    #[error("Invalid calendar id '{0}'")]
    InvalidCalendarId(String),

    /// The definition file exists but could not be read.
    #[error("Failed to read calendar definition '{path}': {detail}")]
    DefinitionIo { path: String, detail: String },

    /// The definition file is not valid TOML of the expected shape.
    #[error("Malformed calendar definition '{path}': {detail}")]
    DefinitionParse { path: String, detail: String },

    /// The definition parsed but violates an invariant (bad month/day,
    /// duplicate region ids, id mismatch).
    #[error("Invalid calendar definition '{path}': {detail}")]
    DefinitionInvalid { path: String, detail: String },
}

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::UnknownCalendar(id) | CalendarError::InvalidCalendarId(id) => {
                Self::NotFound(format!("Calendar '{id}' not found."))
            },
            other => Self::Internal(other.to_string()),
        }
    }
}
