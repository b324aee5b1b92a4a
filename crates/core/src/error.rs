use obgyn_records::RecordsError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot resolve field path '{path}': {reason}")]
    PathResolution { path: String, reason: String },
    #[error("field '{path}' holds {expected} values, got {found}")]
    FieldKindMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("'{value}' is not an allowed value for '{path}'")]
    InvalidChoice { path: String, value: String },

    #[error("no {list} entry with id {id}")]
    EntryNotFound { list: &'static str, id: String },

    #[error("{0} is not in edit mode")]
    NotEditing(&'static str),
    #[error("no ANC case has been started")]
    NoActiveCase,
    #[error("an ANC case already exists for this patient")]
    CaseAlreadyOpen,
    #[error("no gynecology visit is open")]
    NoCurrentVisit,
    #[error("no profile edit is in progress")]
    NoProfileDraft,
    #[error("no patient is open")]
    NoPatientOpen,

    #[error("records error: {0}")]
    Records(#[from] RecordsError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
