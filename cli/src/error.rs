use cloudlab::ConfigError;
use cloudlab::workflow::{AdvanceRejected, FormError, ListError, LoadError, SubmitError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("missing user id; pass --user-id or set CLOUDLAB_USER_ID")]
    MissingUserId,
    #[error("experiment rejected: {}", render_form_errors(.0))]
    Invalid(Vec<FormError>),
    #[error("save failed: {0}")]
    Submit(SubmitError),
    #[error("list failed: {0}")]
    List(ListError),
    #[error("could not load experiment: {0}")]
    Load(#[from] LoadError),
    #[error("generation not advanced: {0}")]
    Advance(#[from] AdvanceRejected),
    #[error("expected {expected} fitness score(s), one per population row, got {found}")]
    ScoreCount { expected: usize, found: usize },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SubmitError> for CliError {
    fn from(error: SubmitError) -> Self {
        match error {
            SubmitError::Invalid(errors) => Self::Invalid(errors),
            SubmitError::Auth(_) => Self::MissingUserId,
            other => Self::Submit(other),
        }
    }
}

impl From<ListError> for CliError {
    fn from(error: ListError) -> Self {
        match error {
            ListError::Auth(_) => Self::MissingUserId,
            other => Self::List(other),
        }
    }
}

fn render_form_errors(errors: &[FormError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
