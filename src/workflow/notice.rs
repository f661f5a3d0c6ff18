//! User-facing notices and their fixed wording.
//!
//! Detailed failure causes only go to the log; views show one of the static
//! messages below.

pub use crate::identity::IDENTITY_UNAVAILABLE;

pub const SAVE_SUCCEEDED: &str = "Experiment saved successfully.";
pub const SAVE_FAILED: &str = "Failed to save experiment";
pub const LIST_FAILED: &str = "Failed to load experiments";
pub const LIST_EMPTY: &str = "No experiments found.";
pub const DELETE_SUCCEEDED: &str = "Experiment deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete experiment";
pub const LOAD_FAILED: &str = "Failed to load experiment";
pub const POPULATION_EMPTY: &str = "No population generated yet.";
pub const FITNESS_INCOMPLETE: &str =
    "Please enter a fitness score for every population member before generating the next generation.";
pub const ADVANCE_FAILED: &str = "Failed to generate next generation";
pub const VALIDATION_FAILED: &str = "Please fix the highlighted fields before saving.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    /// CSS modifier used by the browser client.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "notice--success",
            Self::Error => "notice--error",
            Self::Info => "notice--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: &str) -> Self {
        Self { kind: NoticeKind::Success, message: message.to_owned() }
    }

    #[must_use]
    pub fn error(message: &str) -> Self {
        Self { kind: NoticeKind::Error, message: message.to_owned() }
    }

    #[must_use]
    pub fn info(message: &str) -> Self {
        Self { kind: NoticeKind::Info, message: message.to_owned() }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
