//! Per-view workflow state.
//!
//! DESIGN
//! ======
//! Each view owns one plain state struct. Network-bound actions are split into
//! a synchronous `begin_*` step that validates and builds the request, and a
//! `finish_*` step that folds the result back in. Frontends that cannot hold a
//! `&mut` borrow across an await (reactive signals) call the two halves around
//! their own request; everything else uses the async convenience method that
//! chains them.

pub mod form;
pub mod list;
pub mod notice;
pub mod ongoing;
pub mod validation;
pub mod variables;

pub use form::{ExperimentForm, SubmitError, SubmitStatus};
pub use list::{ExperimentList, ListEntry, ListError, ListStatus};
pub use notice::{Notice, NoticeKind};
pub use ongoing::{AdvanceRejected, FitnessScores, FitnessSlot, LoadError, OngoingExperiment, Phase};
pub use validation::{Bound, FormError};
pub use variables::{VariableCollection, VariableDraft, VariableEdit};
