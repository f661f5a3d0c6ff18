//! Experiment form state and submission.
//!
//! DESIGN
//! ======
//! The form keeps raw text for every field and only produces a
//! [`NewExperiment`] once validation passes. A successful save resets the form
//! to a fresh draft; a failed save leaves it populated so the user can retry.
//! Only one save may be in flight.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use super::notice::{self, Notice};
use super::validation::{FormError, parse_population_size};
use super::variables::VariableCollection;
use crate::api::{ApiError, ExperimentClient, Transport};
use crate::identity::{AuthError, Identity, Session};
use crate::model::{Goal, NewExperiment, Population, VariableSpec};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Saved {
        experiment_id: Option<String>,
    },
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a save is already in progress")]
    InFlight,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("form has {} validation error(s)", .0.len())]
    Invalid(Vec<FormError>),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExperimentForm {
    pub name: String,
    pub goal: Goal,
    pub population_size: String,
    pub variables: VariableCollection,
    pub status: SubmitStatus,
    pub errors: Vec<FormError>,
    pub notice: Option<Notice>,
}

impl ExperimentForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Validate every field, returning all problems at once.
    ///
    /// # Errors
    ///
    /// Returns the list of [`FormError`]s when any field is invalid.
    pub fn validate(&self) -> Result<(String, u32, Vec<VariableSpec>), Vec<FormError>> {
        let mut errors = Vec::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FormError::MissingName);
        }
        let size = parse_population_size(&self.population_size).map_err(|error| errors.push(error));
        let specs = self.variables.parse_all().map_err(|found| errors.extend(found));
        match (size, specs) {
            (Ok(size), Ok(specs)) if errors.is_empty() => Ok((name.to_owned(), size, specs)),
            _ => Err(errors),
        }
    }

    /// Request body for `identity`, or the validation errors.
    ///
    /// # Errors
    ///
    /// Returns the list of [`FormError`]s when any field is invalid.
    pub fn build_request(&self, identity: &Identity) -> Result<NewExperiment, Vec<FormError>> {
        let (experiment_name, population_size, specs) = self.validate()?;
        Ok(NewExperiment {
            user_id: identity.user_id.clone(),
            experiment_name,
            variables: specs.iter().map(VariableSpec::to_wire).collect(),
            goal: self.goal,
            population_size,
            population: Population::default(),
        })
    }

    /// Validate and mark the form as saving.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] while a save is pending, then
    /// [`SubmitError::Invalid`] for validation failures, then
    /// [`SubmitError::Auth`] when no identity is available. None of these
    /// reach the network.
    pub fn begin_submit(&mut self, session: &Session) -> Result<NewExperiment, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        if let Err(errors) = self.validate() {
            tracing::debug!(count = errors.len(), "experiment form rejected");
            self.errors.clone_from(&errors);
            self.notice = Some(Notice::error(notice::VALIDATION_FAILED));
            return Err(SubmitError::Invalid(errors));
        }
        self.errors.clear();
        let identity = match session.require() {
            Ok(identity) => identity,
            Err(error) => {
                self.notice = Some(Notice::error(notice::IDENTITY_UNAVAILABLE));
                return Err(error.into());
            }
        };
        let body = self.build_request(identity).map_err(SubmitError::Invalid)?;
        self.notice = None;
        self.status = SubmitStatus::Submitting;
        Ok(body)
    }

    /// Fold the create result back into the form.
    ///
    /// # Errors
    ///
    /// Passes an API failure through as [`SubmitError::Api`] after setting
    /// the failure notice.
    pub fn finish_submit(&mut self, result: Result<Option<String>, ApiError>) -> Result<Option<String>, SubmitError> {
        match result {
            Ok(experiment_id) => {
                *self = Self {
                    status: SubmitStatus::Saved { experiment_id: experiment_id.clone() },
                    notice: Some(Notice::success(notice::SAVE_SUCCEEDED)),
                    ..Self::default()
                };
                Ok(experiment_id)
            }
            Err(error) => {
                tracing::warn!(%error, "experiment save failed");
                self.status = SubmitStatus::Failed;
                self.notice = Some(Notice::error(notice::SAVE_FAILED));
                Err(error.into())
            }
        }
    }

    /// Validate, send exactly one create request, and fold in the result.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_submit`] and [`Self::finish_submit`].
    pub async fn submit<T: Transport>(
        &mut self,
        client: &ExperimentClient<T>,
        session: &Session,
    ) -> Result<Option<String>, SubmitError> {
        let body = self.begin_submit(session)?;
        let result = client.create_experiment(&body).await;
        self.finish_submit(result)
    }
}
