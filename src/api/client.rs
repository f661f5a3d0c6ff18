//! Experiment operations over a [`Transport`].
//!
//! ERROR HANDLING
//! ==============
//! Every operation returns `Result<_, ApiError>`. Views turn any error into a
//! static notice; the detailed error text only goes to the log.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use super::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::envelope::{self, EnvelopeError, ExperimentDetail, ExperimentPage};
use crate::identity::Identity;
use crate::model::{AdvanceRequest, AdvanceResponse, Experiment, NewExperiment, ShapeError};

const EXPERIMENTS_PATH: &str = "/experiments";
const ONGOING_PATH: &str = "/experiments/ongoing";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("malformed response: {0}")]
    Malformed(#[from] EnvelopeError),
    #[error("malformed population: {0}")]
    Population(#[from] ShapeError),
    #[error("request body could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Typed access to the experiment endpoints.
#[derive(Debug, Clone)]
pub struct ExperimentClient<T> {
    transport: T,
}

impl<T: Transport> ExperimentClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /experiments`. Returns the assigned id when the response
    /// carries one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn create_experiment(&self, experiment: &NewExperiment) -> Result<Option<String>, ApiError> {
        let response = self.exchange(create_request(experiment)?).await?;
        let id = envelope::created_experiment_id(&response.body);
        tracing::info!(experiment_id = ?id, name = %experiment.experiment_name, "experiment created");
        Ok(id)
    }

    /// `GET /experiments?userId=` for the given identity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status, or a
    /// malformed envelope.
    pub async fn list_experiments(&self, identity: &Identity) -> Result<Vec<Experiment>, ApiError> {
        let response = self.exchange(list_request(&identity.user_id)).await?;
        let page: ExperimentPage = envelope::decode(&response.body)?;
        let experiments = page.experiments;
        tracing::debug!(count = experiments.len(), "experiments listed");
        Ok(experiments)
    }

    /// `GET /experiments?experimentId=`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status, a
    /// malformed envelope, or a population that does not match the
    /// experiment's variables.
    pub async fn fetch_experiment(&self, experiment_id: &str) -> Result<Experiment, ApiError> {
        let response = self.exchange(fetch_request(experiment_id)).await?;
        let detail: ExperimentDetail = envelope::decode(&response.body)?;
        let experiment = detail.experiment;
        experiment.population.check_shape(Some(experiment.variables.len()))?;
        if experiment.exceeds_population_size() {
            tracing::warn!(
                experiment_id,
                rows = experiment.population.len(),
                population_size = experiment.population_size,
                "population has more rows than the configured size"
            );
        }
        Ok(experiment)
    }

    /// `DELETE /experiments?experimentId=`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn delete_experiment(&self, experiment_id: &str) -> Result<(), ApiError> {
        self.exchange(delete_request(experiment_id)).await?;
        tracing::info!(experiment_id, "experiment deleted");
        Ok(())
    }

    /// `POST /experiments/ongoing?experimentId=` with the scored population.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status, a
    /// response that is not the flat `{ population, fitnessScores? }` shape,
    /// or a ragged population.
    pub async fn advance_generation(
        &self,
        experiment_id: &str,
        request: &AdvanceRequest,
    ) -> Result<AdvanceResponse, ApiError> {
        let response = self.exchange(advance_request(experiment_id, request)?).await?;
        let next: AdvanceResponse = envelope::decode(&response.body)?;
        next.population.check_shape(None)?;
        tracing::info!(experiment_id, rows = next.population.len(), "generation advanced");
        Ok(next)
    }

    async fn exchange(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path;
        tracing::debug!(method, path, "api request");
        let response = self.transport.send(request).await.inspect_err(|error| {
            tracing::warn!(method, path, %error, "api transport failure");
        })?;
        if !response.is_success() {
            tracing::warn!(method, path, status = response.status, "api request rejected");
            return Err(ApiError::Status { status: response.status });
        }
        Ok(response)
    }
}

fn create_request(experiment: &NewExperiment) -> Result<ApiRequest, ApiError> {
    Ok(ApiRequest::new(Method::Post, EXPERIMENTS_PATH).json(serde_json::to_value(experiment)?))
}

fn list_request(user_id: &str) -> ApiRequest {
    ApiRequest::new(Method::Get, EXPERIMENTS_PATH).query("userId", user_id)
}

fn fetch_request(experiment_id: &str) -> ApiRequest {
    ApiRequest::new(Method::Get, EXPERIMENTS_PATH).query("experimentId", experiment_id)
}

fn delete_request(experiment_id: &str) -> ApiRequest {
    ApiRequest::new(Method::Delete, EXPERIMENTS_PATH).query("experimentId", experiment_id)
}

fn advance_request(experiment_id: &str, request: &AdvanceRequest) -> Result<ApiRequest, ApiError> {
    Ok(ApiRequest::new(Method::Post, ONGOING_PATH)
        .query("experimentId", experiment_id)
        .json(serde_json::to_value(request)?))
}
