//! Ongoing experiment view: population display and generation advance.
//!
//! DESIGN
//! ======
//! The view walks `Loading -> Ready <-> Submitting`, or `Loading -> Failed`
//! when the fetch fails. Every population row gets one fitness slot; an
//! advance is only sent once every slot holds a finite number. Results are
//! tagged with the experiment id they were requested for, and anything
//! arriving for an id the view has since navigated away from is dropped.

#[cfg(test)]
#[path = "ongoing_test.rs"]
mod ongoing_test;

use super::notice::{self, Notice};
use super::validation::parse_finite;
use crate::api::{ApiError, ExperimentClient, Transport};
use crate::model::{AdvanceRequest, AdvanceResponse, Experiment, ShapeError};

/// One fitness input: the raw text and its parsed value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitnessSlot {
    text: String,
    value: Option<f64>,
}

impl FitnessSlot {
    fn from_value(value: f64) -> Self {
        Self { text: value.to_string(), value: Some(value) }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

/// Fitness scores for the displayed generation, one slot per row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitnessScores(Vec<FitnessSlot>);

impl FitnessScores {
    #[must_use]
    pub fn unset(len: usize) -> Self {
        Self(vec![FitnessSlot::default(); len])
    }

    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        Self(values.iter().copied().map(FitnessSlot::from_value).collect())
    }

    /// Store the typed text for row `index`. Text that is not a finite
    /// number leaves the slot unset. Returns `false` for an unknown row.
    pub fn set(&mut self, index: usize, text: &str) -> bool {
        let Some(slot) = self.0.get_mut(index) else {
            return false;
        };
        slot.text = text.to_owned();
        slot.value = parse_finite(text);
        true
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FitnessSlot> {
        self.0.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FitnessSlot> {
        self.0.iter()
    }

    /// Zero-based rows still missing a score.
    #[must_use]
    pub fn missing(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| (!slot.is_set()).then_some(index))
            .collect()
    }

    /// All values, or `None` while any slot is unset.
    #[must_use]
    pub fn complete(&self) -> Option<Vec<f64>> {
        self.0.iter().map(FitnessSlot::value).collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
    Submitting,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("response was for experiment `{0}`, which is no longer displayed")]
    Superseded(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Why a generation advance did not happen.
#[derive(Debug, thiserror::Error)]
pub enum AdvanceRejected {
    #[error("experiment is not loaded")]
    NotReady,
    #[error("a generation request is already in progress")]
    InFlight,
    #[error("fitness scores missing for rows {missing:?}")]
    MissingFitness { missing: Vec<usize> },
    #[error("response was for experiment `{0}`, which is no longer displayed")]
    Superseded(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OngoingExperiment {
    experiment_id: String,
    pub phase: Phase,
    pub experiment: Option<Experiment>,
    pub fitness: FitnessScores,
    pub notice: Option<Notice>,
}

impl OngoingExperiment {
    #[must_use]
    pub fn new(experiment_id: &str) -> Self {
        Self { experiment_id: experiment_id.to_owned(), ..Self::default() }
    }

    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Start showing `experiment_id`, discarding whatever was displayed.
    pub fn begin_load(&mut self, experiment_id: &str) {
        *self = Self::new(experiment_id);
    }

    /// Fold a fetch result in, unless it belongs to a superseded id.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Superseded`] for stale results (state untouched)
    /// and passes API failures through after moving to `Failed`.
    pub fn finish_load(&mut self, experiment_id: &str, result: Result<Experiment, ApiError>) -> Result<(), LoadError> {
        if experiment_id != self.experiment_id {
            tracing::debug!(experiment_id, current = %self.experiment_id, "dropping stale experiment load");
            return Err(LoadError::Superseded(experiment_id.to_owned()));
        }
        match result {
            Ok(experiment) => {
                self.fitness = FitnessScores::unset(experiment.population.len());
                self.experiment = Some(experiment);
                self.phase = Phase::Ready;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(experiment_id, %error, "experiment load failed");
                self.phase = Phase::Failed;
                self.notice = Some(Notice::error(notice::LOAD_FAILED));
                Err(error.into())
            }
        }
    }

    /// Fetch `experiment_id` and display it.
    ///
    /// # Errors
    ///
    /// See [`Self::finish_load`].
    pub async fn load<T: Transport>(&mut self, client: &ExperimentClient<T>, experiment_id: &str) -> Result<(), LoadError> {
        self.begin_load(experiment_id);
        let result = client.fetch_experiment(experiment_id).await;
        self.finish_load(experiment_id, result)
    }

    /// Record typed fitness text for a row. Ignored unless the view is ready.
    pub fn set_fitness(&mut self, index: usize, text: &str) -> bool {
        self.phase == Phase::Ready && self.fitness.set(index, text)
    }

    /// Whether "Generate next generation" would be accepted right now.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::Ready && self.fitness.complete().is_some()
    }

    /// Build the advance request and enter `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvanceRejected::InFlight`] or [`AdvanceRejected::NotReady`]
    /// outside `Ready`, and [`AdvanceRejected::MissingFitness`] (with the
    /// incomplete-scores notice) while any slot is unset.
    pub fn begin_advance(&mut self) -> Result<AdvanceRequest, AdvanceRejected> {
        match self.phase {
            Phase::Submitting => return Err(AdvanceRejected::InFlight),
            Phase::Loading | Phase::Failed => return Err(AdvanceRejected::NotReady),
            Phase::Ready => {}
        }
        let experiment = self.experiment.as_ref().ok_or(AdvanceRejected::NotReady)?;
        let Some(fitness_scores) = self.fitness.complete() else {
            self.notice = Some(Notice::error(notice::FITNESS_INCOMPLETE));
            return Err(AdvanceRejected::MissingFitness { missing: self.fitness.missing() });
        };
        let request = AdvanceRequest { population: experiment.population.clone(), fitness_scores };
        self.notice = None;
        self.phase = Phase::Submitting;
        Ok(request)
    }

    /// Fold an advance result in, unless it belongs to a superseded id.
    ///
    /// On success the population is replaced; response scores with one
    /// non-null entry per new row prefill the slots, otherwise every slot
    /// resets to unset.
    ///
    /// # Errors
    ///
    /// Returns [`AdvanceRejected::Superseded`] for stale results, and passes
    /// API or shape failures through with the population left as it was.
    pub fn finish_advance(
        &mut self,
        experiment_id: &str,
        result: Result<AdvanceResponse, ApiError>,
    ) -> Result<(), AdvanceRejected> {
        if experiment_id != self.experiment_id || self.phase != Phase::Submitting {
            tracing::debug!(experiment_id, current = %self.experiment_id, "dropping stale generation result");
            return Err(AdvanceRejected::Superseded(experiment_id.to_owned()));
        }
        self.phase = Phase::Ready;
        let next = match result {
            Ok(next) => next,
            Err(error) => {
                tracing::warn!(experiment_id, %error, "generation advance failed");
                self.notice = Some(Notice::error(notice::ADVANCE_FAILED));
                return Err(error.into());
            }
        };
        let Some(experiment) = self.experiment.as_mut() else {
            return Err(AdvanceRejected::NotReady);
        };
        if let Err(error) = next.population.check_shape(Some(experiment.variables.len())) {
            tracing::warn!(experiment_id, %error, "generation has the wrong shape");
            self.notice = Some(Notice::error(notice::ADVANCE_FAILED));
            return Err(error.into());
        }
        let rows = next.population.len();
        self.fitness = match next.complete_scores() {
            Some(scores) => FitnessScores::from_values(&scores),
            None => FitnessScores::unset(rows),
        };
        experiment.population = next.population;
        self.notice = None;
        tracing::debug!(experiment_id, rows, "generation displayed");
        Ok(())
    }

    /// Submit the scored population and display the next generation.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_advance`] and [`Self::finish_advance`].
    pub async fn advance<T: Transport>(&mut self, client: &ExperimentClient<T>) -> Result<(), AdvanceRejected> {
        let request = self.begin_advance()?;
        let experiment_id = self.experiment_id.clone();
        let result = client.advance_generation(&experiment_id, &request).await;
        self.finish_advance(&experiment_id, result)
    }
}
