//! Experiment list state: loading, expansion, and two-step delete.
//!
//! Stored records are not guaranteed to carry an id. Rows and expansion are
//! keyed on [`ListEntry::key`], which is unique within one loaded list, and
//! delete is only offered for entries that have an id to send.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use std::collections::BTreeSet;

use super::notice::{self, Notice};
use crate::api::{ApiError, ExperimentClient, Transport};
use crate::identity::{AuthError, Identity, Session};
use crate::model::Experiment;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListStatus {
    #[default]
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no delete is awaiting confirmation")]
    NothingToDelete,
    #[error("a delete is already in progress")]
    InFlight,
}

/// One listed experiment and its row key.
#[derive(Clone, Debug, PartialEq)]
pub struct ListEntry {
    pub key: String,
    pub experiment: Experiment,
}

impl ListEntry {
    /// Whether the record has an id the delete endpoint can address.
    #[must_use]
    pub fn deletable(&self) -> bool {
        !self.experiment.experiment_id.trim().is_empty()
    }
}

/// Key each record by its id, falling back to its position when the id is
/// blank or already taken.
fn keyed(experiments: Vec<Experiment>) -> Vec<ListEntry> {
    let mut seen = BTreeSet::new();
    experiments
        .into_iter()
        .enumerate()
        .map(|(index, experiment)| {
            let mut key = if experiment.experiment_id.trim().is_empty() {
                format!("#{index}")
            } else {
                experiment.experiment_id.clone()
            };
            while !seen.insert(key.clone()) {
                key.push('#');
            }
            ListEntry { key, experiment }
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExperimentList {
    pub status: ListStatus,
    pub items: Vec<ListEntry>,
    /// Keys of expanded entries.
    pub expanded: BTreeSet<String>,
    pub pending_delete: Option<String>,
    pub deleting: bool,
    pub notice: Option<Notice>,
}

impl ExperimentList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded with no experiments; the view shows the empty message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == ListStatus::Loaded && self.items.is_empty()
    }

    /// Enter the loading state and pick the identity to list for.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] when no identity is available; the list
    /// moves to `Failed` without any request.
    pub fn begin_load(&mut self, session: &Session) -> Result<Identity, ListError> {
        self.status = ListStatus::Loading;
        self.notice = None;
        match session.require() {
            Ok(identity) => Ok(identity.clone()),
            Err(error) => {
                self.status = ListStatus::Failed;
                self.notice = Some(Notice::error(notice::IDENTITY_UNAVAILABLE));
                Err(error.into())
            }
        }
    }

    /// Fold the list result in.
    ///
    /// # Errors
    ///
    /// Passes an API failure through after moving to `Failed`.
    pub fn finish_load(&mut self, result: Result<Vec<Experiment>, ApiError>) -> Result<(), ListError> {
        match result {
            Ok(items) => {
                self.items = keyed(items);
                self.expanded.retain(|key| self.items.iter().any(|entry| &entry.key == key));
                self.status = ListStatus::Loaded;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "experiment list failed");
                self.status = ListStatus::Failed;
                self.notice = Some(Notice::error(notice::LIST_FAILED));
                Err(error.into())
            }
        }
    }

    /// Issue one list request for the session's identity.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_load`] and [`Self::finish_load`].
    pub async fn load<T: Transport>(&mut self, client: &ExperimentClient<T>, session: &Session) -> Result<(), ListError> {
        let identity = self.begin_load(session)?;
        let result = client.list_experiments(&identity).await;
        self.finish_load(result)
    }

    pub fn toggle_expanded(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_owned());
        }
    }

    #[must_use]
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Stage a delete for confirmation. Ignored while a delete is running
    /// and for a blank id, which the endpoint cannot address.
    pub fn request_delete(&mut self, experiment_id: &str) {
        if experiment_id.trim().is_empty() {
            tracing::debug!("ignoring delete for an experiment without an id");
            return;
        }
        if !self.deleting {
            self.pending_delete = Some(experiment_id.to_owned());
        }
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.pending_delete = None;
        }
    }

    /// Confirm the staged delete and return the id to send.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InFlight`] while a delete is running and
    /// [`ListError::NothingToDelete`] when nothing is staged.
    pub fn begin_delete(&mut self) -> Result<String, ListError> {
        if self.deleting {
            return Err(ListError::InFlight);
        }
        let experiment_id = self
            .pending_delete
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ListError::NothingToDelete)?;
        self.deleting = true;
        Ok(experiment_id)
    }

    /// Fold the delete result in. The confirmation closes either way; entries
    /// with that id are removed only on success. Entries without an id are
    /// never matched.
    ///
    /// # Errors
    ///
    /// Passes an API failure through after setting the failure notice.
    pub fn finish_delete(&mut self, experiment_id: &str, result: Result<(), ApiError>) -> Result<(), ListError> {
        self.deleting = false;
        self.pending_delete = None;
        match result {
            Ok(()) => {
                if !experiment_id.trim().is_empty() {
                    let expanded = &mut self.expanded;
                    self.items.retain(|entry| {
                        let gone = entry.experiment.experiment_id == experiment_id;
                        if gone {
                            expanded.remove(&entry.key);
                        }
                        !gone
                    });
                }
                self.notice = Some(Notice::success(notice::DELETE_SUCCEEDED));
                Ok(())
            }
            Err(error) => {
                tracing::warn!(experiment_id, %error, "experiment delete failed");
                self.notice = Some(Notice::error(notice::DELETE_FAILED));
                Err(error.into())
            }
        }
    }

    /// Delete the staged experiment.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_delete`] and [`Self::finish_delete`].
    pub async fn confirm_delete<T: Transport>(&mut self, client: &ExperimentClient<T>) -> Result<(), ListError> {
        let experiment_id = self.begin_delete()?;
        let result = client.delete_experiment(&experiment_id).await;
        self.finish_delete(&experiment_id, result)
    }
}
