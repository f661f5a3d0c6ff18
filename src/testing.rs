//! Scripted transport for exercising the client and workflows in tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::identity::{Identity, Session};
use crate::model::{Experiment, Goal, Population, Variable};

/// Records every request and replies from a queue of scripted responses.
#[derive(Default)]
pub(crate) struct FakeTransport {
    requests: RefCell<Vec<ApiRequest>>,
    replies: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply_raw(&self, status: u16, body: impl Into<String>) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(ApiResponse { status, body: body.into() }));
        self
    }

    /// Queue a 200 response wrapping `inner` in the `{ body: "<json>" }` envelope.
    pub(crate) fn reply_envelope(&self, inner: &Value) -> &Self {
        let raw = serde_json::json!({ "statusCode": 200, "body": inner.to_string() }).to_string();
        self.reply_raw(200, raw)
    }

    pub(crate) fn reply_status(&self, status: u16) -> &Self {
        self.reply_raw(status, "")
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::Send(message.to_owned())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Send("no scripted reply".to_owned())))
    }
}

pub(crate) fn signed_in(user_id: &str) -> Session {
    Session::Resolved(Identity { user_id: user_id.to_owned(), display_name: None })
}

pub(crate) fn continuous(name: &str, min: &str, max: &str) -> Variable {
    Variable {
        name: name.to_owned(),
        min: min.to_owned(),
        max: max.to_owned(),
        ..Variable::default()
    }
}

pub(crate) fn experiment(id: &str, name: &str, rows: Vec<Vec<f64>>) -> Experiment {
    let width = rows.first().map_or(1, Vec::len);
    Experiment {
        experiment_id: id.to_owned(),
        user_id: "u-1".to_owned(),
        experiment_name: name.to_owned(),
        goal: Some(Goal::Minimize),
        population_size: u32::try_from(rows.len().max(2)).unwrap_or(u32::MAX),
        variables: (0..width).map(|i| continuous(&format!("x{i}"), "0", "10")).collect(),
        population: Population::new(rows),
    }
}
