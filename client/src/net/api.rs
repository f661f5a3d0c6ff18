//! Browser transport for the experiment API.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds (tests): every request fails with a transport error, since
//! there is no `fetch` outside the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures surface as `TransportError` values; pages turn them into
//! static notices through the shared workflows instead of panicking.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use cloudlab::{ApiConfig, ApiRequest, ApiResponse, ExperimentClient, Transport, TransportError};

/// API client type every page pulls from context.
pub type Api = ExperimentClient<GlooTransport>;

/// `fetch`-backed [`Transport`] rooted at a configured base URL.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    config: ApiConfig,
}

impl GlooTransport {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

/// Build the API client from the compile-time `CLOUDLAB_API_URL`, falling
/// back to the deployed API when unset or invalid.
pub fn api_client() -> Api {
    ExperimentClient::new(GlooTransport::new(config_from(option_env!("CLOUDLAB_API_URL"))))
}

fn config_from(raw: Option<&str>) -> ApiConfig {
    ApiConfig::from_override(raw).unwrap_or_else(|error| {
        leptos::logging::warn!("{error}; using the default API");
        ApiConfig::default()
    })
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use cloudlab::Method;
            use gloo_net::http::Request;

            let url = self.config.endpoint(request.path);
            let builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Delete => Request::delete(&url),
            }
            .header("Content-Type", "application/json")
            .query(request.query.iter().map(|(key, value)| (*key, value.as_str())));
            let built = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::Build(e.to_string()))?;
            let response = built.send().await.map_err(|e| TransportError::Send(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| TransportError::Read(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError::Send(format!(
                "{} {} is only available in the browser build",
                request.method.as_str(),
                self.config.endpoint(request.path)
            )))
        }
    }
}
