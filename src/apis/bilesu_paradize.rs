use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::app::ports::HttpClientPort;
use crate::common::constants::BILESU_PARADIZE_API;
use crate::common::error::{ReportError, Result};
use crate::common::types::{EventSource, RawEventData};
use crate::config::Config;
use crate::observability::metrics;

/// Repertoire listing for one Biļešu Paradīze venue
pub struct BilesuParadizeApi {
    http: Arc<dyn HttpClientPort>,
    url: String,
}

impl BilesuParadizeApi {
    pub fn new(http: Arc<dyn HttpClientPort>, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }

    pub fn from_config(http: Arc<dyn HttpClientPort>, config: &Config) -> Self {
        Self::new(http, config.repertoire_url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The endpoint returns a bare JSON array of events
    fn decode_events(bytes: &[u8]) -> Result<Vec<RawEventData>> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Array(events) => Ok(events),
            other => Err(ReportError::UnexpectedPayload(format!(
                "expected a JSON array of events, got {}",
                json_kind(&other)
            ))),
        }
    }
}

#[async_trait::async_trait]
impl EventSource for BilesuParadizeApi {
    fn source_name(&self) -> &'static str {
        BILESU_PARADIZE_API
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_events(&self) -> Result<Vec<RawEventData>> {
        let started = Instant::now();
        let response = match self.http.get(&self.url).await {
            Ok(response) => response,
            Err(e) => {
                metrics::sources::request_error(BILESU_PARADIZE_API, "transport");
                return Err(e);
            }
        };

        if !response.is_success() {
            warn!(status = response.status, "ticketing API returned an error status");
            metrics::sources::request_error(BILESU_PARADIZE_API, "status");
            return Err(ReportError::Status {
                status: response.status,
                url: self.url.clone(),
            });
        }

        let events = Self::decode_events(&response.bytes).inspect_err(|_| {
            metrics::sources::request_error(BILESU_PARADIZE_API, "decode");
        })?;

        metrics::sources::request_success(
            BILESU_PARADIZE_API,
            started.elapsed().as_secs_f64(),
            response.bytes.len(),
        );
        info!(
            count = events.len(),
            bytes = response.bytes.len(),
            content_type = %response.content_type,
            "fetched events"
        );
        Ok(events)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
