//! Metrics for the report pipeline
//!
//! Recording goes through the `metrics` facade. Nothing is exported unless the
//! embedding process installs a recorder, so every call is cheap by default.

use std::fmt;

/// Every metric name used in the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Source metrics
    SourceRequestsSuccess,
    SourceRequestsError,
    SourceRequestDuration,
    SourcePayloadBytes,

    // Normalize metrics
    EventsNormalized,
    CapacityUnknown,

    // Report metrics
    ReportsWritten,
    ReportEvents,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::SourceRequestsSuccess => "bilesu_source_requests_success_total",
            MetricName::SourceRequestsError => "bilesu_source_requests_error_total",
            MetricName::SourceRequestDuration => "bilesu_source_request_duration_seconds",
            MetricName::SourcePayloadBytes => "bilesu_source_payload_bytes",
            MetricName::EventsNormalized => "bilesu_events_normalized_total",
            MetricName::CapacityUnknown => "bilesu_events_capacity_unknown_total",
            MetricName::ReportsWritten => "bilesu_reports_written_total",
            MetricName::ReportEvents => "bilesu_report_events",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Source Metrics
// ============================================================================

pub mod sources {
    use super::MetricName;

    /// Record a successful request
    pub fn request_success(source: &'static str, duration_secs: f64, payload_bytes: usize) {
        ::metrics::counter!(MetricName::SourceRequestsSuccess.as_str(), "source" => source).increment(1);
        ::metrics::histogram!(MetricName::SourceRequestDuration.as_str(), "source" => source)
            .record(duration_secs);
        ::metrics::histogram!(MetricName::SourcePayloadBytes.as_str(), "source" => source)
            .record(payload_bytes as f64);
    }

    /// Record a failed request
    pub fn request_error(source: &'static str, error_type: &'static str) {
        ::metrics::counter!(
            MetricName::SourceRequestsError.as_str(),
            "source" => source,
            "error_type" => error_type
        )
        .increment(1);
    }
}

// ============================================================================
// Normalize Metrics
// ============================================================================

pub mod normalize {
    use super::MetricName;
    use crate::common::types::AvailabilityTier;

    pub fn record_normalized(tier: AvailabilityTier) {
        ::metrics::counter!(MetricName::EventsNormalized.as_str(), "tier" => tier.as_str()).increment(1);
    }

    pub fn capacity_unknown() {
        ::metrics::counter!(MetricName::CapacityUnknown.as_str()).increment(1);
    }
}

// ============================================================================
// Report Metrics
// ============================================================================

pub mod report {
    use super::MetricName;

    pub fn written(event_count: usize) {
        ::metrics::counter!(MetricName::ReportsWritten.as_str()).increment(1);
        ::metrics::gauge!(MetricName::ReportEvents.as_str()).set(event_count as f64);
    }
}
