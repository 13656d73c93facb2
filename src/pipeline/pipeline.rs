use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::common::error::Result;
use crate::common::types::{AvailabilityTier, CanonicalEvent, EventSource, RawEventData};
use crate::config::Config;
use crate::observability::metrics;
use crate::pipeline::processing::normalize::{EventNormalizer, MetricsNormalizer, Normalizer};
use crate::report::{render_report, write_report, ReportContext};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub source: String,
    pub total_events: usize,
    pub tier_counts: BTreeMap<AvailabilityTier, usize>,
    pub output_files: Vec<PathBuf>,
}

/// Stable ascending sort on the raw `dateTime` string; records without one sort first
pub fn sort_by_start(raws: &mut [RawEventData]) {
    raws.sort_by(|a, b| start_key(a).cmp(start_key(b)));
}

fn start_key(raw: &RawEventData) -> &str {
    raw.get("dateTime").and_then(Value::as_str).unwrap_or_default()
}

pub struct Pipeline;

impl Pipeline {
    /// Sort and normalize a fetched listing
    pub fn normalize_all(mut raws: Vec<RawEventData>) -> Vec<CanonicalEvent> {
        sort_by_start(&mut raws);
        let normalizer = MetricsNormalizer::new(EventNormalizer::new());
        raws.iter().map(|raw| normalizer.normalize(raw)).collect()
    }

    pub fn tier_counts(events: &[CanonicalEvent]) -> BTreeMap<AvailabilityTier, usize> {
        let mut counts: BTreeMap<AvailabilityTier, usize> =
            AvailabilityTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        for event in events {
            *counts.entry(event.tier).or_default() += 1;
        }
        counts
    }

    /// Fetch, normalize, render and write the report to every configured output
    #[instrument(skip_all, fields(source = source.source_name()))]
    pub async fn run(source: &dyn EventSource, config: &Config) -> Result<PipelineResult> {
        let raws = source.fetch_events().await?;
        let total_events = raws.len();
        let events = Self::normalize_all(raws);

        let ctx = ReportContext {
            title: config.report.title.clone(),
            venue_id: config.api.venue_id,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        };
        let html = render_report(&events, &ctx)?;

        for path in &config.report.outputs {
            write_report(path, &html)?;
        }
        metrics::report::written(events.len());

        let tier_counts = Self::tier_counts(&events);
        info!(total_events, outputs = config.report.outputs.len(), "pipeline finished");

        Ok(PipelineResult {
            source: source.source_name().to_string(),
            total_events,
            tier_counts,
            output_files: config.report.outputs.clone(),
        })
    }
}
