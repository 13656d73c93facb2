use askama::Template;

use crate::common::error::Result;
use crate::common::types::CanonicalEvent;

/// Header data for one rendered report
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub title: String,
    pub venue_id: u32,
    /// Already formatted, e.g. `2024-05-01 12:00`
    pub generated_at: String,
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate<'a> {
    pub ctx: &'a ReportContext,
    pub events: &'a [CanonicalEvent],
}

/// Render the full report document. Events are emitted in the given order.
pub fn render_report(events: &[CanonicalEvent], ctx: &ReportContext) -> Result<String> {
    Ok(ReportTemplate { ctx, events }.render()?)
}
