//! Static HTML report output

pub mod html;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::error::Result;

pub use html::{render_report, ReportContext, ReportTemplate};

/// Write a rendered document, creating parent directories as needed
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    info!(path = %path.display(), bytes = html.len(), "report written");
    Ok(())
}
