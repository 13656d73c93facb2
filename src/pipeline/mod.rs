// Report pipeline: fetch, normalize, render

pub mod pipeline;
pub mod processing;

pub use pipeline::{sort_by_start, Pipeline, PipelineResult};
pub use processing::normalize;
