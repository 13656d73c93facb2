pub mod apis;
pub mod app;
pub mod common;
pub mod config;
pub mod infra;
pub mod observability;
pub mod pipeline;
pub mod report;

pub use common::types::{AvailabilityTier, CanonicalEvent, RawEventData};
pub use pipeline::normalize::{normalize, EventNormalizer, Normalizer};
