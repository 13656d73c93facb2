use crate::common::constants::{HIGH_AVAILABILITY_MIN, MID_AVAILABILITY_MIN};
use crate::common::error::Result;
use serde::{Deserialize, Serialize};

/// Raw event data as returned from the ticketing API
pub type RawEventData = serde_json::Value;

/// Coarse availability classification shown next to each event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityTier {
    Zero,
    Low,
    Mid,
    High,
}

impl AvailabilityTier {
    pub const ALL: [AvailabilityTier; 4] = [Self::Zero, Self::Low, Self::Mid, Self::High];

    /// Classify a total available-seat count.
    ///
    /// 50 and 200 are inclusive lower bounds of `Mid` and `High`.
    pub fn classify(available: u64) -> Self {
        match available {
            0 => Self::Zero,
            n if n < MID_AVAILABILITY_MIN => Self::Low,
            n if n < HIGH_AVAILABILITY_MIN => Self::Mid,
            _ => Self::High,
        }
    }

    /// Stable lowercase name, also used as the CSS class in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }

    /// Latvian display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Zero => "Nav",
            Self::Low => "Maz",
            Self::Mid => "Vidēji",
            Self::High => "Daudz",
        }
    }
}

/// Display-ready representation of one event, independent of the raw API shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub title: String,
    pub url: String,
    /// `YYYY-MM-DD`, empty when the source had no usable `dateTime`
    pub date: String,
    /// `HH:MM`, empty when the source had no usable `dateTime`
    pub time: String,
    pub available_count: u64,
    /// Always >= 1 when present
    pub capacity: Option<u64>,
    /// In `[0, 1]`, only known when `capacity` is
    pub sold_fraction: Option<f64>,
    pub tier: AvailabilityTier,
    pub image_url: Option<String>,
}

impl CanonicalEvent {
    /// Sold share as a whole percentage; halves round to even
    pub fn sold_percent(&self) -> Option<u8> {
        self.sold_fraction
            .map(|fraction| (fraction * 100.0).round_ties_even().clamp(0.0, 100.0) as u8)
    }
}

/// A data source that can list raw events for one venue
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    /// Identifier used in logs and metrics
    fn source_name(&self) -> &'static str;

    /// Fetch every listed event
    async fn fetch_events(&self) -> Result<Vec<RawEventData>>;
}
