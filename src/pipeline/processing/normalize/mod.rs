//! Event normalization: raw ticketing API records into [`CanonicalEvent`]s.
//!
//! Normalization is total. Missing or malformed fields degrade to an empty
//! string, zero or `None`; nothing here returns an error.

pub mod fields;

use serde_json::Value;
use tracing::{debug, trace};

use crate::common::constants::{
    EVENT_CAPACITY_FIELDS, IMAGE_PATHS, IMAGE_SCHEME_PREFIX, LANGUAGE_PRIORITY,
    TIER_CAPACITY_FIELDS, TITLE_PLACEHOLDER,
};
use crate::common::types::{AvailabilityTier, CanonicalEvent, RawEventData};
use crate::observability::metrics;
use fields::{char_slice, first_positive_field, int_or_zero, localized_text, lookup_path};

/// Trait for turning one raw record into its display form
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: &RawEventData) -> CanonicalEvent;
}

/// Field extraction and availability bucketing for Biļešu Paradīze events
#[derive(Debug, Default, Clone, Copy)]
pub struct EventNormalizer;

impl EventNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// `performance.titles.lv`, then `.en`, then the placeholder
    pub fn extract_title(raw: &RawEventData) -> String {
        let titles = lookup_path(raw, &["performance", "titles"]);
        localized_text(titles, &LANGUAGE_PRIORITY)
            .unwrap_or(TITLE_PLACEHOLDER)
            .to_string()
    }

    /// `urls.lv`, then `urls.en`, else empty
    pub fn extract_url(raw: &RawEventData) -> String {
        localized_text(raw.get("urls"), &LANGUAGE_PRIORITY)
            .unwrap_or_default()
            .to_string()
    }

    /// Split `dateTime` into `(YYYY-MM-DD, HH:MM)`.
    ///
    /// This is a structural slice (characters 0..10 and 11..16), not a validated
    /// timestamp parse: short or odd input yields partial or empty strings.
    pub fn extract_date_time(raw: &RawEventData) -> (String, String) {
        let date_time = raw.get("dateTime").and_then(Value::as_str).unwrap_or_default();
        (char_slice(date_time, 0, 10), char_slice(date_time, 11, 5))
    }

    /// Sum of every price tier's `count`, floored at 0 once summed
    pub fn sum_available(raw: &RawEventData) -> u64 {
        let total = price_tiers(raw)
            .iter()
            .fold(0i64, |total, tier| total.saturating_add(int_or_zero(tier.get("count"))));
        total.max(0) as u64
    }

    /// Best-effort total capacity.
    ///
    /// Each tier contributes its first positive field from
    /// [`TIER_CAPACITY_FIELDS`]. When no tier has one, the first positive
    /// [`EVENT_CAPACITY_FIELDS`] value on the event itself is used.
    pub fn resolve_capacity(raw: &RawEventData) -> Option<u64> {
        let tier_capacities: Vec<u64> = price_tiers(raw)
            .iter()
            .filter_map(|tier| first_positive_field(tier, &TIER_CAPACITY_FIELDS))
            .collect();

        if !tier_capacities.is_empty() {
            return Some(
                tier_capacities
                    .into_iter()
                    .fold(0u64, |total, cap| total.saturating_add(cap)),
            );
        }

        first_positive_field(raw, &EVENT_CAPACITY_FIELDS)
    }

    /// First `http…` string among [`IMAGE_PATHS`] under `performance`
    pub fn resolve_image(raw: &RawEventData) -> Option<String> {
        let performance = raw.get("performance")?;
        IMAGE_PATHS
            .iter()
            .filter_map(|path| lookup_path(performance, path).and_then(Value::as_str))
            .find(|url| url.starts_with(IMAGE_SCHEME_PREFIX))
            .map(str::to_string)
    }

    pub fn classify(available: u64) -> AvailabilityTier {
        AvailabilityTier::classify(available)
    }

    /// Share of capacity already sold, clamped to `[0, 1]`
    pub fn compute_sold_fraction(available: u64, capacity: Option<u64>) -> Option<f64> {
        let capacity = capacity.filter(|cap| *cap > 0)?;
        let sold = capacity.saturating_sub(available);
        Some((sold as f64 / capacity as f64).clamp(0.0, 1.0))
    }
}

impl Normalizer for EventNormalizer {
    fn normalize(&self, raw: &RawEventData) -> CanonicalEvent {
        let (date, time) = Self::extract_date_time(raw);
        let available_count = Self::sum_available(raw);
        let capacity = Self::resolve_capacity(raw);
        if capacity.is_none() {
            trace!(date = %date, "no capacity field found");
        }

        let event = CanonicalEvent {
            title: Self::extract_title(raw),
            url: Self::extract_url(raw),
            date,
            time,
            available_count,
            capacity,
            sold_fraction: Self::compute_sold_fraction(available_count, capacity),
            tier: Self::classify(available_count),
            image_url: Self::resolve_image(raw),
        };

        debug!(
            title = %event.title,
            date = %event.date,
            available = event.available_count,
            tier = event.tier.as_str(),
            "normalized event"
        );
        event
    }
}

/// A wrapper that records metrics for any normalizer
pub struct MetricsNormalizer<N: Normalizer> {
    inner: N,
}

impl<N: Normalizer> MetricsNormalizer<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

impl<N: Normalizer> Normalizer for MetricsNormalizer<N> {
    fn normalize(&self, raw: &RawEventData) -> CanonicalEvent {
        let event = self.inner.normalize(raw);
        metrics::normalize::record_normalized(event.tier);
        if event.capacity.is_none() {
            metrics::normalize::capacity_unknown();
        }
        event
    }
}

/// Normalize with the default normalizer
pub fn normalize(raw: &RawEventData) -> CanonicalEvent {
    EventNormalizer.normalize(raw)
}

fn price_tiers(raw: &RawEventData) -> &[Value] {
    raw.get("prices")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_event() -> Value {
        json!({
            "dateTime": "2024-05-01T19:30:00+03:00",
            "performance": {
                "titles": {"lv": "Koncerts", "en": "Concert"},
                "images": {"medium": "https://cdn.example.lv/m.jpg"}
            },
            "urls": {"lv": "https://www.bilesuparadize.lv/lv/event/1", "en": "https://www.bilesuparadize.lv/en/event/1"},
            "prices": [
                {"count": 10, "capacity": 100},
                {"count": "20", "totalCount": 50}
            ]
        })
    }

    #[test]
    fn test_normalize_full_event() {
        let event = normalize(&full_event());

        assert_eq!(event.title, "Koncerts");
        assert_eq!(event.url, "https://www.bilesuparadize.lv/lv/event/1");
        assert_eq!(event.date, "2024-05-01");
        assert_eq!(event.time, "19:30");
        assert_eq!(event.available_count, 30);
        assert_eq!(event.capacity, Some(150));
        assert_eq!(event.sold_fraction, Some(0.8));
        assert_eq!(event.tier, AvailabilityTier::Low);
        assert_eq!(event.image_url.as_deref(), Some("https://cdn.example.lv/m.jpg"));
    }

    #[test]
    fn test_title_fallbacks() {
        let en_only = json!({"performance": {"titles": {"en": "Show"}}});
        assert_eq!(EventNormalizer::extract_title(&en_only), "Show");

        let empty_lv = json!({"performance": {"titles": {"lv": "", "en": "Show"}}});
        assert_eq!(EventNormalizer::extract_title(&empty_lv), "Show");

        let none = json!({"performance": {"titles": {}}});
        assert_eq!(EventNormalizer::extract_title(&none), "—");

        let null_perf = json!({"performance": null});
        assert_eq!(EventNormalizer::extract_title(&null_perf), "—");
    }

    #[test]
    fn test_url_fallbacks() {
        assert_eq!(EventNormalizer::extract_url(&json!({"urls": {"en": "https://e"}})), "https://e");
        assert_eq!(EventNormalizer::extract_url(&json!({})), "");
    }

    #[test]
    fn test_date_time_slicing() {
        let (date, time) = EventNormalizer::extract_date_time(&json!({"dateTime": "2024-05-01T19:30:00"}));
        assert_eq!((date.as_str(), time.as_str()), ("2024-05-01", "19:30"));

        let (date, time) = EventNormalizer::extract_date_time(&json!({"dateTime": ""}));
        assert_eq!((date.as_str(), time.as_str()), ("", ""));

        let (date, time) = EventNormalizer::extract_date_time(&json!({"dateTime": "2024-05-01T19"}));
        assert_eq!((date.as_str(), time.as_str()), ("2024-05-01", "19"));

        let (date, time) = EventNormalizer::extract_date_time(&json!({"dateTime": 1714580000}));
        assert_eq!((date.as_str(), time.as_str()), ("", ""));
    }

    #[test]
    fn test_sum_available_tolerates_bad_tiers() {
        assert_eq!(EventNormalizer::sum_available(&json!({})), 0);
        assert_eq!(EventNormalizer::sum_available(&json!({"prices": []})), 0);
        assert_eq!(EventNormalizer::sum_available(&json!({"prices": null})), 0);

        let raw = json!({"prices": [
            {"count": 5},
            {"count": "lots"},
            {"count": null},
            {},
            "not a tier",
            {"count": "7"}
        ]});
        assert_eq!(EventNormalizer::sum_available(&raw), 12);
    }

    #[test]
    fn test_sum_available_nets_negative_counts() {
        let raw = json!({"prices": [{"count": 10}, {"count": -3}]});
        assert_eq!(EventNormalizer::sum_available(&raw), 7);

        let raw = json!({"prices": [{"count": 2}, {"count": "-9"}]});
        assert_eq!(EventNormalizer::sum_available(&raw), 0);
        assert_eq!(normalize(&raw).tier, AvailabilityTier::Zero);
    }

    #[test]
    fn test_capacity_first_match_per_tier() {
        let raw = json!({"prices": [
            {"total": 40, "capacity": 60},
            {"capacity": 0, "seats": 25}
        ]});
        assert_eq!(EventNormalizer::resolve_capacity(&raw), Some(85));
    }

    #[test]
    fn test_capacity_falls_back_to_event_fields() {
        let raw = json!({"maxCount": 300, "prices": [{"count": 3}]});
        assert_eq!(EventNormalizer::resolve_capacity(&raw), Some(300));

        // tier-only names are not read on the event itself
        let raw = json!({"seats": 300, "prices": [{"count": 3}]});
        assert_eq!(EventNormalizer::resolve_capacity(&raw), None);
    }

    #[test]
    fn test_capacity_absent_without_known_fields() {
        let raw = json!({"prices": [{"count": 3, "size": 100}], "venueCapacity": 500});
        assert_eq!(EventNormalizer::resolve_capacity(&raw), None);

        let raw = json!({"capacity": -10, "total": "0"});
        assert_eq!(EventNormalizer::resolve_capacity(&raw), None);
    }

    #[test]
    fn test_resolve_image_order_and_scheme() {
        let raw = json!({"performance": {
            "image": "/relative.jpg",
            "poster": {"url": "https://nested"},
            "cover": "https://cdn/cover.jpg",
            "images": {"poster": "https://cdn/poster.jpg"}
        }});
        assert_eq!(EventNormalizer::resolve_image(&raw).as_deref(), Some("https://cdn/cover.jpg"));

        let raw = json!({"performance": {"images": {"small": "http://cdn/s.jpg"}}});
        assert_eq!(EventNormalizer::resolve_image(&raw).as_deref(), Some("http://cdn/s.jpg"));

        assert_eq!(EventNormalizer::resolve_image(&json!({"performance": {}})), None);
        assert_eq!(EventNormalizer::resolve_image(&json!({})), None);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(EventNormalizer::classify(0), AvailabilityTier::Zero);
        assert_eq!(EventNormalizer::classify(1), AvailabilityTier::Low);
        assert_eq!(EventNormalizer::classify(49), AvailabilityTier::Low);
        assert_eq!(EventNormalizer::classify(50), AvailabilityTier::Mid);
        assert_eq!(EventNormalizer::classify(199), AvailabilityTier::Mid);
        assert_eq!(EventNormalizer::classify(200), AvailabilityTier::High);
    }

    #[test]
    fn test_sold_fraction() {
        let fraction = EventNormalizer::compute_sold_fraction(30, Some(100)).unwrap();
        assert!((fraction - 0.70).abs() < 1e-9);
        assert_eq!(EventNormalizer::compute_sold_fraction(150, Some(100)), Some(0.0));
        assert_eq!(EventNormalizer::compute_sold_fraction(0, Some(100)), Some(1.0));
        assert_eq!(EventNormalizer::compute_sold_fraction(10, None), None);
        assert_eq!(EventNormalizer::compute_sold_fraction(10, Some(0)), None);
    }

    #[test]
    fn test_normalize_is_total_and_idempotent() {
        let inputs = [
            json!(null),
            json!(42),
            json!("event"),
            json!([]),
            json!({}),
            json!({"prices": {"count": 4}, "performance": "x", "urls": [], "dateTime": null}),
            full_event(),
        ];
        for raw in &inputs {
            let first = normalize(raw);
            let second = normalize(raw);
            assert_eq!(first, second);
            assert!(!first.title.is_empty());
        }
    }

    #[test]
    fn test_metrics_normalizer_passes_through() {
        let wrapped = MetricsNormalizer::new(EventNormalizer::new());
        assert_eq!(wrapped.normalize(&full_event()), normalize(&full_event()));
    }
}
