/// Source and venue constants shared across the application

// Source name (used in logs and metrics labels)
pub const BILESU_PARADIZE_API: &str = "bilesu_paradize";

// Upstream defaults
pub const DEFAULT_API_BASE_URL: &str = "https://www.bilesuparadize.lv/api";
pub const DEFAULT_VENUE_ID: u32 = 270;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_REPORT_TITLE: &str = "Talsu Kultūras centrs — pasākumi & brīvās biļetes";
pub const DEFAULT_OUTPUTS: [&str; 2] = ["index.html", "talsu_kc_report.html"];

// Env var naming the config file
pub const CONFIG_PATH_ENV: &str = "BILESU_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Shown when an event has neither a Latvian nor an English title
pub const TITLE_PLACEHOLDER: &str = "—";

/// Language keys tried for localized strings, in priority order
pub const LANGUAGE_PRIORITY: [&str; 2] = ["lv", "en"];

/// Capacity field names checked on each price tier. First positive match per tier wins.
///
/// The upstream schema for total seats is undocumented and differs between venues,
/// so this list is data: extend it here when a new field name shows up.
pub const TIER_CAPACITY_FIELDS: [&str; 10] = [
    "capacity",
    "total",
    "totalCount",
    "maxCount",
    "allCount",
    "initialCount",
    "limit",
    "quantity",
    "seats",
    "places",
];

/// Capacity field names checked on the event itself when no tier carries one
pub const EVENT_CAPACITY_FIELDS: [&str; 4] = ["capacity", "total", "totalCount", "maxCount"];

/// Image locations under `performance`, tried in order
pub const IMAGE_PATHS: [&[&str]; 10] = [
    &["image"],
    &["poster"],
    &["posterUrl"],
    &["cover"],
    &["img"],
    &["images", "poster"],
    &["images", "cover"],
    &["images", "large"],
    &["images", "medium"],
    &["images", "small"],
];

pub const IMAGE_SCHEME_PREFIX: &str = "http";

// Availability tier cut points (inclusive lower bounds; 0 is always the zero tier)
pub const MID_AVAILABILITY_MIN: u64 = 50;
pub const HIGH_AVAILABILITY_MIN: u64 = 200;
