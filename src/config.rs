use crate::log::LogLevel;

const DEFAULT_TYPING_MS: u32 = 100;
const DEFAULT_DELETING_MS: u32 = 50;
const DEFAULT_HOLD_FULL_MS: u32 = 2_000;
const DEFAULT_HOLD_EMPTY_MS: u32 = 500;
const DEFAULT_TYPING_START_MS: u32 = 1_000;
const DEFAULT_NAVBAR_THRESHOLD_PX: u32 = 50;
const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: u32 = 300;
const DEFAULT_SECTION_OFFSET_PX: u32 = 150;
const DEFAULT_NAV_SCROLL_OFFSET_PX: u32 = 80;
const DEFAULT_COUNTER_DURATION_MS: u32 = 2_000;
const DEFAULT_COUNTER_FRAME_MS: u32 = 16;
const DEFAULT_PARTICLE_COUNT: u32 = 50;
const DEFAULT_PRELOADER_DELAY_MS: u32 = 1_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const TICK_MS_BOUNDS: (u32, u32) = (10, 2_000);
const HOLD_MS_BOUNDS: (u32, u32) = (0, 20_000);
const SMALL_OFFSET_PX_BOUNDS: (u32, u32) = (0, 5_000);
const BACK_TO_TOP_THRESHOLD_PX_BOUNDS: (u32, u32) = (0, 20_000);
const COUNTER_DURATION_MS_BOUNDS: (u32, u32) = (16, 60_000);
const COUNTER_FRAME_MS_BOUNDS: (u32, u32) = (1, 1_000);
const PARTICLE_COUNT_BOUNDS: (u32, u32) = (0, 500);

pub const DEFAULT_PHRASES: &[&str] = &[
    "Software Developer Engineer",
    "Backend Developer",
    "AI Integration Specialist",
    "Test Automation Expert",
    "Competitive Programmer",
    "Problem Solver",
];

/// Typewriter delays, all in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub typing_ms: u32,
    pub deleting_ms: u32,
    pub hold_full_ms: u32,
    pub hold_empty_ms: u32,
    pub start_ms: u32,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            typing_ms: DEFAULT_TYPING_MS,
            deleting_ms: DEFAULT_DELETING_MS,
            hold_full_ms: DEFAULT_HOLD_FULL_MS,
            hold_empty_ms: DEFAULT_HOLD_EMPTY_MS,
            start_ms: DEFAULT_TYPING_START_MS,
        }
    }
}

/// Scroll reactor thresholds, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollThresholds {
    pub navbar_px: f64,
    pub back_to_top_px: f64,
    pub section_offset_px: f64,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            navbar_px: f64::from(DEFAULT_NAVBAR_THRESHOLD_PX),
            back_to_top_px: f64::from(DEFAULT_BACK_TO_TOP_THRESHOLD_PX),
            section_offset_px: f64::from(DEFAULT_SECTION_OFFSET_PX),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterTimings {
    pub duration_ms: u32,
    pub frame_ms: u32,
}

impl Default for CounterTimings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_COUNTER_DURATION_MS,
            frame_ms: DEFAULT_COUNTER_FRAME_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub typing: TypingTimings,
    pub scroll: ScrollThresholds,
    pub counter: CounterTimings,
    pub nav_scroll_offset_px: f64,
    pub particle_count: u32,
    pub preloader_delay_ms: u32,
    pub log_level: LogLevel,
    pub contact_email: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            typing: TypingTimings::default(),
            scroll: ScrollThresholds::default(),
            counter: CounterTimings::default(),
            nav_scroll_offset_px: f64::from(DEFAULT_NAV_SCROLL_OFFSET_PX),
            particle_count: DEFAULT_PARTICLE_COUNT,
            preloader_delay_ms: DEFAULT_PRELOADER_DELAY_MS,
            log_level: DEFAULT_LOG_LEVEL,
            contact_email: None,
        }
    }
}

impl SiteConfig {
    /// Builds the config from `data-*` attributes. `lookup` receives the full
    /// attribute name and returns its raw value, if present.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let typing = TypingTimings {
            typing_ms: parse_u32_with_bounds(&lookup, "data-typing-ms", DEFAULT_TYPING_MS, TICK_MS_BOUNDS),
            deleting_ms: parse_u32_with_bounds(
                &lookup,
                "data-deleting-ms",
                DEFAULT_DELETING_MS,
                TICK_MS_BOUNDS,
            ),
            hold_full_ms: parse_u32_with_bounds(
                &lookup,
                "data-hold-full-ms",
                DEFAULT_HOLD_FULL_MS,
                HOLD_MS_BOUNDS,
            ),
            hold_empty_ms: parse_u32_with_bounds(
                &lookup,
                "data-hold-empty-ms",
                DEFAULT_HOLD_EMPTY_MS,
                HOLD_MS_BOUNDS,
            ),
            start_ms: parse_u32_with_bounds(
                &lookup,
                "data-typing-start-ms",
                DEFAULT_TYPING_START_MS,
                HOLD_MS_BOUNDS,
            ),
        };
        let scroll = ScrollThresholds {
            navbar_px: f64::from(parse_u32_with_bounds(
                &lookup,
                "data-navbar-threshold-px",
                DEFAULT_NAVBAR_THRESHOLD_PX,
                SMALL_OFFSET_PX_BOUNDS,
            )),
            back_to_top_px: f64::from(parse_u32_with_bounds(
                &lookup,
                "data-back-to-top-threshold-px",
                DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
                BACK_TO_TOP_THRESHOLD_PX_BOUNDS,
            )),
            section_offset_px: f64::from(parse_u32_with_bounds(
                &lookup,
                "data-section-offset-px",
                DEFAULT_SECTION_OFFSET_PX,
                SMALL_OFFSET_PX_BOUNDS,
            )),
        };
        let counter = CounterTimings {
            duration_ms: parse_u32_with_bounds(
                &lookup,
                "data-counter-duration-ms",
                DEFAULT_COUNTER_DURATION_MS,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            frame_ms: parse_u32_with_bounds(
                &lookup,
                "data-counter-frame-ms",
                DEFAULT_COUNTER_FRAME_MS,
                COUNTER_FRAME_MS_BOUNDS,
            ),
        };
        let nav_scroll_offset_px = parse_u32_with_bounds(
            &lookup,
            "data-nav-scroll-offset-px",
            DEFAULT_NAV_SCROLL_OFFSET_PX,
            SMALL_OFFSET_PX_BOUNDS,
        );
        let particle_count = parse_u32_with_bounds(
            &lookup,
            "data-particle-count",
            DEFAULT_PARTICLE_COUNT,
            PARTICLE_COUNT_BOUNDS,
        );
        let preloader_delay_ms = parse_u32_with_bounds(
            &lookup,
            "data-preloader-delay-ms",
            DEFAULT_PRELOADER_DELAY_MS,
            HOLD_MS_BOUNDS,
        );
        let log_level = parse_log_level(&lookup, "data-log-level", DEFAULT_LOG_LEVEL);
        let contact_email = parse_non_empty_string(&lookup, "data-contact-email");

        Self {
            typing,
            scroll,
            counter,
            nav_scroll_offset_px: f64::from(nav_scroll_offset_px),
            particle_count,
            preloader_delay_ms,
            log_level,
            contact_email,
        }
    }
}

/// Reads the `data-phrases` override: a JSON array of strings. Blank entries
/// are dropped; `None` means "keep the built-in list".
pub fn parse_phrases(raw: Option<&str>) -> Option<Vec<String>> {
    let phrases = serde_json::from_str::<Vec<String>>(raw?.trim()).ok()?;
    let phrases: Vec<String> = phrases
        .into_iter()
        .filter(|phrase| !phrase.trim().is_empty())
        .collect();

    if phrases.is_empty() {
        None
    } else {
        Some(phrases)
    }
}

pub fn default_phrases() -> Vec<String> {
    DEFAULT_PHRASES.iter().map(|phrase| phrase.to_string()).collect()
}

fn parse_u32_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
    bounds: (u32, u32),
) -> u32 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: LogLevel) -> LogLevel {
    match parse_non_empty_string(lookup, name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| values.get(name).cloned()
    }

    #[test]
    fn no_attributes_yields_defaults() {
        let config = SiteConfig::from_attributes(|_| None);

        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.typing.typing_ms, 100);
        assert_eq!(config.typing.deleting_ms, 50);
        assert_eq!(config.typing.hold_full_ms, 2_000);
        assert_eq!(config.typing.hold_empty_ms, 500);
        assert_eq!(config.typing.start_ms, 1_000);
        assert_eq!(config.counter.duration_ms, 2_000);
        assert_eq!(config.counter.frame_ms, 16);
    }

    #[test]
    fn in_bounds_overrides_are_applied() {
        let config = SiteConfig::from_attributes(lookup_from(&[
            ("data-typing-ms", " 80 "),
            ("data-navbar-threshold-px", "120"),
            ("data-particle-count", "0"),
            ("data-log-level", "DEBUG"),
        ]));

        assert_eq!(config.typing.typing_ms, 80);
        assert_eq!(config.scroll.navbar_px, 120.0);
        assert_eq!(config.particle_count, 0);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_bounds_or_garbage_falls_back_to_default() {
        let config = SiteConfig::from_attributes(lookup_from(&[
            ("data-typing-ms", "5"),
            ("data-deleting-ms", "fast"),
            ("data-counter-frame-ms", "0"),
            ("data-log-level", "trace"),
        ]));

        assert_eq!(config.typing.typing_ms, 100);
        assert_eq!(config.typing.deleting_ms, 50);
        assert_eq!(config.counter.frame_ms, 16);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn contact_email_is_read_when_not_blank() {
        let config = SiteConfig::from_attributes(lookup_from(&[("data-contact-email", " me@example.com ")]));
        assert_eq!(config.contact_email.as_deref(), Some("me@example.com"));

        let blank = SiteConfig::from_attributes(lookup_from(&[("data-contact-email", "   ")]));
        assert_eq!(blank.contact_email, None);
    }

    #[test]
    fn phrase_override_drops_blank_entries() {
        let phrases = parse_phrases(Some(r#"["Rustacean", "  ", "Writer"]"#));

        assert_eq!(phrases, Some(vec!["Rustacean".to_string(), "Writer".to_string()]));
    }

    #[test]
    fn unusable_phrase_override_is_ignored() {
        assert_eq!(parse_phrases(None), None);
        assert_eq!(parse_phrases(Some("not json")), None);
        assert_eq!(parse_phrases(Some(r#"["", " "]"#)), None);
        assert_eq!(parse_phrases(Some("[]")), None);
    }
}
