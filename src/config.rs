use crate::logging::LogLevel;

pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.85;
pub const DEFAULT_SPY_OFFSET_PX: f64 = 70.0;
pub const DEFAULT_HIDE_THRESHOLD_PX: f64 = 100.0;
pub const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;
pub const DEFAULT_PARALLAX_FACTOR: f64 = 0.5;
pub const DEFAULT_SCROLL_DURATION_MS: u32 = 800;
pub const DEFAULT_TOAST_DURATION_MS: u32 = 4_000;
pub const DEFAULT_TOAST_FADE_MS: u32 = 300;
pub const DEFAULT_COPY_RESET_MS: u32 = 2_000;
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 150;
pub const DEFAULT_DESKTOP_BREAKPOINT_PX: f64 = 768.0;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.1, 1.0);
const SPY_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const HIDE_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const BACK_TO_TOP_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 5_000.0);
pub const PARALLAX_FACTOR_BOUNDS: (f64, f64) = (-2.0, 2.0);
const SCROLL_DURATION_MS_BOUNDS: (u32, u32) = (100, 5_000);
const TOAST_DURATION_MS_BOUNDS: (u32, u32) = (500, 30_000);
const COPY_RESET_MS_BOUNDS: (u32, u32) = (250, 10_000);
const DESKTOP_BREAKPOINT_PX_BOUNDS: (f64, f64) = (320.0, 4_096.0);

pub mod keys {
    pub const REVEAL_THRESHOLD: &str = "data-reveal-threshold";
    pub const SPY_OFFSET: &str = "data-spy-offset";
    pub const HIDE_THRESHOLD: &str = "data-hide-threshold";
    pub const BACK_TO_TOP_THRESHOLD: &str = "data-back-to-top-threshold";
    pub const PARALLAX_FACTOR: &str = "data-parallax-factor";
    pub const SCROLL_DURATION_MS: &str = "data-scroll-duration-ms";
    pub const TOAST_DURATION_MS: &str = "data-toast-duration-ms";
    pub const COPY_RESET_MS: &str = "data-copy-reset-ms";
    pub const DESKTOP_BREAKPOINT: &str = "data-desktop-breakpoint";
    pub const LOG_LEVEL: &str = "data-log-level";
}

pub mod attrs {
    pub const PARALLAX: &str = "data-parallax";
    pub const REVEAL: &str = "data-reveal";
    pub const SCROLL_SPY: &str = "data-scroll-spy";
    pub const SCROLL_NAV: &str = "data-scroll-nav";
    pub const HIDE_ON_SCROLL: &str = "data-hide-on-scroll";
    pub const STICKY: &str = "data-sticky";
    pub const STICKY_OFFSET: &str = "data-sticky-offset";
    pub const SCROLL_PROGRESS: &str = "data-scroll-progress";
    pub const BACK_TO_TOP: &str = "data-back-to-top";
    pub const LAZY_SRC: &str = "data-lazy-src";
    pub const COPY: &str = "data-copy";
    pub const FILTER: &str = "data-filter";
    pub const CATEGORY: &str = "data-category";
    pub const ASYNC_FORM: &str = "data-async";
    pub const NATIVE_JUMP: &str = "data-native-jump";
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub reveal_threshold: f64,
    pub spy_offset: f64,
    pub hide_threshold: f64,
    pub back_to_top_threshold: f64,
    pub parallax_factor: f64,
    pub scroll_duration_ms: u32,
    pub toast_duration_ms: u32,
    pub toast_fade_ms: u32,
    pub copy_reset_ms: u32,
    pub resize_debounce_ms: u32,
    pub desktop_breakpoint: f64,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            spy_offset: DEFAULT_SPY_OFFSET_PX,
            hide_threshold: DEFAULT_HIDE_THRESHOLD_PX,
            back_to_top_threshold: DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            parallax_factor: DEFAULT_PARALLAX_FACTOR,
            scroll_duration_ms: DEFAULT_SCROLL_DURATION_MS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            toast_fade_ms: DEFAULT_TOAST_FADE_MS,
            copy_reset_ms: DEFAULT_COPY_RESET_MS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            desktop_breakpoint: DEFAULT_DESKTOP_BREAKPOINT_PX,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    /// Builds the config from an attribute lookup. Missing, unparsable or
    /// out-of-range values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            reveal_threshold: parse_f64_with_bounds(
                lookup(keys::REVEAL_THRESHOLD),
                DEFAULT_REVEAL_THRESHOLD,
                REVEAL_THRESHOLD_BOUNDS,
            ),
            spy_offset: parse_f64_with_bounds(
                lookup(keys::SPY_OFFSET),
                DEFAULT_SPY_OFFSET_PX,
                SPY_OFFSET_PX_BOUNDS,
            ),
            hide_threshold: parse_f64_with_bounds(
                lookup(keys::HIDE_THRESHOLD),
                DEFAULT_HIDE_THRESHOLD_PX,
                HIDE_THRESHOLD_PX_BOUNDS,
            ),
            back_to_top_threshold: parse_f64_with_bounds(
                lookup(keys::BACK_TO_TOP_THRESHOLD),
                DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
                BACK_TO_TOP_THRESHOLD_PX_BOUNDS,
            ),
            parallax_factor: parse_f64_with_bounds(
                lookup(keys::PARALLAX_FACTOR),
                DEFAULT_PARALLAX_FACTOR,
                PARALLAX_FACTOR_BOUNDS,
            ),
            scroll_duration_ms: parse_u32_with_bounds(
                lookup(keys::SCROLL_DURATION_MS),
                DEFAULT_SCROLL_DURATION_MS,
                SCROLL_DURATION_MS_BOUNDS,
            ),
            toast_duration_ms: parse_u32_with_bounds(
                lookup(keys::TOAST_DURATION_MS),
                DEFAULT_TOAST_DURATION_MS,
                TOAST_DURATION_MS_BOUNDS,
            ),
            toast_fade_ms: DEFAULT_TOAST_FADE_MS,
            copy_reset_ms: parse_u32_with_bounds(
                lookup(keys::COPY_RESET_MS),
                DEFAULT_COPY_RESET_MS,
                COPY_RESET_MS_BOUNDS,
            ),
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            desktop_breakpoint: parse_f64_with_bounds(
                lookup(keys::DESKTOP_BREAKPOINT),
                DEFAULT_DESKTOP_BREAKPOINT_PX,
                DESKTOP_BREAKPOINT_PX_BOUNDS,
            ),
            log_level: parse_log_level(lookup(keys::LOG_LEVEL), DEFAULT_LOG_LEVEL),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_document() -> Self {
        let body = crate::util::browser::document().and_then(|d| d.body());
        Self::from_lookup(|key| body.as_ref().and_then(|b| b.get_attribute(key)))
    }
}

pub fn parse_f64_with_bounds(value: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_u32_with_bounds(value: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<String>, default: LogLevel) -> LogLevel {
    value
        .map(|value| value.trim().to_ascii_lowercase())
        .and_then(|value| LogLevel::from_str(&value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SiteConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        SiteConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        assert_eq!(config_from(&[]), SiteConfig::default());
    }

    #[test]
    fn in_range_overrides_are_applied() {
        let config = config_from(&[
            (keys::SPY_OFFSET, "90"),
            (keys::TOAST_DURATION_MS, " 2500 "),
            (keys::LOG_LEVEL, "DEBUG"),
        ]);

        assert_eq!(config.spy_offset, 90.0);
        assert_eq!(config.toast_duration_ms, 2_500);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_range_or_garbage_overrides_fall_back() {
        let config = config_from(&[
            (keys::REVEAL_THRESHOLD, "1.5"),
            (keys::SCROLL_DURATION_MS, "-1"),
            (keys::DESKTOP_BREAKPOINT, "wide"),
            (keys::LOG_LEVEL, "trace"),
        ]);

        assert_eq!(config.reveal_threshold, DEFAULT_REVEAL_THRESHOLD);
        assert_eq!(config.scroll_duration_ms, DEFAULT_SCROLL_DURATION_MS);
        assert_eq!(config.desktop_breakpoint, DEFAULT_DESKTOP_BREAKPOINT_PX);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }
}
