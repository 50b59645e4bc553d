//! Scroll-driven behaviors as plain functions of the current [`ScrollState`]
//! and per-element configuration. Applying the returned directive is left to
//! the DOM runner.

use crate::config::{SiteConfig, PARALLAX_FACTOR_BOUNDS};
use crate::scroll_state::{Direction, ScrollState};
use crate::util::{px, Span};

pub const REVEALED_CLASS: &str = "revealed";
pub const HIDDEN_CLASS: &str = "nav-hidden";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const STUCK_CLASS: &str = "is-stuck";
pub const ACTIVE_CLASS: &str = "active";
pub const VISIBLE_CLASS: &str = "visible";

#[derive(Clone, Debug, PartialEq)]
pub enum StyleDirective {
    Keep,
    Translate { y: f64 },
    Reveal,
    Hide,
    Show,
    Fixed { top: f64, width: f64 },
    Flow,
    Progress { percent: f64 },
    Visible(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassChange {
    Add(&'static str),
    Remove(&'static str),
}

impl StyleDirective {
    // An empty value clears the property.
    pub fn style_properties(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Keep | Self::Visible(_) => Vec::new(),
            Self::Translate { y } => {
                vec![("transform", format!("translate3d(0, {}, 0)", px(*y)))]
            }
            Self::Reveal => vec![
                ("opacity", "1".to_string()),
                ("transform", "translateY(0)".to_string()),
            ],
            Self::Hide => vec![("transform", "translateY(-100%)".to_string())],
            Self::Show => vec![("transform", "translateY(0)".to_string())],
            Self::Fixed { top, width } => vec![
                ("position", "fixed".to_string()),
                ("top", px(*top)),
                ("width", px(*width)),
            ],
            Self::Flow => vec![
                ("position", String::new()),
                ("top", String::new()),
                ("width", String::new()),
            ],
            Self::Progress { percent } => vec![("width", format!("{percent:.2}%"))],
        }
    }

    pub fn class_change(&self) -> Option<ClassChange> {
        match self {
            Self::Reveal => Some(ClassChange::Add(REVEALED_CLASS)),
            Self::Hide => Some(ClassChange::Add(HIDDEN_CLASS)),
            Self::Show => Some(ClassChange::Remove(HIDDEN_CLASS)),
            Self::Fixed { .. } => Some(ClassChange::Add(STUCK_CLASS)),
            Self::Flow => Some(ClassChange::Remove(STUCK_CLASS)),
            Self::Visible(true) => Some(ClassChange::Add(VISIBLE_CLASS)),
            Self::Visible(false) => Some(ClassChange::Remove(VISIBLE_CLASS)),
            Self::Keep | Self::Translate { .. } | Self::Progress { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxConfig {
    pub factor: f64,
}

impl ParallaxConfig {
    pub fn from_attribute(value: Option<&str>, config: &SiteConfig) -> Self {
        let factor = crate::config::parse_f64_with_bounds(
            value.map(str::to_string),
            config.parallax_factor,
            PARALLAX_FACTOR_BOUNDS,
        );
        Self { factor }
    }
}

pub fn parallax(state: &ScrollState, element: &ParallaxConfig) -> StyleDirective {
    StyleDirective::Translate {
        y: state.position * element.factor,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Current viewport-relative box.
    pub top: f64,
    pub height: f64,
    pub revealed: bool,
    pub threshold: f64,
}

/// Reveals once the element's top passes `threshold` of the viewport height.
/// An already revealed element is never touched again, and an element without
/// a layout box (`display: none`) waits until it has one.
pub fn reveal(state: &ScrollState, element: &RevealConfig) -> StyleDirective {
    if element.revealed || element.height <= 0.0 {
        return StyleDirective::Keep;
    }

    if element.top < state.viewport_height * element.threshold {
        StyleDirective::Reveal
    } else {
        StyleDirective::Keep
    }
}

// Overlapping sections: the last one in document order wins.
pub fn scroll_spy(sections: &[Span], spy_offset: f64) -> Option<usize> {
    sections
        .iter()
        .enumerate()
        .filter(|(_, span)| span.contains(spy_offset))
        .map(|(index, _)| index)
        .last()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HideConfig {
    pub threshold: f64,
}

pub fn hide_on_scroll(state: &ScrollState, element: &HideConfig) -> StyleDirective {
    if state.direction == Direction::Down && state.position > element.threshold {
        StyleDirective::Hide
    } else {
        StyleDirective::Show
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickyConfig {
    // captured while in normal flow
    pub original_top: f64,
    pub width: f64,
    pub offset: f64,
}

pub fn sticky(state: &ScrollState, element: &StickyConfig) -> StyleDirective {
    if state.position > element.original_top - element.offset {
        StyleDirective::Fixed {
            top: element.offset,
            width: element.width,
        }
    } else {
        StyleDirective::Flow
    }
}

pub fn progress(state: &ScrollState) -> StyleDirective {
    StyleDirective::Progress {
        percent: state.percent,
    }
}

pub fn back_to_top(state: &ScrollState, threshold: f64) -> StyleDirective {
    StyleDirective::Visible(state.position > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_state::ScrollTracker;

    fn state_at(position: f64) -> ScrollState {
        let mut tracker = ScrollTracker::new();
        tracker.update(position, 4_000.0, 800.0).clone()
    }

    fn unrevealed(top: f64, height: f64) -> RevealConfig {
        RevealConfig {
            top,
            height,
            revealed: false,
            threshold: 0.85,
        }
    }

    #[test]
    fn parallax_scales_position_by_factor() {
        let state = state_at(200.0);
        assert_eq!(
            parallax(&state, &ParallaxConfig { factor: 0.5 }),
            StyleDirective::Translate { y: 100.0 }
        );
        assert_eq!(
            parallax(&state, &ParallaxConfig { factor: -0.25 }),
            StyleDirective::Translate { y: -50.0 }
        );
    }

    #[test]
    fn parallax_factor_defaults_when_attribute_blank_or_invalid() {
        let config = SiteConfig::default();
        assert_eq!(ParallaxConfig::from_attribute(Some(""), &config).factor, 0.5);
        assert_eq!(ParallaxConfig::from_attribute(None, &config).factor, 0.5);
        assert_eq!(ParallaxConfig::from_attribute(Some("9"), &config).factor, 0.5);
        assert_eq!(ParallaxConfig::from_attribute(Some("0.3"), &config).factor, 0.3);
    }

    #[test]
    fn reveal_triggers_below_threshold_line() {
        let state = state_at(0.0);

        assert_eq!(reveal(&state, &unrevealed(700.0, 240.0)), StyleDirective::Keep);
        assert_eq!(reveal(&state, &unrevealed(679.0, 240.0)), StyleDirective::Reveal);
    }

    #[test]
    fn reveal_waits_for_hidden_elements_to_get_a_box() {
        let state = state_at(0.0);
        let hidden = unrevealed(0.0, 0.0);
        assert_eq!(reveal(&state, &hidden), StyleDirective::Keep);

        let shown_below_fold = unrevealed(1_200.0, 240.0);
        assert_eq!(reveal(&state, &shown_below_fold), StyleDirective::Keep);
        let scrolled_into_view = unrevealed(400.0, 240.0);
        assert_eq!(reveal(&state, &scrolled_into_view), StyleDirective::Reveal);
    }

    #[test]
    fn reveal_is_idempotent_once_revealed() {
        let mut tracker = ScrollTracker::new();
        let mut element = unrevealed(100.0, 240.0);

        let first = reveal(tracker.update(500.0, 4_000.0, 800.0), &element);
        assert_eq!(first, StyleDirective::Reveal);
        element.revealed = true;

        for (position, top) in [(0.0, 900.0), (2_000.0, -1_400.0), (10.0, 2_000.0)] {
            element.top = top;
            let state = tracker.update(position, 4_000.0, 800.0);
            assert_eq!(reveal(state, &element), StyleDirective::Keep);
        }
    }

    #[test]
    fn scroll_spy_activates_section_under_offset_line() {
        let sections = [Span::new(70.0, 400.0)];
        assert_eq!(scroll_spy(&sections, 70.0), Some(0));
        assert_eq!(scroll_spy(&sections, 500.0), None);
    }

    #[test]
    fn scroll_spy_picks_exactly_one_of_adjacent_sections() {
        let sections = [
            Span::new(-600.0, 0.0),
            Span::new(0.0, 400.0),
            Span::new(400.0, 900.0),
        ];
        assert_eq!(scroll_spy(&sections, 70.0), Some(1));
        assert_eq!(scroll_spy(&sections, 400.0), Some(2));
    }

    #[test]
    fn scroll_spy_prefers_last_overlapping_section() {
        let sections = [Span::new(0.0, 500.0), Span::new(50.0, 300.0)];
        assert_eq!(scroll_spy(&sections, 70.0), Some(1));
    }

    #[test]
    fn hide_on_scroll_needs_downward_motion_past_threshold() {
        let element = HideConfig { threshold: 100.0 };
        let mut tracker = ScrollTracker::new();

        let state = tracker.update(80.0, 4_000.0, 800.0);
        assert_eq!(hide_on_scroll(state, &element), StyleDirective::Show);
        let state = tracker.update(250.0, 4_000.0, 800.0);
        assert_eq!(hide_on_scroll(state, &element), StyleDirective::Hide);
        let state = tracker.update(200.0, 4_000.0, 800.0);
        assert_eq!(hide_on_scroll(state, &element), StyleDirective::Show);
    }

    #[test]
    fn header_stays_visible_when_page_loads_mid_scroll() {
        let element = HideConfig { threshold: 100.0 };
        let mut tracker = ScrollTracker::starting_at(2_000.0);

        let state = tracker.update(2_000.0, 4_000.0, 800.0);
        assert_eq!(hide_on_scroll(state, &element), StyleDirective::Show);
        let state = tracker.update(2_100.0, 4_000.0, 800.0);
        assert_eq!(hide_on_scroll(state, &element), StyleDirective::Hide);
    }

    #[test]
    fn sticky_switches_to_fixed_past_original_top_minus_offset() {
        let element = StickyConfig {
            original_top: 500.0,
            width: 320.0,
            offset: 20.0,
        };

        assert_eq!(sticky(&state_at(480.0), &element), StyleDirective::Flow);
        assert_eq!(
            sticky(&state_at(481.0), &element),
            StyleDirective::Fixed {
                top: 20.0,
                width: 320.0
            }
        );
    }

    #[test]
    fn directives_map_to_styles_and_classes() {
        let fixed = StyleDirective::Fixed {
            top: 20.0,
            width: 300.0,
        };
        assert_eq!(
            fixed.style_properties(),
            vec![
                ("position", "fixed".to_string()),
                ("top", "20.00px".to_string()),
                ("width", "300.00px".to_string()),
            ]
        );
        assert_eq!(fixed.class_change(), Some(ClassChange::Add(STUCK_CLASS)));
        assert_eq!(
            StyleDirective::Flow.class_change(),
            Some(ClassChange::Remove(STUCK_CLASS))
        );
        assert!(StyleDirective::Keep.style_properties().is_empty());
    }

    #[test]
    fn back_to_top_and_progress_follow_state() {
        let state = state_at(1_600.0);
        assert_eq!(back_to_top(&state, 300.0), StyleDirective::Visible(true));
        assert_eq!(
            back_to_top(&state_at(100.0), 300.0),
            StyleDirective::Visible(false)
        );
        assert_eq!(progress(&state), StyleDirective::Progress { percent: 50.0 });
    }
}
