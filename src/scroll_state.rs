use serde::Serialize;

// Zoomed pages report fractional offsets.
const BOTTOM_TOLERANCE: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollState {
    pub position: f64,
    pub direction: Direction,
    pub velocity: f64,
    pub is_at_top: bool,
    pub is_at_bottom: bool,
    pub percent: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            position: 0.0,
            direction: Direction::Up,
            velocity: 0.0,
            is_at_top: true,
            is_at_bottom: false,
            percent: 0.0,
            viewport_height: 0.0,
            document_height: 0.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScrollTracker {
    state: ScrollState,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the previous position so a page restored mid-scroll does not
    /// read its first update as a jump downwards.
    pub fn starting_at(position: f64) -> Self {
        Self {
            state: ScrollState {
                position,
                is_at_top: position <= 0.0,
                ..ScrollState::default()
            },
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn update(
        &mut self,
        position: f64,
        document_height: f64,
        viewport_height: f64,
    ) -> &ScrollState {
        let previous = self.state.position;
        let velocity = position - previous;

        let direction = if velocity > 0.0 {
            Direction::Down
        } else if velocity < 0.0 {
            Direction::Up
        } else {
            // resize without scrolling
            self.state.direction
        };

        let max_scroll = (document_height - viewport_height).max(0.0);
        let percent = if max_scroll > 0.0 {
            (position / max_scroll * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        self.state = ScrollState {
            position,
            direction,
            velocity,
            is_at_top: position <= 0.0,
            is_at_bottom: max_scroll <= 0.0 || position >= max_scroll - BOTTOM_TOLERANCE,
            percent,
            viewport_height,
            document_height,
        };

        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increasing_positions_report_down() {
        let mut tracker = ScrollTracker::new();
        for position in [10.0, 50.0, 120.0, 480.0] {
            let state = tracker.update(position, 3_000.0, 800.0);
            assert_eq!(state.direction, Direction::Down);
            assert!(state.velocity > 0.0);
        }
    }

    #[test]
    fn decreasing_positions_report_up() {
        let mut tracker = ScrollTracker::new();
        tracker.update(900.0, 3_000.0, 800.0);
        for position in [480.0, 120.0, 50.0, 10.0] {
            let state = tracker.update(position, 3_000.0, 800.0);
            assert_eq!(state.direction, Direction::Up);
            assert!(state.velocity < 0.0);
        }
    }

    #[test]
    fn unchanged_position_keeps_previous_direction() {
        let mut tracker = ScrollTracker::new();
        tracker.update(300.0, 3_000.0, 800.0);
        let state = tracker.update(300.0, 3_000.0, 600.0);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn page_loaded_mid_scroll_starts_moving_up() {
        let mut tracker = ScrollTracker::starting_at(2_000.0);
        let state = tracker.update(2_000.0, 4_000.0, 800.0);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.velocity, 0.0);
        assert!(!state.is_at_top);

        let state = tracker.update(2_040.0, 4_000.0, 800.0);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.velocity, 40.0);
    }

    #[test]
    fn percent_stays_within_bounds() {
        let mut tracker = ScrollTracker::new();
        for position in [-40.0, 0.0, 1_100.0, 2_200.0, 2_500.0] {
            let state = tracker.update(position, 3_000.0, 800.0);
            assert!((0.0..=100.0).contains(&state.percent), "{}", state.percent);
        }
        assert_eq!(tracker.update(1_100.0, 3_000.0, 800.0).percent, 50.0);
    }

    #[test]
    fn unscrollable_page_has_zero_percent_and_both_boundaries() {
        let mut tracker = ScrollTracker::new();
        let state = tracker.update(0.0, 600.0, 800.0);
        assert_eq!(state.percent, 0.0);
        assert!(state.is_at_top);
        assert!(state.is_at_bottom);
    }

    #[test]
    fn boundary_flags_follow_position() {
        let mut tracker = ScrollTracker::new();
        let top = tracker.update(0.0, 2_000.0, 800.0).clone();
        assert!(top.is_at_top && !top.is_at_bottom);

        let middle = tracker.update(600.0, 2_000.0, 800.0).clone();
        assert!(!middle.is_at_top && !middle.is_at_bottom);

        let bottom = tracker.update(1_199.5, 2_000.0, 800.0);
        assert!(bottom.is_at_bottom);
    }

    #[test]
    fn state_serializes_with_camel_case_fields() {
        let mut tracker = ScrollTracker::new();
        tracker.update(100.0, 2_000.0, 800.0);
        let value = serde_json::to_value(tracker.state()).expect("serializable state");
        assert_eq!(value["direction"], "down");
        assert_eq!(value["isAtTop"], false);
    }
}
