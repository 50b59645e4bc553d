pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn anchor_target(element_top: f64, current: f64, offset: f64) -> f64 {
    (element_top + current - offset).max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub position: f64,
    pub finished: bool,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms: f64::from(duration_ms.max(1)),
            started_at: None,
        }
    }

    /// Position for the frame at `timestamp_ms`. The first frame anchors the
    /// start time, so the clock source only has to be monotonic.
    pub fn frame(&mut self, timestamp_ms: f64) -> Frame {
        let started_at = *self.started_at.get_or_insert(timestamp_ms);
        let progress = ((timestamp_ms - started_at) / self.duration_ms).clamp(0.0, 1.0);
        let position = self.from + (self.to - self.from) * ease_in_out(progress);

        Frame {
            position,
            finished: progress >= 1.0,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn scroll_window_to(target: f64, duration_ms: u32) {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::window;

    let Some(win) = window() else {
        return;
    };
    let start = crate::util::browser::scroll_position(&win);

    if crate::util::browser::prefers_reduced_motion() {
        win.scroll_to_with_x_and_y(0.0, target);
        return;
    }

    let mut animation = ScrollAnimation::new(start, target, duration_ms);
    let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = handle.clone();

    *handle.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
        let Some(win) = window() else {
            next.borrow_mut().take();
            return;
        };

        let frame = animation.frame(timestamp);
        win.scroll_to_with_x_and_y(0.0, frame.position);

        if frame.finished {
            next.borrow_mut().take();
            return;
        }

        if let Some(callback) = next.borrow().as_ref() {
            let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));

    if let Some(callback) = handle.borrow().as_ref() {
        let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// Smooth-scrolls so the element with `id` lands `offset` pixels below the
/// viewport top. Unknown ids are ignored.
#[cfg(target_arch = "wasm32")]
pub fn scroll_to_anchor(id: &str, offset: f64, duration_ms: u32) {
    let Some(document) = crate::util::browser::document() else {
        return;
    };
    let Some(element) = document.get_element_by_id(id) else {
        return;
    };
    let Some(win) = web_sys::window() else {
        return;
    };

    let current = crate::util::browser::scroll_position(&win);
    let top = element.get_bounding_client_rect().top();
    scroll_window_to(anchor_target(top, current, offset), duration_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_in_out_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(1.7), 1.0);
    }

    #[test]
    fn ease_in_out_is_monotonic() {
        let samples: Vec<f64> = (0..=100)
            .map(|step| ease_in_out(f64::from(step) / 100.0))
            .collect();
        assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn animation_runs_from_start_to_target() {
        let mut animation = ScrollAnimation::new(100.0, 900.0, 800);

        let first = animation.frame(5_000.0);
        assert_eq!(first.position, 100.0);
        assert!(!first.finished);

        let middle = animation.frame(5_400.0);
        assert_eq!(middle.position, 500.0);

        let last = animation.frame(5_800.0);
        assert_eq!(last.position, 900.0);
        assert!(last.finished);
    }

    #[test]
    fn anchor_target_accounts_for_offset_and_clamps_at_zero() {
        assert_eq!(anchor_target(400.0, 1_000.0, 70.0), 1_330.0);
        assert_eq!(anchor_target(-20.0, 10.0, 70.0), 0.0);
    }
}
