#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

impl Span {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn contains(self, y: f64) -> bool {
        self.top <= y && y < self.bottom
    }
}

pub fn intersects_viewport(span: Span, viewport_height: f64) -> bool {
    span.bottom > 0.0 && span.top < viewport_height
}

#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn complete(&mut self) {
        self.pending = false;
    }
}

/// Generation counter backing a trailing-edge debounce.
///
/// Each `schedule` supersedes the previous one; a timer created for an older
/// generation finds `fire` returning false and does nothing.
#[derive(Debug, Default)]
pub struct Debounce {
    generation: u64,
}

impl Debounce {
    pub fn schedule(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn fire(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn px(value: f64) -> String {
    format!("{value:.2}px")
}

#[cfg(target_arch = "wasm32")]
pub mod browser {
    use web_sys::{window, Document, Element, HtmlElement, Window};

    use super::Span;

    pub fn document() -> Option<Document> {
        window()?.document()
    }

    pub fn scroll_position(win: &Window) -> f64 {
        win.scroll_y().unwrap_or(0.0)
    }

    pub fn viewport_height(win: &Window) -> f64 {
        win.inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(720.0)
    }

    pub fn viewport_width(win: &Window) -> f64 {
        win.inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(1280.0)
    }

    pub fn document_height(document: &Document) -> f64 {
        document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or(0.0)
    }

    pub fn span_of(element: &Element) -> Span {
        let rect = element.get_bounding_client_rect();
        Span::new(rect.top(), rect.bottom())
    }

    pub fn select_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
        use wasm_bindgen::JsCast;

        let Ok(nodes) = document.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    pub fn prefers_reduced_motion() -> bool {
        window()
            .and_then(|w| {
                w.match_media("(prefers-reduced-motion: reduce)")
                    .ok()
                    .flatten()
            })
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }

    pub fn set_timeout(callback: impl FnOnce() + 'static, delay_ms: u32) -> Option<i32> {
        use wasm_bindgen::{closure::Closure, JsCast};

        let win = window()?;
        let callback = Closure::once_into_js(callback);
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        )
        .ok()
    }
}
