use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};
use yew::Callback;

use crate::config::{attrs, SiteConfig};
use crate::effects::{
    self, ClassChange, HideConfig, ParallaxConfig, RevealConfig, StickyConfig, StyleDirective,
    ACTIVE_CLASS, SCROLLED_CLASS,
};
use crate::interactions::LazyImages;
use crate::logging::{log_event, LogLevel};
use crate::navigation::{classify_shortcut, is_text_field, smooth_scroll_target, Shortcut};
use crate::scroll_state::{ScrollState, ScrollTracker};
use crate::smooth_scroll::{scroll_to_anchor, scroll_window_to};
use crate::util::browser::{
    document, document_height, scroll_position, select_all, set_timeout, span_of, viewport_height,
    viewport_width,
};
use crate::util::{intersects_viewport, parse_px, Debounce, FrameGate};

pub const MENU_ATTR: &str = "data-menu";
pub const MENU_TOGGLE_ATTR: &str = "data-menu-toggle";

#[derive(Clone)]
pub struct ControllerHooks {
    pub on_close_menu: Callback<()>,
    pub on_resize: Callback<f64>,
}

struct Tracked {
    parallax: Vec<(HtmlElement, ParallaxConfig)>,
    reveal: Vec<(HtmlElement, bool)>,
    spy_sections: Vec<HtmlElement>,
    spy_links: Vec<HtmlElement>,
    hide: Vec<HtmlElement>,
    sticky: Vec<(HtmlElement, StickyConfig)>,
    progress: Vec<HtmlElement>,
    back_to_top: Vec<HtmlElement>,
}

impl Tracked {
    fn collect(document: &Document, config: &SiteConfig) -> Self {
        let selector = |attr: &str| format!("[{attr}]");

        let parallax = select_all(document, &selector(attrs::PARALLAX))
            .into_iter()
            .map(|element| {
                let value = element.get_attribute(attrs::PARALLAX);
                let parallax = ParallaxConfig::from_attribute(value.as_deref(), config);
                (element, parallax)
            })
            .collect();

        let reveal = select_all(document, &selector(attrs::REVEAL))
            .into_iter()
            .map(|element| (element, false))
            .collect();

        let sticky = select_all(document, &selector(attrs::STICKY))
            .into_iter()
            .map(|element| {
                let sticky = capture_sticky(&element);
                (element, sticky)
            })
            .collect();

        Self {
            parallax,
            reveal,
            spy_sections: select_all(document, &format!("[{}][id]", attrs::SCROLL_SPY)),
            spy_links: select_all(document, &selector(attrs::SCROLL_NAV)),
            hide: select_all(document, &selector(attrs::HIDE_ON_SCROLL)),
            sticky,
            progress: select_all(document, &selector(attrs::SCROLL_PROGRESS)),
            back_to_top: select_all(document, &selector(attrs::BACK_TO_TOP)),
        }
    }

    fn is_empty(&self) -> bool {
        self.parallax.is_empty()
            && self.reveal.is_empty()
            && self.spy_sections.is_empty()
            && self.hide.is_empty()
            && self.sticky.is_empty()
            && self.progress.is_empty()
            && self.back_to_top.is_empty()
    }
}

// Must run while the element is not fixed, otherwise the captured top is the
// fixed offset.
fn capture_sticky(element: &HtmlElement) -> StickyConfig {
    let rect = element.get_bounding_client_rect();
    let scroll = window().map(|w| scroll_position(&w)).unwrap_or(0.0);
    let offset = element
        .get_attribute(attrs::STICKY_OFFSET)
        .as_deref()
        .and_then(parse_px)
        .unwrap_or(0.0);

    StickyConfig {
        original_top: rect.top() + scroll,
        width: rect.width(),
        offset,
    }
}

fn apply(element: &HtmlElement, directive: &StyleDirective) {
    let style = element.style();
    for (name, value) in directive.style_properties() {
        if value.is_empty() {
            let _ = style.remove_property(name);
        } else {
            let _ = style.set_property(name, &value);
        }
    }

    match directive.class_change() {
        Some(ClassChange::Add(class)) => {
            let _ = element.class_list().add_1(class);
        }
        Some(ClassChange::Remove(class)) => {
            let _ = element.class_list().remove_1(class);
        }
        None => {}
    }
}

struct Inner {
    config: Rc<SiteConfig>,
    tracker: ScrollTracker,
    gate: FrameGate,
    resize: Debounce,
    frame_request: Option<i32>,
    tracked: Tracked,
}

impl Inner {
    fn run_frame(&mut self) {
        self.gate.complete();
        self.frame_request = None;

        let Some(win) = window() else {
            return;
        };
        let Some(document) = win.document() else {
            return;
        };

        let previous = self.tracker.state().direction;
        let state = self
            .tracker
            .update(
                scroll_position(&win),
                document_height(&document),
                viewport_height(&win),
            )
            .clone();

        if state.direction != previous {
            log_event(
                &self.config,
                LogLevel::Debug,
                "scroll_direction_changed",
                serde_json::json!({
                    "direction": state.direction.as_str(),
                    "position": state.position,
                }),
            );
        }

        self.apply_effects(&state);
    }

    fn apply_effects(&mut self, state: &ScrollState) {
        let config = self.config.clone();
        let tracked = &mut self.tracked;

        for (element, parallax) in &tracked.parallax {
            if intersects_viewport(span_of(element), state.viewport_height) {
                apply(element, &effects::parallax(state, parallax));
            }
        }

        for (element, revealed) in tracked.reveal.iter_mut() {
            let rect = element.get_bounding_client_rect();
            let reveal = RevealConfig {
                top: rect.top(),
                height: rect.height(),
                revealed: *revealed,
                threshold: config.reveal_threshold,
            };
            let directive = effects::reveal(state, &reveal);
            if directive == StyleDirective::Reveal {
                *revealed = true;
            }
            apply(element, &directive);
        }

        if !tracked.spy_sections.is_empty() {
            let spans: Vec<_> = tracked.spy_sections.iter().map(|s| span_of(s)).collect();
            let active = effects::scroll_spy(&spans, config.spy_offset)
                .and_then(|index| tracked.spy_sections.get(index))
                .map(|section| section.id());

            for link in &tracked.spy_links {
                let is_active = active.is_some()
                    && link.get_attribute(attrs::SCROLL_NAV).as_deref() == active.as_deref();
                let _ = link.class_list().toggle_with_force(ACTIVE_CLASS, is_active);
            }
        }

        let hide = HideConfig {
            threshold: config.hide_threshold,
        };
        for element in &tracked.hide {
            apply(element, &effects::hide_on_scroll(state, &hide));
            let _ = element
                .class_list()
                .toggle_with_force(SCROLLED_CLASS, !state.is_at_top);
        }

        for (element, sticky) in &tracked.sticky {
            apply(element, &effects::sticky(state, sticky));
        }

        let progress = effects::progress(state);
        for element in &tracked.progress {
            apply(element, &progress);
        }

        let back_to_top = effects::back_to_top(state, config.back_to_top_threshold);
        for element in &tracked.back_to_top {
            apply(element, &back_to_top);
        }
    }

    fn remeasure_sticky(&mut self) {
        for (element, sticky) in self.tracked.sticky.iter_mut() {
            apply(element, &StyleDirective::Flow);
            *sticky = capture_sticky(element);
        }
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target,
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub struct EffectsController {
    _listeners: Vec<Listener>,
    _frame: Rc<Closure<dyn FnMut(f64)>>,
    _lazy_images: LazyImages,
    inner: Rc<RefCell<Inner>>,
}

impl EffectsController {
    pub fn install(config: Rc<SiteConfig>, hooks: ControllerHooks) -> Option<Self> {
        let win = window()?;
        let document = win.document()?;

        let tracked = Tracked::collect(&document, &config);
        let tracker = ScrollTracker::starting_at(scroll_position(&win));
        log_event(
            &config,
            LogLevel::Debug,
            "effects_installed",
            serde_json::json!({
                "parallax": tracked.parallax.len(),
                "reveal": tracked.reveal.len(),
                "spySections": tracked.spy_sections.len(),
                "sticky": tracked.sticky.len(),
                "idle": tracked.is_empty(),
                "state": serde_json::to_value(tracker.state()).unwrap_or_default(),
            }),
        );

        let inner = Rc::new(RefCell::new(Inner {
            config: config.clone(),
            tracker,
            gate: FrameGate::default(),
            resize: Debounce::default(),
            frame_request: None,
            tracked,
        }));

        let frame = {
            let weak = Rc::downgrade(&inner);
            Rc::new(Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().run_frame();
                }
            }))
        };

        let mut listeners = Vec::new();
        let window_target: EventTarget = win.clone().into();
        let document_target: EventTarget = document.clone().into();

        listeners.extend(Listener::attach(window_target.clone(), "scroll", {
            let weak = Rc::downgrade(&inner);
            let frame = frame.clone();
            move |_event: Event| request_frame(&weak, &frame)
        }));

        listeners.extend(Listener::attach(window_target.clone(), "resize", {
            let weak = Rc::downgrade(&inner);
            let frame = frame.clone();
            let hooks = hooks.clone();
            move |_event: Event| {
                if let Some(win) = window() {
                    hooks.on_resize.emit(viewport_width(&win));
                }
                schedule_remeasure(&weak, &frame);
            }
        }));

        listeners.extend(Listener::attach(window_target, "keydown", {
            let config = config.clone();
            let hooks = hooks.clone();
            move |event: Event| {
                if let Ok(event) = event.dyn_into::<KeyboardEvent>() {
                    handle_shortcut(&event, &config, &hooks);
                }
            }
        }));

        listeners.extend(Listener::attach(document_target, "click", {
            let config = config.clone();
            move |event: Event| handle_click(&event, &config, &hooks)
        }));

        let lazy_images = LazyImages::observe(&document);

        // Initial pass so reveal, spy and sticky reflect a restored scroll
        // position without waiting for the first scroll event.
        inner.borrow_mut().run_frame();

        Some(Self {
            _listeners: listeners,
            _frame: frame,
            _lazy_images: lazy_images,
            inner,
        })
    }
}

impl Drop for EffectsController {
    fn drop(&mut self) {
        if let (Some(win), Some(id)) = (window(), self.inner.borrow_mut().frame_request.take()) {
            let _ = win.cancel_animation_frame(id);
        }
    }
}

fn request_frame(inner: &Weak<RefCell<Inner>>, frame: &Closure<dyn FnMut(f64)>) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let Some(win) = window() else {
        return;
    };

    let mut inner = inner.borrow_mut();
    if !inner.gate.request() {
        return;
    }

    match win.request_animation_frame(frame.as_ref().unchecked_ref()) {
        Ok(id) => inner.frame_request = Some(id),
        Err(_) => inner.gate.complete(),
    }
}

fn schedule_remeasure(weak: &Weak<RefCell<Inner>>, frame: &Rc<Closure<dyn FnMut(f64)>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let (generation, delay) = {
        let mut inner = inner.borrow_mut();
        (inner.resize.schedule(), inner.config.resize_debounce_ms)
    };

    let weak = weak.clone();
    let frame = Rc::downgrade(frame);
    let _ = set_timeout(
        move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.borrow().resize.fire(generation) {
                return;
            }
            inner.borrow_mut().remeasure_sticky();
            if let Some(frame) = frame.upgrade() {
                request_frame(&weak, &frame);
            }
        },
        delay,
    );
}

fn focus_in_text_field() -> bool {
    document()
        .and_then(|d| d.active_element())
        .map(|element| {
            let editable = element
                .dyn_ref::<HtmlElement>()
                .map(|html| html.is_content_editable())
                .unwrap_or(false);
            is_text_field(&element.tag_name(), editable)
        })
        .unwrap_or(false)
}

fn handle_shortcut(event: &KeyboardEvent, config: &SiteConfig, hooks: &ControllerHooks) {
    if event.ctrl_key() || event.meta_key() || event.alt_key() {
        return;
    }

    let Some(shortcut) = classify_shortcut(&event.key(), focus_in_text_field()) else {
        return;
    };

    match shortcut {
        Shortcut::ScrollToTop => {
            event.prevent_default();
            scroll_window_to(0.0, config.scroll_duration_ms);
        }
        Shortcut::ScrollToBottom => {
            event.prevent_default();
            let Some(win) = window() else {
                return;
            };
            let bottom = document()
                .map(|d| (document_height(&d) - viewport_height(&win)).max(0.0))
                .unwrap_or(0.0);
            scroll_window_to(bottom, config.scroll_duration_ms);
        }
        Shortcut::CloseMenu => hooks.on_close_menu.emit(()),
    }
}

fn closest(target: &Element, selector: &str) -> Option<Element> {
    target.closest(selector).ok().flatten()
}

/// Smooth-scrolls in-page anchors and closes the menu on any click that is
/// not on the toggle or on non-link space inside the menu.
fn handle_click(event: &Event, config: &SiteConfig, hooks: &ControllerHooks) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    let link = closest(&target, "a[href]");
    let href = link.as_ref().and_then(|link| link.get_attribute("href"));
    let native_jump = link
        .as_ref()
        .is_some_and(|link| link.has_attribute(attrs::NATIVE_JUMP));
    if let Some(id) = href
        .as_deref()
        .and_then(|href| smooth_scroll_target(href, native_jump))
    {
        event.prevent_default();
        scroll_to_anchor(id, config.spy_offset, config.scroll_duration_ms);
    }

    let on_toggle = closest(&target, &format!("[{MENU_TOGGLE_ATTR}]")).is_some();
    let inside_menu = closest(&target, &format!("[{MENU_ATTR}]")).is_some();
    if !on_toggle && (link.is_some() || !inside_menu) {
        hooks.on_close_menu.emit(());
    }
}
