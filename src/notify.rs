#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#ef4444",
        }
    }

    // Errors interrupt assistive technology.
    pub fn aria_role(self) -> &'static str {
        match self {
            Self::Error => "alert",
            Self::Success => "status",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.severity.as_str())
    }

    // Concurrent toasts overlap.
    pub fn style(&self, fade_ms: u32) -> String {
        format!(
            "position: fixed; top: 20px; right: 20px; z-index: 10000; \
             padding: 1rem 1.5rem; border-radius: 8px; color: #fff; \
             background: {}; box-shadow: 0 10px 25px rgba(0, 0, 0, 0.2); \
             opacity: 0; transform: translateY(-10px); \
             transition: opacity {fade_ms}ms ease, transform {fade_ms}ms ease;",
            self.severity.background()
        )
    }
}

pub trait Notifier {
    fn notify(&self, toast: Toast);
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::HtmlElement;

    use super::{Notifier, Toast};
    use crate::config::SiteConfig;
    use crate::util::browser::set_timeout;

    pub fn show_toast(toast: &Toast, duration_ms: u32, fade_ms: u32) {
        let Some(document) = crate::util::browser::document() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let Some(element) = document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        element.set_class_name(&toast.class_name());
        let _ = element.set_attribute("role", toast.severity.aria_role());
        let _ = element.set_attribute("style", &toast.style(fade_ms));
        element.set_text_content(Some(&toast.message));

        if body.append_child(&element).is_err() {
            return;
        }

        let shown = element.clone();
        let _ = set_timeout(
            move || {
                let style = shown.style();
                let _ = style.set_property("opacity", "1");
                let _ = style.set_property("transform", "translateY(0)");
            },
            16,
        );

        let _ = set_timeout(
            move || {
                let style = element.style();
                let _ = style.set_property("opacity", "0");
                let _ = style.set_property("transform", "translateY(-10px)");
                let _ = set_timeout(move || element.remove(), fade_ms);
            },
            duration_ms,
        );
    }

    #[derive(Clone)]
    pub struct DomNotifier {
        config: Rc<SiteConfig>,
    }

    impl DomNotifier {
        pub fn new(config: Rc<SiteConfig>) -> Self {
            Self { config }
        }
    }

    impl Notifier for DomNotifier {
        fn notify(&self, toast: Toast) {
            show_toast(&toast, self.config.toast_duration_ms, self.config.toast_fade_ms);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{show_toast, DomNotifier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_drives_class_and_background() {
        let toast = Toast::new("Saved", Severity::Success);
        assert_eq!(toast.class_name(), "notification notification-success");
        assert!(toast.style(300).contains("background: #10b981"));
        assert!(toast.style(300).contains("opacity 300ms"));
    }

    #[test]
    fn only_errors_use_alert_role() {
        assert_eq!(Severity::Error.aria_role(), "alert");
        assert_eq!(Severity::Success.aria_role(), "status");
    }
}
