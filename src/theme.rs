pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        stored.and_then(Self::from_str).unwrap_or(if system_prefers_dark {
            Self::Dark
        } else {
            Self::Light
        })
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use js_sys::{Function, Reflect};
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{window, Storage};

    use super::{Theme, THEME_KEY};
    use crate::util::browser::{document, prefers_reduced_motion};

    fn local_storage() -> Option<Storage> {
        window()?.local_storage().ok().flatten()
    }

    fn system_prefers_dark() -> bool {
        window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }

    pub fn resolve_theme() -> Theme {
        let stored = local_storage().and_then(|storage| storage.get_item(THEME_KEY).ok().flatten());
        Theme::resolve(stored.as_deref(), system_prefers_dark())
    }

    pub fn apply_theme(theme: Theme) {
        if let Some(root) = document().and_then(|d| d.document_element()) {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }

    pub fn persist_theme(theme: Theme) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(THEME_KEY, theme.as_str());
        }
    }

    /// Applies the theme inside a view transition when the browser supports
    /// one and the visitor has not asked for reduced motion.
    pub fn apply_theme_with_transition(theme: Theme) {
        if prefers_reduced_motion() {
            apply_theme(theme);
            return;
        }

        let Some(document) = document() else {
            apply_theme(theme);
            return;
        };

        let document_js: JsValue = document.into();
        let Ok(start_view_transition) =
            Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
        else {
            apply_theme(theme);
            return;
        };

        let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
            apply_theme(theme);
            return;
        };

        let callback = Closure::once_into_js(move || apply_theme(theme));

        if start_view_transition.call1(&document_js, &callback).is_err() {
            apply_theme(theme);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{apply_theme, apply_theme_with_transition, persist_theme, resolve_theme};
