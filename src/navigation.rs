pub const OPEN_CLASS: &str = "open";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    pub fn class(self) -> Option<&'static str> {
        self.open.then_some(OPEN_CLASS)
    }

    // empty restores scrolling
    pub fn body_overflow(self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }

    /// The menu only exists as an overlay below the desktop breakpoint.
    pub fn after_resize(self, viewport_width: f64, desktop_breakpoint: f64) -> Self {
        if viewport_width > desktop_breakpoint {
            self.closed()
        } else {
            self
        }
    }

    pub fn toggle_label(self) -> &'static str {
        if self.open {
            "Close menu"
        } else {
            "Open menu"
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    ScrollToTop,
    ScrollToBottom,
    CloseMenu,
}

pub fn classify_shortcut(key: &str, focus_in_text_field: bool) -> Option<Shortcut> {
    if focus_in_text_field {
        return None;
    }

    match key {
        "Home" => Some(Shortcut::ScrollToTop),
        "End" => Some(Shortcut::ScrollToBottom),
        "Escape" | "Esc" => Some(Shortcut::CloseMenu),
        _ => None,
    }
}

pub fn is_text_field(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || matches!(
            tag_name.to_ascii_uppercase().as_str(),
            "INPUT" | "TEXTAREA" | "SELECT"
        )
}

pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Anchor to animate for a clicked link. Links marked for a native jump (the
/// skip link) keep the browser's fragment navigation, which also moves the
/// sequential focus point to the target.
pub fn smooth_scroll_target(href: &str, native_jump: bool) -> Option<&str> {
    if native_jump {
        return None;
    }
    anchor_id(href)
}
