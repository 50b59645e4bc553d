pub mod clipboard;
pub mod config;
pub mod effects;
pub mod error;
pub mod filter;
pub mod forms;
pub mod logging;
pub mod navigation;
pub mod notify;
pub mod scroll_state;
pub mod smooth_scroll;
pub mod theme;
pub mod util;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod interactions;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
