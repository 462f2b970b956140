mod chrome;
mod layout;
mod overlay;

pub use chrome::{HudView, draw_chrome, draw_exit_fullscreen_hint};
pub use layout::{UiLayout, centered_rect, split_layout};
pub use overlay::{ThumbCard, draw_drawer, draw_help_overlay, draw_loading_overlay};
