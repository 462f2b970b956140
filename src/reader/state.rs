pub const ZOOM_MIN: f32 = 0.6;
pub const ZOOM_MAX: f32 = 1.8;
pub const ZOOM_STEP: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 1.0;

pub fn zoom_eq(left: f32, right: f32) -> bool {
    (left - right).abs() <= 0.0005
}

/// The persisted reading position. Invariant after every mutation:
/// `current_index` in [0, N-1] and `zoom` in [ZOOM_MIN, ZOOM_MAX].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReaderState {
    pub current_index: usize,
    pub zoom: f32,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self {
            current_index: 0,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Drawer and help visibility. Independent flags, never persisted; both
/// reset closed on every start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub drawer_open: bool,
    pub help_open: bool,
    /// Highlighted thumbnail card while the drawer is open.
    pub drawer_selected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusState {
    pub message: String,
}
