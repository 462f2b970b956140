use ratatui::Frame;
use ratatui::layout::Rect;

use crate::assets::PageAsset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterKind {
    Graphics,
    Card,
}

/// Everything needed to draw one page slot.
pub struct PresentSpec<'a> {
    pub index: usize,
    pub label: &'a str,
    pub asset: &'a PageAsset,
    pub zoom: f32,
    /// One-shot reveal flag; unrevealed pages draw dimmed.
    pub revealed: bool,
}

/// Rendering seam between the reader and the terminal's image capabilities,
/// so scroll and state logic stay testable without a graphics-capable tty.
pub trait PagePresenter {
    fn name(&self) -> &'static str;

    /// Cell pixel metrics when the terminal reports them; layout falls back
    /// to a default footprint otherwise.
    fn cell_size_px(&self) -> Option<(u16, u16)>;

    fn draw_page(&mut self, frame: &mut Frame<'_>, area: Rect, spec: &PresentSpec<'_>);

    /// Invalidate cached encodings; called when zoom or terminal size change.
    fn invalidate(&mut self);
}
