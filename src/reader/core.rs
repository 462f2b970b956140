use ratatui::layout::Rect;

use crate::assets::PageAsset;
use crate::catalog::PageCatalog;
use crate::command::{Effect, ScrollAmount};
use crate::config::Config;
use crate::presenter::PagePresenter;
use crate::session::SessionStore;
use crate::ui::ThumbCard;
use crate::viewport::{
    ColumnLayout, MeasureParams, RevealState, ScrollState, resolve_current_index,
};

use super::fullscreen::FullscreenHost;
use super::state::{OverlayState, ReaderState, StatusState};

/// The reader owns every piece of mutable state; trackers and the UI receive
/// it explicitly instead of reaching into ambient scope.
pub struct Reader {
    pub state: ReaderState,
    pub overlay: OverlayState,
    pub status: StatusState,
    pub catalog: PageCatalog,
    pub assets: Vec<PageAsset>,
    pub thumbs: Vec<ThumbCard>,
    pub layout: ColumnLayout,
    pub scroll: ScrollState,
    pub reveals: RevealState,
    pub session: SessionStore,
    pub fullscreen: Box<dyn FullscreenHost>,
    pub presenter: Box<dyn PagePresenter>,
    pub config: Config,
    pub(crate) loading: bool,
    /// Column rect of the last drawn frame; effects that need geometry
    /// (screen scrolls, jumps) resolve against it.
    pub(crate) column: Rect,
    pub(crate) needs_remeasure: bool,
}

impl Reader {
    pub(crate) fn column_width_cells(&self) -> u16 {
        let fraction = self.config.viewport.column_width_fraction;
        ((self.column.width as f32 * fraction) as u16).clamp(1, self.column.width.max(1))
    }

    pub(crate) fn viewport_rows(&self) -> f32 {
        self.column.height as f32
    }

    fn anchor_offset(&self) -> f32 {
        self.config.viewport.anchor_offset_rows
    }

    /// Re-measures slot geometry for the current zoom and column width, then
    /// re-anchors the scroll so the current page stays where the reader left
    /// it.
    pub(crate) fn remeasure(&mut self) {
        let measured = ColumnLayout::measure(
            &self.assets,
            &MeasureParams {
                column_width_cells: self.column_width_cells(),
                cell_size_px: self.presenter.cell_size_px(),
                zoom: self.state.zoom,
                page_gap_rows: self.config.viewport.page_gap_rows,
            },
        );
        if measured == self.layout {
            self.needs_remeasure = false;
            return;
        }

        self.layout = measured;
        self.presenter.invalidate();
        let offset = self.layout.offset_for_index(
            self.state.current_index,
            self.anchor_offset(),
            self.viewport_rows(),
        );
        self.scroll.jump_to(offset);
        self.needs_remeasure = false;
    }

    /// Scroll-position → current-page reconciliation: resolves the nearest
    /// page to the anchor, persists on change, and advances reveal flags.
    /// Runs after every scroll mutation, never on a timer.
    pub(crate) fn sync_scroll_position(&mut self) {
        let resolved =
            resolve_current_index(&self.layout, self.scroll.offset(), self.anchor_offset());
        if resolved != self.state.current_index {
            self.state.current_index = resolved;
            self.session.save_index(resolved);
        }
        self.reveals.observe(
            &self.layout,
            self.scroll.offset(),
            self.viewport_rows(),
            self.config.viewport.reveal_threshold,
        );
    }

    /// Executes the side effects a dispatch produced.
    pub(crate) fn execute_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PersistIndex(index) => self.session.save_index(index),
                Effect::PersistZoom(zoom) => self.session.save_zoom(zoom),
                Effect::RemeasureLayout => {
                    self.needs_remeasure = true;
                }
                Effect::ScrollToIndex { index, smooth } => {
                    if self.needs_remeasure {
                        self.remeasure();
                    }
                    let offset = self.layout.offset_for_index(
                        index,
                        self.anchor_offset(),
                        self.viewport_rows(),
                    );
                    if smooth {
                        self.scroll.glide_to(offset);
                    } else {
                        self.scroll.jump_to(offset);
                        self.sync_scroll_position();
                    }
                }
                Effect::ScrollBy(amount) => {
                    let rows = match amount {
                        ScrollAmount::Lines(lines) => lines as f32,
                        ScrollAmount::Screens(screens) => screens as f32 * self.viewport_rows(),
                    };
                    let max = self.layout.max_scroll_offset(self.viewport_rows());
                    self.scroll.scroll_by(rows, max);
                    self.sync_scroll_position();
                }
            }
        }
    }

    /// Advances the smooth-scroll animation one tick; true while moving.
    pub(crate) fn tick_scroll_animation(&mut self) -> bool {
        let moving = self.scroll.tick(self.config.timing.scroll_ease_percent);
        if moving {
            self.sync_scroll_position();
        }
        moving
    }
}
