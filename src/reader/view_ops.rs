use ratatui::Frame;
use ratatui::layout::Rect;

use crate::presenter::PresentSpec;
use crate::ui::{
    HudView, draw_chrome, draw_drawer, draw_exit_fullscreen_hint, draw_help_overlay,
    draw_loading_overlay, split_layout,
};

use super::core::Reader;
use super::hud::{HINT_LINE, MODE_TAG, counter_text, progress_percent};

impl Reader {
    pub(crate) fn hud_view(&self) -> HudView {
        let page_count = self.catalog.len();
        HudView {
            title: self.catalog.title().to_string(),
            counter: counter_text(self.state.current_index, page_count),
            mode_tag: MODE_TAG,
            hint: HINT_LINE,
            zoom: self.state.zoom,
            progress_percent: progress_percent(self.state.current_index, page_count),
            status_message: self.status.message.clone(),
        }
    }

    pub(crate) fn draw_frame(&mut self, frame: &mut Frame<'_>) {
        let fullscreen = self.fullscreen.is_active();
        let layout = split_layout(frame.area(), fullscreen);

        if self.column != layout.column {
            self.column = layout.column;
            self.needs_remeasure = true;
        }
        if self.needs_remeasure && !self.loading {
            self.remeasure();
        }

        draw_chrome(frame, layout, &self.hud_view());
        if !self.loading {
            self.draw_column(frame, layout.column);
        }

        // Observed state only: the hint appears when the host says fullscreen
        // is active, regardless of who requested it.
        if fullscreen {
            draw_exit_fullscreen_hint(frame, layout.column);
        }
        if self.loading {
            draw_loading_overlay(frame, layout.column, self.catalog.len());
        }
        if self.overlay.drawer_open {
            draw_drawer(
                frame,
                layout.column,
                &self.thumbs,
                self.overlay.drawer_selected,
            );
        }
        if self.overlay.help_open {
            draw_help_overlay(frame, layout.column);
        }
    }

    /// Draws the visible slice of the page column: every slot that overlaps
    /// the viewport gets its on-screen intersection.
    fn draw_column(&mut self, frame: &mut Frame<'_>, column: Rect) {
        if column.width == 0 || column.height == 0 {
            return;
        }

        let offset = self.scroll.offset();
        let view_rows = column.height as f32;
        let slots: Vec<_> = self.layout.slots().to_vec();
        for (index, slot) in slots.iter().enumerate() {
            let top_rel = slot.top - offset;
            let bottom_rel = top_rel + slot.height;
            if bottom_rel <= 0.0 || top_rel >= view_rows {
                continue;
            }

            let y0 = top_rel.max(0.0).round() as u16;
            let y1 = bottom_rel.min(view_rows).round() as u16;
            if y1 <= y0 {
                continue;
            }
            let width = slot.width_cells.clamp(1, column.width);
            let x = column.x + (column.width - width) / 2;
            let area = Rect::new(x, column.y + y0, width, y1 - y0);

            let Some(page) = self.catalog.page(index) else {
                continue;
            };
            let Some(asset) = self.assets.get(index) else {
                continue;
            };
            let spec = PresentSpec {
                index,
                label: &page.label,
                asset,
                zoom: self.state.zoom,
                revealed: self.reveals.is_shown(index),
            };
            self.presenter.draw_page(frame, area, &spec);
        }
    }
}
