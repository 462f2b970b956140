use crate::assets::PageAsset;

/// Default terminal cell footprint used to convert image aspect ratios into
/// row counts when the host cannot report real cell metrics.
pub(crate) const DEFAULT_CELL_SIZE_PX: (f32, f32) = (10.0, 20.0);

/// Measured position of one page inside the scroll column, in rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlot {
    pub top: f32,
    pub height: f32,
    pub width_cells: u16,
}

impl PageSlot {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// The scroll column geometry: one slot per page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnLayout {
    slots: Vec<PageSlot>,
    total_height: f32,
}

pub struct MeasureParams {
    pub column_width_cells: u16,
    pub cell_size_px: Option<(u16, u16)>,
    pub zoom: f32,
    pub page_gap_rows: u16,
}

impl ColumnLayout {
    /// Lays the pages out as a single vertical strip. Zoom scales each page
    /// uniformly about the top of its slot, so only heights and widths move;
    /// ordering and adjacency never change.
    pub fn measure(assets: &[PageAsset], params: &MeasureParams) -> Self {
        let (cell_w, cell_h) = resolved_cell_size_px(params.cell_size_px);
        let gap = params.page_gap_rows as f32;
        let base_width = params.column_width_cells.max(1) as f32;
        let zoomed_width = (base_width * params.zoom).max(1.0);

        let mut slots = Vec::with_capacity(assets.len());
        let mut cursor = 0.0f32;
        for asset in assets {
            let aspect = asset.aspect_ratio();
            let height = (aspect * zoomed_width * (cell_w / cell_h)).max(1.0);
            slots.push(PageSlot {
                top: cursor,
                height,
                width_cells: zoomed_width.round() as u16,
            });
            cursor += height + gap;
        }

        let total_height = if slots.is_empty() {
            0.0
        } else {
            cursor - gap
        };
        Self {
            slots,
            total_height,
        }
    }

    pub fn slots(&self) -> &[PageSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&PageSlot> {
        self.slots.get(index)
    }

    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    pub fn max_scroll_offset(&self, viewport_rows: f32) -> f32 {
        (self.total_height - viewport_rows).max(0.0)
    }

    /// Scroll offset that aligns page `index`'s top edge with the anchor line.
    pub fn offset_for_index(&self, index: usize, anchor_offset: f32, viewport_rows: f32) -> f32 {
        let Some(slot) = self.slots.get(index) else {
            return 0.0;
        };
        (slot.top - anchor_offset).clamp(0.0, self.max_scroll_offset(viewport_rows))
    }
}

/// Resolves the current page as the slot whose top edge is nearest the anchor
/// line. This is a proximity heuristic, not a visibility test; ties go to the
/// lower index because only a strictly smaller distance displaces the best
/// candidate.
pub fn resolve_current_index(layout: &ColumnLayout, scroll_offset: f32, anchor_offset: f32) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (index, slot) in layout.slots().iter().enumerate() {
        let distance = (slot.top - scroll_offset - anchor_offset).abs();
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}

/// Fraction of the slot currently inside the viewport, in [0, 1].
pub fn visible_fraction(slot: &PageSlot, scroll_offset: f32, viewport_rows: f32) -> f32 {
    if slot.height <= 0.0 {
        return 0.0;
    }
    let view_top = scroll_offset;
    let view_bottom = scroll_offset + viewport_rows;
    let overlap = (slot.bottom().min(view_bottom) - slot.top.max(view_top)).max(0.0);
    overlap / slot.height
}

/// Continuous scroll position plus its animation target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    offset: f32,
    target: f32,
}

impl ScrollState {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        (self.target - self.offset).abs() < 0.5
    }

    /// Jump with no animation. Used for the initial position restore so the
    /// startup frame does not visibly scroll.
    pub fn jump_to(&mut self, offset: f32) {
        self.offset = offset.max(0.0);
        self.target = self.offset;
    }

    /// Animated move: the offset eases toward the target on every tick.
    pub fn glide_to(&mut self, offset: f32) {
        self.target = offset.max(0.0);
    }

    pub fn scroll_by(&mut self, delta: f32, max_offset: f32) {
        let next = (self.target + delta).clamp(0.0, max_offset);
        self.offset = next;
        self.target = next;
    }

    pub fn clamp_to(&mut self, max_offset: f32) {
        self.offset = self.offset.clamp(0.0, max_offset);
        self.target = self.target.clamp(0.0, max_offset);
    }

    /// Advances one animation tick; returns true while still moving.
    pub fn tick(&mut self, ease_percent: u8) -> bool {
        if self.is_settled() {
            self.offset = self.target;
            return false;
        }
        let ease = (ease_percent.clamp(1, 100) as f32) / 100.0;
        self.offset += (self.target - self.offset) * ease;
        true
    }
}

/// One-shot reveal flags: a page that has ever crossed the visibility
/// threshold stays revealed. Purely cosmetic.
#[derive(Debug, Clone, Default)]
pub struct RevealState {
    shown: Vec<bool>,
}

impl RevealState {
    pub fn new(page_count: usize) -> Self {
        Self {
            shown: vec![false; page_count],
        }
    }

    pub fn is_shown(&self, index: usize) -> bool {
        self.shown.get(index).copied().unwrap_or(false)
    }

    pub fn observe(
        &mut self,
        layout: &ColumnLayout,
        scroll_offset: f32,
        viewport_rows: f32,
        threshold: f32,
    ) {
        for (index, slot) in layout.slots().iter().enumerate() {
            if self.is_shown(index) {
                continue;
            }
            if visible_fraction(slot, scroll_offset, viewport_rows) >= threshold {
                if let Some(flag) = self.shown.get_mut(index) {
                    *flag = true;
                }
            }
        }
    }
}

pub(crate) fn resolved_cell_size_px(cell_px: Option<(u16, u16)>) -> (f32, f32) {
    match cell_px {
        Some((width, height)) if width > 0 && height > 0 => (width as f32, height as f32),
        _ => DEFAULT_CELL_SIZE_PX,
    }
}

#[cfg(test)]
mod tests {
    use crate::assets::PageAsset;

    use super::{
        ColumnLayout, MeasureParams, PageSlot, RevealState, ScrollState, resolve_current_index,
        visible_fraction,
    };

    /// Six square pages, 20 rows tall each, 1-row gaps.
    fn six_page_layout() -> ColumnLayout {
        let assets: Vec<PageAsset> = (0..6).map(|_| PageAsset::placeholder(800, 800)).collect();
        ColumnLayout::measure(
            &assets,
            &MeasureParams {
                column_width_cells: 40,
                cell_size_px: Some((10, 20)),
                zoom: 1.0,
                page_gap_rows: 1,
            },
        )
    }

    #[test]
    fn measure_stacks_slots_with_gaps() {
        let layout = six_page_layout();
        let slots = layout.slots();
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0], PageSlot { top: 0.0, height: 20.0, width_cells: 40 });
        assert_eq!(slots[1].top, 21.0);
        assert_eq!(slots[5].top, 105.0);
        assert_eq!(layout.total_height(), 125.0);
    }

    #[test]
    fn zoom_scales_slot_heights_and_widths() {
        let assets = vec![PageAsset::placeholder(800, 800)];
        let zoomed = ColumnLayout::measure(
            &assets,
            &MeasureParams {
                column_width_cells: 40,
                cell_size_px: Some((10, 20)),
                zoom: 1.5,
                page_gap_rows: 1,
            },
        );
        assert_eq!(zoomed.slots()[0].height, 30.0);
        assert_eq!(zoomed.slots()[0].width_cells, 60);
    }

    #[test]
    fn nearest_anchor_resolution_is_deterministic() {
        let layout = six_page_layout();
        // Page 3 tops out at row 63; anchor sits 4 rows into the viewport.
        let offset = 59.0;
        for _ in 0..3 {
            assert_eq!(resolve_current_index(&layout, offset, 4.0), 3);
        }
    }

    #[test]
    fn nearest_anchor_tie_goes_to_the_lower_index() {
        // Slot tops at 0 and 21; offset placing the anchor exactly between
        // them (10.5 - 4.0 = 6.5 from each top) must pick index 0.
        let layout = six_page_layout();
        assert_eq!(resolve_current_index(&layout, 6.5, 4.0), 0);
    }

    #[test]
    fn scrolling_page_three_under_the_anchor_selects_it() {
        let layout = six_page_layout();
        let offset = layout.offset_for_index(3, 4.0, 30.0);
        assert_eq!(offset, 59.0);
        assert_eq!(resolve_current_index(&layout, offset, 4.0), 3);
    }

    #[test]
    fn visible_fraction_clamps_to_unit_range() {
        let slot = PageSlot {
            top: 10.0,
            height: 20.0,
            width_cells: 40,
        };
        assert_eq!(visible_fraction(&slot, 0.0, 40.0), 1.0);
        assert_eq!(visible_fraction(&slot, 0.0, 15.0), 0.25);
        assert_eq!(visible_fraction(&slot, 35.0, 20.0), 0.0);
    }

    #[test]
    fn scroll_state_glide_eases_toward_target() {
        let mut scroll = ScrollState::default();
        scroll.glide_to(100.0);
        assert!(scroll.tick(30));
        assert!((scroll.offset() - 30.0).abs() < 0.001);
        while scroll.tick(30) {}
        assert_eq!(scroll.offset(), scroll.target());
    }

    #[test]
    fn scroll_state_jump_is_immediate() {
        let mut scroll = ScrollState::default();
        scroll.jump_to(59.0);
        assert_eq!(scroll.offset(), 59.0);
        assert!(scroll.is_settled());
        assert!(!scroll.tick(30));
    }

    #[test]
    fn reveal_state_is_one_shot() {
        let layout = six_page_layout();
        let mut reveals = RevealState::new(6);

        reveals.observe(&layout, 0.0, 30.0, 0.12);
        assert!(reveals.is_shown(0));
        assert!(reveals.is_shown(1));
        assert!(!reveals.is_shown(5));

        // Scrolling to the end must not un-show earlier pages.
        reveals.observe(&layout, 95.0, 30.0, 0.12);
        assert!(reveals.is_shown(5));
        assert!(reveals.is_shown(0));
    }
}
