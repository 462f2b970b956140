/// Fixed HUD labels, mirrored from the reading-mode tag and hint line.
pub const MODE_TAG: &str = "SCROLL";
pub const HINT_LINE: &str = "Scroll to read";

/// Progress through the book as a percentage of the last index.
pub fn progress_percent(index: usize, page_count: usize) -> f32 {
    if page_count <= 1 {
        return 100.0;
    }
    (index * 100) as f32 / (page_count - 1) as f32
}

/// The "4 / 6" style counter.
pub fn counter_text(index: usize, page_count: usize) -> String {
    format!("{} / {}", index + 1, page_count)
}
