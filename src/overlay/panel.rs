use crate::navigation::ScrollOffset;

/// Rendering side of the overlay: a scrollable list of rows.
///
/// Rows are addressed by index; clicking row `i` is routed back through
/// `LinearNavigationOverlay::click_entry(i)`.
pub trait OverlayPanel {
    fn scroll_offset(&self) -> ScrollOffset;

    fn scroll_to(&mut self, offset: ScrollOffset);

    fn clear_rows(&mut self);

    fn add_row(&mut self, index: usize, label: &str);
}

/// Panel that keeps its rows in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryPanel {
    rows: Vec<String>,
    offset: ScrollOffset,
}

impl InMemoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

impl OverlayPanel for InMemoryPanel {
    fn scroll_offset(&self) -> ScrollOffset {
        self.offset
    }

    fn scroll_to(&mut self, offset: ScrollOffset) {
        self.offset = offset;
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn add_row(&mut self, index: usize, label: &str) {
        debug_assert_eq!(index, self.rows.len());
        self.rows.push(label.to_string());
    }
}
