use super::entry::{NavigationEntry, ScrollOffset};

/// Whether two navigation lists differ in length or in any positional label
pub fn have_diverged<R>(previous: &[NavigationEntry<R>], current: &[NavigationEntry<R>]) -> bool {
    previous.len() != current.len()
        || previous
            .iter()
            .zip(current)
            .any(|(prev, cur)| prev.label != cur.label)
}

/// Two generations of the navigation list.
///
/// `previous` is the committed result of the last completed snapshot;
/// `current` accumulates the snapshot in flight and is empty otherwise.
#[derive(Debug)]
pub struct NavigationState<R> {
    previous: Vec<NavigationEntry<R>>,
    current: Vec<NavigationEntry<R>>,
    previous_offset: ScrollOffset,
}

impl<R> NavigationState<R> {
    pub fn new() -> Self {
        Self {
            previous: Vec::new(),
            current: Vec::new(),
            previous_offset: ScrollOffset::ORIGIN,
        }
    }

    /// Open a new generation, remembering where the panel was scrolled before it
    pub fn begin(&mut self, offset: ScrollOffset) {
        self.current.clear();
        self.previous_offset = offset;
    }

    pub fn push(&mut self, entry: NavigationEntry<R>) {
        self.current.push(entry);
    }

    pub fn has_diverged(&self) -> bool {
        have_diverged(&self.previous, &self.current)
    }

    /// Promote the current generation to previous, leaving current empty
    pub fn commit(&mut self) {
        self.previous = std::mem::take(&mut self.current);
    }

    /// Forget both generations; the in-flight one is discarded, not committed
    pub fn reset(&mut self) {
        self.current.clear();
        self.previous.clear();
        self.previous_offset = ScrollOffset::ORIGIN;
    }

    pub fn previous_entries(&self) -> &[NavigationEntry<R>] {
        &self.previous
    }

    pub fn current_entries(&self) -> &[NavigationEntry<R>] {
        &self.current
    }

    pub fn previous_offset(&self) -> ScrollOffset {
        self.previous_offset
    }
}

impl<R> Default for NavigationState<R> {
    fn default() -> Self {
        Self::new()
    }
}
