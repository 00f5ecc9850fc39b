//! Optimistic local updates with rollback.
//!
//! Each change runs in three phases: snapshot the prior state, apply the
//! tentative state locally, then settle against the server outcome. Success
//! drops the snapshot; failure puts it back.

/// Prior value of a slot that was overwritten tentatively.
#[derive(Debug)]
#[must_use = "settle the snapshot once the server answers"]
pub struct Snapshot<T> {
    previous: T,
}

impl<T> Snapshot<T> {
    /// Overwrite `slot` with `tentative`, keeping the old value.
    pub fn replace(slot: &mut T, tentative: T) -> Self {
        Self {
            previous: std::mem::replace(slot, tentative),
        }
    }

    /// The value that would be restored on failure.
    pub fn previous(&self) -> &T {
        &self.previous
    }

    /// Keep the tentative value on success; restore the snapshot on failure.
    pub fn settle<R, E>(self, slot: &mut T, outcome: Result<R, E>) -> Result<R, E> {
        if outcome.is_err() {
            *slot = self.previous;
        }
        outcome
    }
}

/// Item removed tentatively from a list, with its position.
#[derive(Debug)]
#[must_use = "settle the removal once the server answers"]
pub struct Removal<T> {
    index: usize,
    item: T,
}

impl<T> Removal<T> {
    /// Remove `items[index]`, or return `None` when out of bounds.
    pub fn take(items: &mut Vec<T>, index: usize) -> Option<Self> {
        (index < items.len()).then(|| Self {
            index,
            item: items.remove(index),
        })
    }

    /// The removed item.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Drop the item on success; reinsert it at its old position on failure.
    ///
    /// The position is clamped to the current length.
    pub fn settle<R, E>(self, items: &mut Vec<T>, outcome: Result<R, E>) -> Result<R, E> {
        if outcome.is_err() {
            let index = self.index.min(items.len());
            items.insert(index, self.item);
        }
        outcome
    }
}
